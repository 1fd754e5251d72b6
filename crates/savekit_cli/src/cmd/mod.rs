/// Write a sample save file.
pub mod demo;
/// Per-field summary command.
pub mod info;
/// Frame tree printing helpers.
pub mod print;
/// Frame tree display command.
pub mod show;
/// Shared command helpers.
pub mod util;
