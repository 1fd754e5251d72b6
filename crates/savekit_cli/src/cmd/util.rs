use std::fs;
use std::path::Path;

use savekit::save::codec::read_tree;
use savekit::save::{Format, Result, RootFrame, Settings};

/// Frame tree of a save file plus what was needed to read it.
pub(crate) struct LoadedTree {
	pub format: Format,
	pub byte_len: usize,
	pub roots: Vec<RootFrame>,
}

/// Settings from `--settings`, or defaults.
pub(crate) fn load_settings(path: Option<&Path>) -> Result<Settings> {
	match path {
		Some(path) => Settings::from_json_file(path),
		None => Ok(Settings::default()),
	}
}

/// Read and parse `path` without resolving any type.
pub(crate) fn load_tree(path: &Path, settings: &Settings) -> Result<LoadedTree> {
	let format = Format::from_path(path)?;
	let bytes = fs::read(path)?;
	let roots = read_tree(format, &bytes, settings)?;
	log::debug!("read {} save fields from {} ({} bytes)", roots.len(), path.display(), bytes.len());
	Ok(LoadedTree {
		format,
		byte_len: bytes.len(),
		roots,
	})
}

/// Pretty-print `payload` as JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}

/// Display form of a path for JSON payloads.
pub(crate) fn path_label(path: &Path) -> String {
	path.display().to_string()
}
