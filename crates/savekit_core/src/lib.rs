//! Public library API for persisting named object graphs to save files.

/// Save fields, member policy, depth governor, registry, and the binary/XML/JSON codecs.
pub mod save;
