use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::save::{Depth, Result, TextEncoding};

/// Per-file persistence policy.
///
/// Every [`crate::save::SaveFile`] owns its own copy; there is no shared default instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Encoding of binary tokens and XML/JSON documents.
	pub encoding: TextEncoding,
	/// Nested descent bound.
	pub depth: Depth,
	/// Start empty instead of loading an existing file.
	pub overwrite: bool,
	/// Allow several save fields with the same name.
	pub allow_duplicate_names: bool,
	/// Include members declared on embedded base types.
	pub include_inherited: bool,
	/// Include plain data fields as well as properties.
	pub include_fields: bool,
	/// Indent nested XML/JSON elements.
	pub indent: bool,
	/// Break XML/JSON output into lines.
	pub newlines: bool,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			encoding: TextEncoding::Utf8,
			depth: Depth::Unbounded,
			overwrite: false,
			allow_duplicate_names: false,
			include_inherited: false,
			include_fields: false,
			indent: true,
			newlines: true,
		}
	}
}

impl Settings {
	/// Preset producing single-line text documents.
	pub fn compact() -> Self {
		Self {
			indent: false,
			newlines: false,
			..Self::default()
		}
	}

	/// Load settings from a JSON file; missing keys keep their defaults.
	pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
		let raw = fs::read(path)?;
		Ok(serde_json::from_slice(&raw)?)
	}
}
