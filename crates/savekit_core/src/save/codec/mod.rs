use std::path::Path;

use crate::save::traverse::{self, TraverseOptions};
use crate::save::{Registry, Result, RootFrame, SaveError, SaveField, Settings};

/// Length-prefixed token codec.
pub mod binary;
/// `serde_json` codec with order-preserving maps.
pub mod json;
/// `quick-xml` codec.
pub mod xml;

/// On-disk save format, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
	/// `.bin`
	Binary,
	/// `.xml`
	Xml,
	/// `.json`
	Json,
}

impl Format {
	/// Resolve the format of `path` from its extension.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let Some(extension) = path.extension() else {
			return Err(SaveError::UnsupportedExtension { extension: String::new() });
		};
		Self::from_extension(&extension.to_string_lossy())
	}

	/// Resolve an extension without its leading dot, ignoring ASCII case.
	pub fn from_extension(extension: &str) -> Result<Self> {
		if extension.eq_ignore_ascii_case("bin") {
			Ok(Self::Binary)
		} else if extension.eq_ignore_ascii_case("xml") {
			Ok(Self::Xml)
		} else if extension.eq_ignore_ascii_case("json") {
			Ok(Self::Json)
		} else {
			Err(SaveError::UnsupportedExtension {
				extension: extension.to_owned(),
			})
		}
	}

	/// Canonical extension.
	pub fn extension(self) -> &'static str {
		match self {
			Self::Binary => "bin",
			Self::Xml => "xml",
			Self::Json => "json",
		}
	}

	/// Human-readable label.
	pub fn label(self) -> &'static str {
		match self {
			Self::Binary => "binary",
			Self::Xml => "xml",
			Self::Json => "json",
		}
	}

	/// Codec implementing this format.
	pub fn codec(self) -> &'static dyn Codec {
		match self {
			Self::Binary => &binary::BinaryCodec,
			Self::Xml => &xml::XmlCodec,
			Self::Json => &json::JsonCodec,
		}
	}
}

/// Byte-level framing of root frames for one format.
pub trait Codec {
	/// Serialize every root frame, in order.
	fn write_frames(&self, roots: &[RootFrame], settings: &Settings) -> Result<Vec<u8>>;

	/// Parse a whole document back into root frames, in order.
	fn read_frames(&self, bytes: &[u8], settings: &Settings) -> Result<Vec<RootFrame>>;
}

/// Encode save fields in `format`.
pub fn encode(format: Format, fields: &[SaveField], settings: &Settings) -> Result<Vec<u8>> {
	let opt = TraverseOptions::from_settings(settings);
	let roots: Vec<RootFrame> = fields.iter().map(|field| traverse::lower_root(field, &opt)).collect();
	let bytes = format.codec().write_frames(&roots, settings)?;
	log::debug!("encoded {} save fields as {} ({} bytes)", roots.len(), format.label(), bytes.len());
	Ok(bytes)
}

/// Decode every save field of a document; fails without partial output.
pub fn decode(format: Format, bytes: &[u8], settings: &Settings, registry: &Registry) -> Result<Vec<SaveField>> {
	let opt = TraverseOptions::from_settings(settings);
	let roots = read_tree(format, bytes, settings)?;
	let fields = roots.into_iter().map(|root| traverse::raise_root(root, registry, &opt)).collect::<Result<Vec<_>>>()?;
	log::debug!("decoded {} save fields from {}", fields.len(), format.label());
	Ok(fields)
}

/// Parse a document into its frame tree without resolving types.
pub fn read_tree(format: Format, bytes: &[u8], settings: &Settings) -> Result<Vec<RootFrame>> {
	format.codec().read_frames(bytes, settings)
}
