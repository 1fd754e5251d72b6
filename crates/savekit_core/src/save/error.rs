use thiserror::Error;

use crate::save::ScalarKind;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, SaveError>;

/// Errors produced while building, encoding, decoding, and persisting save fields.
#[derive(Debug, Error)]
pub enum SaveError {
	/// Filesystem failure, passed through unchanged.
	#[error(transparent)]
	Io(#[from] std::io::Error),
	/// File extension does not map to a known format.
	#[error("unsupported save file extension {extension:?} (expected bin, xml, or json)")]
	UnsupportedExtension {
		/// Extension as found on the path, empty when missing.
		extension: String,
	},
	/// A field with the same name exists and duplicates are disallowed.
	#[error("a save field named {name:?} already exists")]
	DuplicateField {
		/// Conflicting field name.
		name: String,
	},
	/// No save field carries the requested name.
	#[error("no save field named {name:?}")]
	FieldNotFound {
		/// Requested field name.
		name: String,
	},
	/// Positional access past the end of the field sequence.
	#[error("save field index {index} out of range (len={len})")]
	FieldIndexOutOfRange {
		/// Requested index.
		index: usize,
		/// Current field count.
		len: usize,
	},
	/// Saved data names a member the current type does not have.
	#[error("type {type_name} does not have a member named {member:?}")]
	MissingMember {
		/// Type tag of the object being populated.
		type_name: String,
		/// Serialized member name found in the input.
		member: String,
	},
	/// Type tag is not present in the registry.
	#[error("unknown type tag {type_name:?}; register the type before loading")]
	UnknownType {
		/// Unresolved type tag.
		type_name: String,
	},
	/// Encoded shape or tag disagrees with the declared type.
	#[error("type mismatch: expected {expected}, got {got}")]
	TypeMismatch {
		/// Declared type tag or shape.
		expected: String,
		/// Tag or shape found in the input.
		got: String,
	},
	/// Scalar text could not be parsed as its declared kind.
	#[error("invalid {kind} text {text:?}")]
	InvalidScalar {
		/// Target scalar kind.
		kind: ScalarKind,
		/// Offending text.
		text: String,
	},
	/// Decoded frames nest deeper than the hard ceiling.
	#[error("decode depth exceeded (max={max_depth})")]
	DecodeDepthExceeded {
		/// Hard depth ceiling.
		max_depth: u32,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Binary token stream is structurally invalid.
	#[error("malformed binary save at offset {at}: {reason}")]
	MalformedBinary {
		/// Byte offset of the offending token.
		at: usize,
		/// Short description of the problem.
		reason: String,
	},
	/// Bytes could not be decoded in the configured text encoding.
	#[error("invalid {encoding} text at byte {at}")]
	InvalidText {
		/// Encoding label.
		encoding: &'static str,
		/// Byte offset of the first invalid sequence.
		at: usize,
	},
	/// Underlying XML reader or writer failure.
	#[error("xml: {0}")]
	Xml(#[from] quick_xml::Error),
	/// Underlying JSON reader or writer failure.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Text document parsed but does not follow the save layout.
	#[error("malformed {format} save: {reason}")]
	MalformedDocument {
		/// Format label.
		format: &'static str,
		/// Short description of the problem.
		reason: String,
	},
}
