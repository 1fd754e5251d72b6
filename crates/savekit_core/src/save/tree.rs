/// Entry key holding the text of a scalar save-field value.
pub const SCALAR_VALUE_KEY: &str = "value";

/// Format-neutral encoded value.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
	/// Locale-invariant scalar text.
	Text(Box<str>),
	/// Nested object or list.
	Frame(Frame),
}

/// Whether a frame's entries are members or list elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
	/// Entries are keyed by serialized member name.
	Object,
	/// Entries are keyed by element type tag, in list order.
	List,
}

/// One encoded object or list.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
	/// Type tag, when the format records one at this position.
	pub type_tag: Option<Box<str>>,
	/// Entry interpretation; binary input always reports [`FrameKind::Object`].
	pub kind: FrameKind,
	/// Members or elements in encoded order.
	pub entries: Vec<Entry>,
}

/// Keyed child of a [`Frame`].
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
	/// Member name or element type tag.
	pub key: Box<str>,
	/// Encoded child value.
	pub node: Node,
}

/// Top-level encoded save field.
#[derive(Debug, Clone, PartialEq)]
pub struct RootFrame {
	/// Save-field name.
	pub name: Box<str>,
	/// Encoded value; always tagged when produced by lowering.
	pub frame: Frame,
}

impl Frame {
	/// Empty frame of the given kind.
	pub fn new(type_tag: Option<&str>, kind: FrameKind) -> Self {
		Self {
			type_tag: type_tag.map(Into::into),
			kind,
			entries: Vec::new(),
		}
	}

	/// Find the first entry with `key`.
	pub fn entry(&self, key: &str) -> Option<&Entry> {
		self.entries.iter().find(|entry| &*entry.key == key)
	}
}

impl Entry {
	/// Scalar entry.
	pub fn text(key: impl Into<Box<str>>, text: impl Into<Box<str>>) -> Self {
		Self {
			key: key.into(),
			node: Node::Text(text.into()),
		}
	}

	/// Nested frame entry.
	pub fn frame(key: impl Into<Box<str>>, frame: Frame) -> Self {
		Self {
			key: key.into(),
			node: Node::Frame(frame),
		}
	}
}

impl Node {
	/// Short shape label used in mismatch diagnostics.
	pub fn shape_label(&self) -> &'static str {
		match self {
			Self::Text(_) => "scalar text",
			Self::Frame(frame) => match frame.kind {
				FrameKind::Object => "object frame",
				FrameKind::List => "list frame",
			},
		}
	}
}
