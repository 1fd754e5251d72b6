use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;

use crate::save::codec::Codec;
use crate::save::{Entry, Frame, FrameKind, MAX_DEPTH, Node, Result, RootFrame, SaveError, Settings};

/// Synthetic key holding a frame's type tag.
pub const TYPE_KEY: &str = "type";

const FORMAT: &str = "json";

/// `serde_json` codec for `.json` files.
///
/// The document maps field names to frames. Each frame starts with a `"type"`
/// key; list elements use `"item <i> <tag>"` for scalar text and `"item <i>"`
/// for nested frames. Map order and duplicate keys are preserved both ways.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
	fn write_frames(&self, roots: &[RootFrame], settings: &Settings) -> Result<Vec<u8>> {
		let doc = Document(roots);
		let mut out = Vec::new();
		if settings.newlines {
			let indent: &[u8] = if settings.indent { b"  " } else { b"" };
			let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent));
			doc.serialize(&mut ser)?;
		} else {
			serde_json::to_writer(&mut out, &doc)?;
		}
		settings.encoding.encode_document(out)
	}

	fn read_frames(&self, bytes: &[u8], settings: &Settings) -> Result<Vec<RootFrame>> {
		let text = settings.encoding.decode_document(bytes)?;
		let JsonNode::Map(fields) = serde_json::from_str::<JsonNode>(&text)? else {
			return Err(malformed("document must be an object keyed by save field name".to_owned()));
		};

		fields
			.into_iter()
			.map(|(name, node)| match node {
				JsonNode::Map(entries) => Ok(RootFrame {
					name: name.into(),
					frame: frame_from_map(entries, 0)?,
				}),
				JsonNode::Text(_) => Err(malformed(format!("save field {name:?} must be an object"))),
			})
			.collect()
	}
}

struct Document<'a>(&'a [RootFrame]);

impl Serialize for Document<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.0.len()))?;
		for root in self.0 {
			map.serialize_entry(&*root.name, &FrameOut { frame: &root.frame, fallback_tag: None })?;
		}
		map.end()
	}
}

struct FrameOut<'a> {
	frame: &'a Frame,
	fallback_tag: Option<&'a str>,
}

impl Serialize for FrameOut<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		let frame = self.frame;
		let mut map = serializer.serialize_map(None)?;
		if let Some(tag) = frame.type_tag.as_deref().or(self.fallback_tag) {
			map.serialize_entry(TYPE_KEY, tag)?;
		}

		for (index, entry) in frame.entries.iter().enumerate() {
			match (frame.kind, &entry.node) {
				(FrameKind::Object, Node::Text(text)) => map.serialize_entry(&*entry.key, &**text)?,
				(FrameKind::Object, Node::Frame(child)) => map.serialize_entry(&*entry.key, &FrameOut { frame: child, fallback_tag: None })?,
				(FrameKind::List, Node::Text(text)) => map.serialize_entry(&format!("item {index} {}", entry.key), &**text)?,
				(FrameKind::List, Node::Frame(child)) => map.serialize_entry(
					&format!("item {index}"),
					&FrameOut {
						frame: child,
						fallback_tag: Some(&*entry.key),
					},
				)?,
			}
		}
		map.end()
	}
}

/// Order-preserving JSON value restricted to the save layout.
#[derive(Debug, Clone, PartialEq)]
enum JsonNode {
	Text(String),
	Map(Vec<(String, JsonNode)>),
}

impl<'de> Deserialize<'de> for JsonNode {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
		deserializer.deserialize_any(JsonNodeVisitor)
	}
}

struct JsonNodeVisitor;

impl<'de> Visitor<'de> for JsonNodeVisitor {
	type Value = JsonNode;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("a string, number, boolean, or object")
	}

	fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<JsonNode, E> {
		Ok(JsonNode::Text(v.to_string()))
	}

	fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<JsonNode, E> {
		Ok(JsonNode::Text(v.to_string()))
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<JsonNode, E> {
		Ok(JsonNode::Text(v.to_string()))
	}

	fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<JsonNode, E> {
		Ok(JsonNode::Text(v.to_string()))
	}

	fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<JsonNode, E> {
		Ok(JsonNode::Text(v.to_owned()))
	}

	fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<JsonNode, E> {
		Ok(JsonNode::Text(v))
	}

	fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<JsonNode, A::Error> {
		let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
		while let Some((key, value)) = access.next_entry::<String, JsonNode>()? {
			entries.push((key, value));
		}
		Ok(JsonNode::Map(entries))
	}
}

/// Split off the first `"type"` text entry, then decide object vs list by keys.
fn frame_from_map(mut entries: Vec<(String, JsonNode)>, depth: u32) -> Result<Frame> {
	if depth > MAX_DEPTH {
		return Err(SaveError::DecodeDepthExceeded { max_depth: MAX_DEPTH });
	}

	let tag_at = entries.iter().position(|(key, node)| key == TYPE_KEY && matches!(node, JsonNode::Text(_)));
	let type_tag = match tag_at.map(|at| entries.remove(at)) {
		Some((_, JsonNode::Text(tag))) => Some(tag.into_boxed_str()),
		_ => None,
	};

	let list = !entries.is_empty() && entries.iter().enumerate().all(|(index, (key, node))| item_key(key, index).is_some_and(|tag| tag.is_some() == matches!(node, JsonNode::Text(_))));
	let mut frame = Frame {
		type_tag,
		kind: if list { FrameKind::List } else { FrameKind::Object },
		entries: Vec::with_capacity(entries.len()),
	};

	for (index, (key, node)) in entries.into_iter().enumerate() {
		let entry = match node {
			JsonNode::Text(text) => {
				let key = if list { item_key(&key, index).flatten().unwrap_or_default().to_owned() } else { key };
				Entry::text(key, text)
			}
			JsonNode::Map(children) => {
				let child = frame_from_map(children, depth + 1)?;
				let key = if list {
					child.type_tag.as_deref().map(str::to_owned).ok_or_else(|| malformed(format!("list element {key:?} has no \"type\" key")))?
				} else {
					key
				};
				Entry::frame(key, child)
			}
		};
		frame.entries.push(entry);
	}
	Ok(frame)
}

/// Parse `item <index>` or `item <index> <tag>`; `Some(tag)` when it matches `index`.
fn item_key(key: &str, index: usize) -> Option<Option<&str>> {
	let rest = key.strip_prefix("item ")?;
	let (position, tag) = match rest.split_once(' ') {
		Some((position, tag)) => (position, Some(tag)),
		None => (rest, None),
	};
	(position.parse::<usize>().ok()? == index).then_some(tag)
}

fn malformed(reason: String) -> SaveError {
	SaveError::MalformedDocument { format: FORMAT, reason }
}

#[cfg(test)]
mod tests;
