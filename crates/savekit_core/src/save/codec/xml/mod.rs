use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::save::codec::Codec;
use crate::save::{Entry, Frame, FrameKind, MAX_DEPTH, Node, Result, RootFrame, SaveError, ScalarKind, Settings};

const ROOT: &str = "root";
const OBJECT: &str = "object";
const PROPERTY: &str = "property";
const ITEM: &str = "item";

const FORMAT: &str = "xml";

/// `quick-xml` codec for `.xml` files.
///
/// Layout: `<root>` holds one `<object type name>` per save field. Object
/// members are `<property name>` with text or a nested `<object type>`; list
/// elements are `<item type>` holding text or their own members directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCodec;

impl Codec for XmlCodec {
	fn write_frames(&self, roots: &[RootFrame], settings: &Settings) -> Result<Vec<u8>> {
		let mut w = if settings.newlines {
			Writer::new_with_indent(Vec::new(), b' ', if settings.indent { 2 } else { 0 })
		} else {
			Writer::new(Vec::new())
		};

		w.write_event(Event::Decl(BytesDecl::new("1.0", Some(settings.encoding.label()), None)))?;
		if roots.is_empty() {
			w.write_event(Event::Empty(BytesStart::new(ROOT)))?;
		} else {
			w.write_event(Event::Start(BytesStart::new(ROOT)))?;
			for root in roots {
				write_object(&mut w, &root.frame, Some(&*root.name))?;
			}
			w.write_event(Event::End(BytesEnd::new(ROOT)))?;
		}

		settings.encoding.encode_document(w.into_inner())
	}

	fn read_frames(&self, bytes: &[u8], settings: &Settings) -> Result<Vec<RootFrame>> {
		let doc = settings.encoding.decode_document(bytes)?;
		let mut reader = Reader::from_str(&doc);
		let mut roots = None;
		loop {
			match reader.read_event()? {
				Event::Start(e) if e.name().as_ref() == ROOT.as_bytes() && roots.is_none() => {
					roots = Some(read_roots(&mut reader)?);
				}
				Event::Empty(e) if e.name().as_ref() == ROOT.as_bytes() && roots.is_none() => {
					roots = Some(Vec::new());
				}
				Event::Text(t) if is_blank(&t.unescape().map_err(quick_xml::Error::from)?) => {}
				Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
				Event::Eof => break,
				_ => return Err(malformed(&reader, "content outside the single <root> element")),
			}
		}
		roots.ok_or_else(|| malformed(&reader, "missing <root> element"))
	}
}

type XmlWriter = Writer<Vec<u8>>;

fn write_object(w: &mut XmlWriter, frame: &Frame, name: Option<&str>) -> Result<()> {
	let mut start = BytesStart::new(OBJECT);
	if let Some(tag) = frame.type_tag.as_deref() {
		start.push_attribute(("type", tag));
	}
	if let Some(name) = name {
		start.push_attribute(("name", name));
	}

	if frame.entries.is_empty() {
		w.write_event(Event::Empty(start))?;
		return Ok(());
	}
	w.write_event(Event::Start(start))?;
	write_entries(w, frame)?;
	w.write_event(Event::End(BytesEnd::new(OBJECT)))?;
	Ok(())
}

fn write_entries(w: &mut XmlWriter, frame: &Frame) -> Result<()> {
	for entry in &frame.entries {
		match frame.kind {
			FrameKind::Object => write_property(w, entry)?,
			FrameKind::List => write_item(w, entry)?,
		}
	}
	Ok(())
}

fn write_property(w: &mut XmlWriter, entry: &Entry) -> Result<()> {
	let start = BytesStart::new(PROPERTY).with_attributes([("name", &*entry.key)]);
	match &entry.node {
		Node::Text(text) if text.is_empty() => w.write_event(Event::Empty(start))?,
		Node::Text(text) => {
			w.write_event(Event::Start(start))?;
			w.write_event(Event::Text(BytesText::new(text)))?;
			w.write_event(Event::End(BytesEnd::new(PROPERTY)))?;
		}
		Node::Frame(child) => {
			w.write_event(Event::Start(start))?;
			write_object(w, child, None)?;
			w.write_event(Event::End(BytesEnd::new(PROPERTY)))?;
		}
	}
	Ok(())
}

fn write_item(w: &mut XmlWriter, entry: &Entry) -> Result<()> {
	let start = BytesStart::new(ITEM).with_attributes([("type", &*entry.key)]);
	match &entry.node {
		Node::Text(text) if text.is_empty() => w.write_event(Event::Empty(start))?,
		Node::Frame(child) if child.entries.is_empty() => w.write_event(Event::Empty(start))?,
		Node::Text(text) => {
			w.write_event(Event::Start(start))?;
			w.write_event(Event::Text(BytesText::new(text)))?;
			w.write_event(Event::End(BytesEnd::new(ITEM)))?;
		}
		Node::Frame(child) => {
			w.write_event(Event::Start(start))?;
			write_entries(w, child)?;
			w.write_event(Event::End(BytesEnd::new(ITEM)))?;
		}
	}
	Ok(())
}

fn read_roots(reader: &mut Reader<&[u8]>) -> Result<Vec<RootFrame>> {
	let mut roots = Vec::new();
	loop {
		let (e, has_body) = match reader.read_event()? {
			Event::Start(e) => (e, true),
			Event::Empty(e) => (e, false),
			Event::End(_) => return Ok(roots),
			Event::Text(t) if is_blank(&t.unescape().map_err(quick_xml::Error::from)?) => continue,
			Event::Comment(_) | Event::PI(_) => continue,
			Event::Eof => return Err(malformed(reader, "unclosed <root> element")),
			_ => return Err(malformed(reader, "unexpected content in <root>")),
		};
		if e.name().as_ref() != OBJECT.as_bytes() {
			return Err(malformed(reader, "<root> may only contain <object> elements"));
		}

		let tag = required_attr(reader, &e, "type")?;
		let name = required_attr(reader, &e, "name")?;
		let mut frame = Frame::new(Some(tag.as_str()), FrameKind::Object);
		if has_body {
			read_entries(reader, &mut frame, 0, None)?;
		}
		roots.push(RootFrame { name: name.into(), frame });
	}
}

/// Read `<property>`/`<item>` children into `frame` until its closing tag.
///
/// `pending` is an already-read first child event.
fn read_entries<'i>(reader: &mut Reader<&'i [u8]>, frame: &mut Frame, depth: u32, mut pending: Option<Event<'i>>) -> Result<()> {
	let mut seen: Option<FrameKind> = None;
	loop {
		let event = match pending.take() {
			Some(event) => event,
			None => reader.read_event()?,
		};
		let (e, has_body) = match event {
			Event::Start(e) => (e, true),
			Event::Empty(e) => (e, false),
			Event::End(_) => {
				frame.kind = seen.unwrap_or(FrameKind::Object);
				return Ok(());
			}
			Event::Text(t) if is_blank(&t.unescape().map_err(quick_xml::Error::from)?) => continue,
			Event::Comment(_) | Event::PI(_) => continue,
			Event::Eof => return Err(malformed(reader, "unclosed element")),
			_ => return Err(malformed(reader, "unexpected text between members")),
		};

		let (kind, entry) = if e.name().as_ref() == PROPERTY.as_bytes() {
			let key = required_attr(reader, &e, "name")?;
			let node = if has_body { read_property(reader, depth)? } else { Node::Text("".into()) };
			(FrameKind::Object, Entry { key: key.into(), node })
		} else if e.name().as_ref() == ITEM.as_bytes() {
			let key = required_attr(reader, &e, "type")?;
			let node = if has_body {
				read_item(reader, &key, depth)?
			} else {
				empty_item(&key)
			};
			(FrameKind::List, Entry { key: key.into(), node })
		} else {
			return Err(malformed(reader, "expected <property> or <item>"));
		};

		if seen.is_some_and(|prev| prev != kind) {
			return Err(malformed(reader, "an element mixes <property> and <item> children"));
		}
		seen = Some(kind);
		frame.entries.push(entry);
	}
}

/// Content of `<property>`: text, or exactly one nested `<object>`.
fn read_property(reader: &mut Reader<&[u8]>, depth: u32) -> Result<Node> {
	let mut text = String::new();
	let mut child: Option<Frame> = None;
	loop {
		match reader.read_event()? {
			Event::Text(t) => text.push_str(&t.unescape().map_err(quick_xml::Error::from)?),
			Event::CData(c) => text.push_str(cdata_text(reader, &c)?),
			Event::Start(e) => {
				let mut frame = nested_object(reader, &e, depth, child.is_some())?;
				read_entries(reader, &mut frame, depth + 1, None)?;
				child = Some(frame);
			}
			Event::Empty(e) => child = Some(nested_object(reader, &e, depth, child.is_some())?),
			Event::End(_) => break,
			Event::Comment(_) | Event::PI(_) => {}
			Event::Eof => return Err(malformed(reader, "unclosed <property>")),
			_ => return Err(malformed(reader, "unexpected content in <property>")),
		}
	}

	match child {
		Some(_) if !is_blank(&text) => Err(malformed(reader, "<property> mixes text and <object>")),
		Some(frame) => Ok(Node::Frame(frame)),
		None => Ok(Node::Text(text.into_boxed_str())),
	}
}

/// Content of `<item>`: text, or members and elements written directly inside.
fn read_item(reader: &mut Reader<&[u8]>, tag: &str, depth: u32) -> Result<Node> {
	let mut text = String::new();
	loop {
		match reader.read_event()? {
			Event::Text(t) => text.push_str(&t.unescape().map_err(quick_xml::Error::from)?),
			Event::CData(c) => text.push_str(cdata_text(reader, &c)?),
			event @ (Event::Start(_) | Event::Empty(_)) => {
				if !is_blank(&text) {
					return Err(malformed(reader, "<item> mixes text and child elements"));
				}
				check_depth(depth + 1)?;
				let mut frame = Frame::new(Some(tag), FrameKind::Object);
				read_entries(reader, &mut frame, depth + 1, Some(event))?;
				return Ok(Node::Frame(frame));
			}
			Event::End(_) if ScalarKind::from_tag(tag).is_none() && is_blank(&text) => return Ok(empty_item(tag)),
			Event::End(_) => return Ok(Node::Text(text.into_boxed_str())),
			Event::Comment(_) | Event::PI(_) => {}
			Event::Eof => return Err(malformed(reader, "unclosed <item>")),
			_ => return Err(malformed(reader, "unexpected content in <item>")),
		}
	}
}

/// `<item type/>` is empty text for scalar tags and an empty frame otherwise.
fn empty_item(tag: &str) -> Node {
	if ScalarKind::from_tag(tag).is_some() {
		Node::Text("".into())
	} else {
		Node::Frame(Frame::new(Some(tag), FrameKind::Object))
	}
}

fn nested_object(reader: &Reader<&[u8]>, e: &BytesStart<'_>, depth: u32, already: bool) -> Result<Frame> {
	if already || e.name().as_ref() != OBJECT.as_bytes() {
		return Err(malformed(reader, "<property> may hold text or one <object>"));
	}
	check_depth(depth + 1)?;
	let tag = attr(e, "type")?;
	Ok(Frame::new(tag.as_deref(), FrameKind::Object))
}

fn check_depth(depth: u32) -> Result<()> {
	if depth > MAX_DEPTH {
		return Err(SaveError::DecodeDepthExceeded { max_depth: MAX_DEPTH });
	}
	Ok(())
}

fn attr(e: &BytesStart<'_>, key: &str) -> Result<Option<String>> {
	for attr in e.attributes() {
		let attr = attr.map_err(quick_xml::Error::from)?;
		if attr.key.as_ref() == key.as_bytes() {
			let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
			return Ok(Some(value.into_owned()));
		}
	}
	Ok(None)
}

fn required_attr(reader: &Reader<&[u8]>, e: &BytesStart<'_>, key: &str) -> Result<String> {
	attr(e, key)?.ok_or_else(|| {
		let element = String::from_utf8_lossy(e.name().as_ref()).into_owned();
		malformed(reader, &format!("<{element}> lacks a {key:?} attribute"))
	})
}

fn cdata_text<'c>(reader: &Reader<&[u8]>, c: &'c [u8]) -> Result<&'c str> {
	std::str::from_utf8(c).map_err(|_| malformed(reader, "CDATA is not valid utf-8"))
}

fn is_blank(text: &str) -> bool {
	text.chars().all(|ch| matches!(ch, ' ' | '\t' | '\n' | '\r'))
}

fn malformed(reader: &Reader<&[u8]>, reason: &str) -> SaveError {
	SaveError::MalformedDocument {
		format: FORMAT,
		reason: format!("{reason} (near byte {})", reader.buffer_position()),
	}
}

#[cfg(test)]
mod tests;
