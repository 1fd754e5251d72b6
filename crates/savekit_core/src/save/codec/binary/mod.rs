use crate::save::bytes::{Cursor, TokenWriter};
use crate::save::codec::Codec;
use crate::save::{Entry, Frame, FrameKind, MAX_DEPTH, Node, Result, RootFrame, SaveError, Settings, TextEncoding};

/// Token closing every frame.
pub const END_OBJECT: &str = "[end object]";

/// Length-prefixed token codec for `.bin` files.
///
/// Nested frames carry only their key; the declared member type drives
/// reconstruction, so decoded nested frames are untagged [`FrameKind::Object`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCodec;

impl Codec for BinaryCodec {
	fn write_frames(&self, roots: &[RootFrame], settings: &Settings) -> Result<Vec<u8>> {
		let mut out = TokenWriter::new(settings.encoding);
		for root in roots {
			let tag = root.frame.type_tag.as_deref().unwrap_or_default();
			out.write_token(&format!("[{tag} {}]", root.name));
			write_body(&mut out, &root.frame);
		}
		Ok(out.into_bytes())
	}

	fn read_frames(&self, bytes: &[u8], settings: &Settings) -> Result<Vec<RootFrame>> {
		let mut cur = Cursor::new(bytes);
		let mut roots = Vec::new();
		while cur.remaining() > 0 {
			roots.push(read_root(&mut cur, settings.encoding)?);
		}
		Ok(roots)
	}
}

fn write_body(out: &mut TokenWriter, frame: &Frame) {
	for entry in &frame.entries {
		match &entry.node {
			Node::Text(text) => {
				out.write_token(&format!("<<{}>>", entry.key));
				out.write_token(text);
			}
			Node::Frame(child) => {
				out.write_token(&format!("<[{}]>", entry.key));
				write_body(out, child);
			}
		}
	}
	out.write_token(END_OBJECT);
}

fn read_root(cur: &mut Cursor<'_>, encoding: TextEncoding) -> Result<RootFrame> {
	let at = cur.pos();
	let token = cur.read_token(encoding)?;
	let header = token
		.strip_prefix('[')
		.and_then(|rest| rest.strip_suffix(']'))
		.filter(|_| token != END_OBJECT)
		.ok_or_else(|| malformed(at, format!("expected save field header, found {token:?}")))?;
	let (tag, name) = split_header(header)
		.ok_or_else(|| malformed(at, format!("save field header {token:?} has no name")))?;
	if tag.is_empty() {
		return Err(malformed(at, format!("save field header {token:?} has no type tag")));
	}

	let mut frame = Frame::new(Some(tag), FrameKind::Object);
	frame.entries = read_body(cur, encoding, 0)?;
	Ok(RootFrame { name: name.into(), frame })
}

/// Split `tag name` at the first space outside `<...>`; generic tags may contain spaces.
fn split_header(header: &str) -> Option<(&str, &str)> {
	let mut nesting = 0_usize;
	for (at, ch) in header.char_indices() {
		match ch {
			'<' => nesting += 1,
			'>' => nesting = nesting.saturating_sub(1),
			' ' if nesting == 0 => return Some((&header[..at], &header[at + 1..])),
			_ => {}
		}
	}
	None
}

fn read_body(cur: &mut Cursor<'_>, encoding: TextEncoding, depth: u32) -> Result<Vec<Entry>> {
	let mut entries = Vec::new();
	loop {
		let at = cur.pos();
		let token = cur.read_token(encoding)?;
		if token == END_OBJECT {
			return Ok(entries);
		}

		if let Some(key) = token.strip_prefix("<<").and_then(|rest| rest.strip_suffix(">>")) {
			let value = cur.read_token(encoding)?;
			entries.push(Entry::text(key, value));
		} else if let Some(key) = token.strip_prefix("<[").and_then(|rest| rest.strip_suffix("]>")) {
			if depth + 1 > MAX_DEPTH {
				return Err(SaveError::DecodeDepthExceeded { max_depth: MAX_DEPTH });
			}
			let mut child = Frame::new(None, FrameKind::Object);
			child.entries = read_body(cur, encoding, depth + 1)?;
			entries.push(Entry::frame(key, child));
		} else {
			return Err(malformed(at, format!("unexpected token {token:?}")));
		}
	}
}

fn malformed(at: usize, reason: String) -> SaveError {
	SaveError::MalformedBinary { at, reason }
}
