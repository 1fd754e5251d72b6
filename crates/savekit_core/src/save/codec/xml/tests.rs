use super::XmlCodec;
use crate::save::codec::Codec;
use crate::save::{Entry, Frame, FrameKind, MAX_DEPTH, Node, RootFrame, SaveError, Settings, TextEncoding};

fn score_root() -> RootFrame {
	let mut frame = Frame::new(Some("i32"), FrameKind::Object);
	frame.entries.push(Entry::text("value", "42"));
	RootFrame {
		name: "score".into(),
		frame,
	}
}

fn party_root() -> RootFrame {
	let mut stats = Frame::new(Some("app::Stats"), FrameKind::Object);
	stats.entries.push(Entry::text("hp", "10"));
	stats.entries.push(Entry::text("motto", " <brave> & \"bold\" "));

	let mut names = Frame::new(Some("alloc::vec::Vec<alloc::string::String>"), FrameKind::List);
	names.entries.push(Entry::text("alloc::string::String", "ann"));
	names.entries.push(Entry::text("alloc::string::String", "bo"));

	let mut member = Frame::new(Some("app::Member"), FrameKind::Object);
	member.entries.push(Entry::text("level", "3"));
	member.entries.push(Entry::frame("stats", stats));

	let mut members = Frame::new(Some("alloc::vec::Vec<app::Member>"), FrameKind::List);
	members.entries.push(Entry::frame("app::Member", member));

	let mut party = Frame::new(Some("app::Party"), FrameKind::Object);
	party.entries.push(Entry::frame("names", names));
	party.entries.push(Entry::frame("members", members));
	RootFrame {
		name: "party".into(),
		frame: party,
	}
}

#[test]
fn compact_layout_matches_documented_elements() {
	let bytes = XmlCodec.write_frames(&[score_root()], &Settings::compact()).expect("encode");
	let doc = String::from_utf8(bytes).expect("utf-8 output");
	assert_eq!(
		doc,
		r#"<?xml version="1.0" encoding="utf-8"?><root><object type="i32" name="score"><property name="value">42</property></object></root>"#
	);
}

#[test]
fn list_items_hold_members_directly() {
	let bytes = XmlCodec.write_frames(&[party_root()], &Settings::compact()).expect("encode");
	let doc = String::from_utf8(bytes).expect("utf-8 output");
	assert!(doc.contains(r#"<property name="names"><object type="alloc::vec::Vec&lt;alloc::string::String&gt;"><item type="alloc::string::String">ann</item>"#), "{doc}");
	assert!(doc.contains(r#"<item type="app::Member"><property name="level">3</property><property name="stats"><object type="app::Stats">"#), "{doc}");
}

#[test]
fn indented_utf16_document_round_trips() {
	let settings = Settings {
		encoding: TextEncoding::Utf16Le,
		..Settings::default()
	};
	let roots = vec![score_root(), party_root()];
	let bytes = XmlCodec.write_frames(&roots, &settings).expect("encode");
	let doc = TextEncoding::Utf16Le.decode(&bytes).expect("utf-16 output");
	assert!(doc.starts_with(r#"<?xml version="1.0" encoding="utf-16le"?>"#));
	assert!(doc.contains("\n  <object"), "{doc}");

	let decoded = XmlCodec.read_frames(&bytes, &settings).expect("decode");
	assert_eq!(decoded, roots);
}

#[test]
fn empty_values_use_empty_elements() {
	let mut names = Frame::new(Some("alloc::vec::Vec<alloc::string::String>"), FrameKind::List);
	names.entries.push(Entry::text("alloc::string::String", ""));
	let mut blanks = Frame::new(Some("alloc::vec::Vec<app::Blank>"), FrameKind::List);
	blanks.entries.push(Entry::frame("app::Blank", Frame::new(Some("app::Blank"), FrameKind::Object)));
	let mut holder = Frame::new(Some("app::Holder"), FrameKind::Object);
	holder.entries.push(Entry::text("label", ""));
	holder.entries.push(Entry::frame("names", names));
	holder.entries.push(Entry::frame("blanks", blanks));
	let root = RootFrame {
		name: "holder".into(),
		frame: holder,
	};

	let bytes = XmlCodec.write_frames(std::slice::from_ref(&root), &Settings::compact()).expect("encode");
	let doc = String::from_utf8(bytes.clone()).expect("utf-8 output");
	assert!(doc.contains(r#"<property name="label"/>"#), "{doc}");
	assert!(doc.contains(r#"<item type="alloc::string::String"/>"#), "{doc}");
	assert!(doc.contains(r#"<item type="app::Blank"/>"#), "{doc}");

	let decoded = XmlCodec.read_frames(&bytes, &Settings::compact()).expect("decode");
	assert_eq!(decoded, vec![root]);
}

#[test]
fn hand_written_document_with_comments_parses() {
	let doc = r#"<?xml version="1.0" encoding="utf-8"?>
<!-- slot 1 -->
<root>
	<object type="app::Outer" name="slot">
		<property name="x">1</property>
		<property name="y">
			<object type="app::Inner">
				<property name="z"><![CDATA[2]]></property>
			</object>
		</property>
	</object>
	<object type="alloc::vec::Vec&lt;i32&gt;" name="empty"/>
</root>
"#;
	let decoded = XmlCodec.read_frames(doc.as_bytes(), &Settings::default()).expect("decode");
	assert_eq!(decoded.len(), 2);
	assert_eq!(decoded[1].frame.type_tag.as_deref(), Some("alloc::vec::Vec<i32>"));
	assert!(decoded[1].frame.entries.is_empty());

	let outer = &decoded[0].frame;
	assert_eq!(outer.entry("x").map(|entry| &entry.node), Some(&Node::Text("1".into())));
	let Some(Node::Frame(inner)) = outer.entry("y").map(|entry| &entry.node) else {
		panic!("y should be a nested frame");
	};
	assert_eq!(inner.type_tag.as_deref(), Some("app::Inner"));
	assert_eq!(inner.entries, vec![Entry::text("z", "2")]);
}

#[test]
fn structural_errors_are_reported() {
	let settings = Settings::default();
	let cases = [
		"<object type=\"i32\" name=\"a\"/>",
		"<root><object name=\"a\"/></root>",
		"<root><object type=\"i32\" name=\"a\"><property>1</property></object></root>",
		"<root><object type=\"app::T\" name=\"a\"><property name=\"p\">1</property><item type=\"i32\">1</item></object></root>",
		"<root><object type=\"app::T\" name=\"a\"><property name=\"p\">1<object type=\"app::U\"/></property></object></root>",
		"<root></root><root></root>",
		"",
	];
	for doc in cases {
		let err = XmlCodec.read_frames(doc.as_bytes(), &settings).expect_err(doc);
		assert!(matches!(err, SaveError::MalformedDocument { format: "xml", .. }), "{doc}: {err}");
	}

	let err = XmlCodec.read_frames(b"<root><object type=\"i32\" name=\"a\">", &settings).expect_err("unclosed");
	assert!(matches!(err, SaveError::MalformedDocument { .. } | SaveError::Xml(_)), "{err}");
}

#[test]
fn nesting_beyond_ceiling_is_rejected() {
	let mut doc = String::from(r#"<root><object type="app::Deep" name="deep">"#);
	for _ in 0..=MAX_DEPTH {
		doc.push_str(r#"<property name="next"><object type="app::Deep">"#);
	}
	for _ in 0..=MAX_DEPTH {
		doc.push_str("</object></property>");
	}
	doc.push_str("</object></root>");
	let err = XmlCodec.read_frames(doc.as_bytes(), &Settings::default()).expect_err("too deep");
	assert!(matches!(err, SaveError::DecodeDepthExceeded { max_depth: MAX_DEPTH }));
}
