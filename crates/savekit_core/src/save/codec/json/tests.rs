use super::JsonCodec;
use crate::save::codec::Codec;
use crate::save::{Entry, Frame, FrameKind, MAX_DEPTH, Node, RootFrame, SaveError, Settings, TextEncoding};

fn root(name: &str, frame: Frame) -> RootFrame {
	RootFrame { name: name.into(), frame }
}

fn scalar(tag: &str, text: &str) -> Frame {
	let mut frame = Frame::new(Some(tag), FrameKind::Object);
	frame.entries.push(Entry::text("value", text));
	frame
}

fn roster() -> Frame {
	let mut hero = Frame::new(Some("app::Hero"), FrameKind::Object);
	hero.entries.push(Entry::text("name", "ann"));
	hero.entries.push(Entry::text("type", "knight"));
	let mut heroes = Frame::new(Some("alloc::vec::Vec<app::Hero>"), FrameKind::List);
	heroes.entries.push(Entry::frame("app::Hero", hero));

	let mut scores = Frame::new(Some("alloc::vec::Vec<i32>"), FrameKind::List);
	scores.entries.push(Entry::text("i32", "1"));
	scores.entries.push(Entry::text("i32", "2"));

	let mut roster = Frame::new(Some("app::Roster"), FrameKind::Object);
	roster.entries.push(Entry::frame("heroes", heroes));
	roster.entries.push(Entry::frame("scores", scores));
	roster
}

#[test]
fn compact_layout_uses_string_values_and_item_keys() {
	let bytes = JsonCodec.write_frames(&[root("score", scalar("i32", "42")), root("roster", roster())], &Settings::compact()).expect("encode");
	let doc = String::from_utf8(bytes).expect("utf-8 output");
	assert_eq!(
		doc,
		concat!(
			r#"{"score":{"type":"i32","value":"42"},"#,
			r#""roster":{"type":"app::Roster","heroes":{"type":"alloc::vec::Vec<app::Hero>","item 0":{"type":"app::Hero","name":"ann","type":"knight"}},"#,
			r#""scores":{"type":"alloc::vec::Vec<i32>","item 0 i32":"1","item 1 i32":"2"}}}"#
		)
	);
}

#[test]
fn round_trip_keeps_order_and_kinds() {
	let roots = vec![root("score", scalar("i32", "42")), root("roster", roster())];
	for settings in [Settings::default(), Settings::compact(), Settings { encoding: TextEncoding::Utf16Be, ..Settings::default() }] {
		let bytes = JsonCodec.write_frames(&roots, &settings).expect("encode");
		assert_eq!(JsonCodec.read_frames(&bytes, &settings).expect("decode"), roots);
	}
}

#[test]
fn duplicate_field_names_survive() {
	let roots = vec![root("slot", scalar("i32", "1")), root("slot", scalar("i32", "2"))];
	let bytes = JsonCodec.write_frames(&roots, &Settings::compact()).expect("encode");
	let decoded = JsonCodec.read_frames(&bytes, &Settings::compact()).expect("decode");
	assert_eq!(decoded, roots);
}

#[test]
fn native_numbers_and_bools_are_stringified() {
	let doc = br#"{"cfg":{"type":"app::Cfg","volume":0.5,"lives":3,"debt":-2,"muted":true}}"#;
	let decoded = JsonCodec.read_frames(doc, &Settings::default()).expect("decode");
	let texts: Vec<(&str, &Node)> = decoded[0].frame.entries.iter().map(|entry| (&*entry.key, &entry.node)).collect();
	assert_eq!(
		texts,
		vec![
			("volume", &Node::Text("0.5".into())),
			("lives", &Node::Text("3".into())),
			("debt", &Node::Text("-2".into())),
			("muted", &Node::Text("true".into())),
		]
	);
}

#[test]
fn pretty_output_honours_indent_switch() {
	let roots = [root("score", scalar("i32", "42"))];
	let indented = String::from_utf8(JsonCodec.write_frames(&roots, &Settings::default()).expect("encode")).expect("utf-8");
	assert!(indented.contains("\n    \"type\": \"i32\""), "{indented}");

	let flat = Settings {
		indent: false,
		..Settings::default()
	};
	let unindented = String::from_utf8(JsonCodec.write_frames(&roots, &flat).expect("encode")).expect("utf-8");
	assert!(unindented.contains("\n\"type\": \"i32\""), "{unindented}");
}

#[test]
fn keys_out_of_sequence_make_an_object_frame() {
	let doc = br#"{"odd":{"type":"app::Odd","item 1 i32":"1"}}"#;
	let decoded = JsonCodec.read_frames(doc, &Settings::default()).expect("decode");
	assert_eq!(decoded[0].frame.kind, FrameKind::Object);
	assert_eq!(decoded[0].frame.entries, vec![Entry::text("item 1 i32", "1")]);
}

#[test]
fn layout_violations_are_reported() {
	let cases: [&[u8]; 3] = [br#"["a"]"#, br#"{"a":"1"}"#, br#"{"a":{"type":"alloc::vec::Vec<app::T>","item 0":{"x":"1"}}}"#];
	for doc in cases {
		let err = JsonCodec.read_frames(doc, &Settings::default()).expect_err("invalid layout");
		assert!(matches!(err, SaveError::MalformedDocument { format: "json", .. } | SaveError::Json(_)), "{err}");
	}

	let err = JsonCodec.read_frames(br#"{"a":{"type":"i32","value":null}}"#, &Settings::default()).expect_err("null value");
	assert!(matches!(err, SaveError::Json(_)));
}

#[test]
fn nesting_beyond_ceiling_is_rejected() {
	let mut doc = String::from(r#"{"deep":"#);
	for _ in 0..=MAX_DEPTH {
		doc.push_str(r#"{"type":"app::Deep","next":"#);
	}
	doc.push_str(r#"{"type":"app::Deep"}"#);
	for _ in 0..=MAX_DEPTH {
		doc.push('}');
	}
	doc.push('}');
	let err = JsonCodec.read_frames(doc.as_bytes(), &Settings::default()).expect_err("too deep");
	assert!(matches!(err, SaveError::DecodeDepthExceeded { max_depth: MAX_DEPTH }));
}
