use savekit::save::{Entry, Frame, FrameKind, RootFrame};

use super::{PrintOptions, render_root, truncate};

fn sample_root() -> RootFrame {
	let mut inner = Frame::new(Some("app::Inner"), FrameKind::Object);
	inner.entries.push(Entry::text("z", "2"));
	let mut list = Frame::new(Some("alloc::vec::Vec<i32>"), FrameKind::List);
	for text in ["1", "2", "3"] {
		list.entries.push(Entry::text("i32", text));
	}
	let mut outer = Frame::new(Some("app::Outer"), FrameKind::Object);
	outer.entries.push(Entry::text("x", "1"));
	outer.entries.push(Entry::frame("y", inner));
	outer.entries.push(Entry::frame("items", list));
	outer.entries.push(Entry::frame("empty", Frame::new(None, FrameKind::Object)));
	RootFrame {
		name: "slot".into(),
		frame: outer,
	}
}

#[test]
fn renders_nested_frames_with_indentation() {
	let lines = render_root(&sample_root(), PrintOptions::default());
	assert_eq!(
		lines,
		vec![
			"slot: app::Outer {",
			"  x = \"1\"",
			"  y = app::Inner {",
			"    z = \"2\"",
			"  }",
			"  items = alloc::vec::Vec<i32> [",
			"    i32 = \"1\"",
			"    i32 = \"2\"",
			"    i32 = \"3\"",
			"  ]",
			"  empty = ? {}",
			"}",
		]
	);
}

#[test]
fn truncation_limits_apply() {
	let options = PrintOptions {
		max_entries_per_frame: 2,
		max_text_len: 10,
		max_print_depth: 1,
	};
	let lines = render_root(&sample_root(), options);
	assert_eq!(lines[2], "  y = app::Inner { ... 1 entries }");
	assert_eq!(lines[3], "  ... 2 more");
	assert_eq!(truncate("abcdefghijklmnop", 4), "abcd...");
	assert_eq!(truncate("abc", 4), "abc");
}
