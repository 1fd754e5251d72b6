use std::path::PathBuf;

use savekit::save::{Frame, FrameKind, Node, Result, RootFrame, SaveError};

use crate::cmd::print::{PrintOptions, render_root};
use crate::cmd::util::{emit_json, load_settings, load_tree, path_label};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long)]
	pub field: Option<String>,
	#[arg(long)]
	pub settings: Option<PathBuf>,
	#[arg(long)]
	pub json: bool,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long = "max-entries")]
	pub max_entries: Option<usize>,
	#[arg(long = "max-text")]
	pub max_text: Option<usize>,
}

/// Print the frame tree of every field, or of `--field`.
pub fn run(args: Args) -> Result<()> {
	let Args {
		file: path,
		field,
		settings,
		json,
		max_depth,
		max_entries,
		max_text,
	} = args;

	let settings = load_settings(settings.as_deref())?;
	let tree = load_tree(&path, &settings)?;

	let mut print = PrintOptions::default();
	if let Some(max_depth) = max_depth {
		print.max_print_depth = max_depth;
	}
	if let Some(max_entries) = max_entries {
		print.max_entries_per_frame = max_entries;
	}
	if let Some(max_text) = max_text {
		print.max_text_len = max_text;
	}

	let roots: Vec<&RootFrame> = match &field {
		Some(name) => {
			let found: Vec<&RootFrame> = tree.roots.iter().filter(|root| &*root.name == name.as_str()).collect();
			if found.is_empty() {
				return Err(SaveError::FieldNotFound { name: name.clone() });
			}
			found
		}
		None => tree.roots.iter().collect(),
	};

	if json {
		return emit_json(&ShowJson {
			path: path_label(&path),
			format: tree.format.label(),
			fields: roots
				.iter()
				.map(|root| FieldJson {
					name: root.name.to_string(),
					value: frame_json(&root.frame, 0, print),
				})
				.collect(),
		});
	}

	for root in roots {
		for line in render_root(root, print) {
			println!("{line}");
		}
	}
	Ok(())
}

fn frame_json(frame: &Frame, depth: u32, options: PrintOptions) -> FrameJson {
	let truncated = depth >= options.max_print_depth && !frame.entries.is_empty();
	let entries = if truncated {
		Vec::new()
	} else {
		frame
			.entries
			.iter()
			.take(options.max_entries_per_frame)
			.map(|entry| EntryJson {
				key: entry.key.to_string(),
				value: match &entry.node {
					Node::Text(text) => NodeJson::Text(text.to_string()),
					Node::Frame(child) => NodeJson::Frame(frame_json(child, depth + 1, options)),
				},
			})
			.collect()
	};

	FrameJson {
		type_tag: frame.type_tag.as_deref().map(str::to_owned),
		kind: match frame.kind {
			FrameKind::Object => "object",
			FrameKind::List => "list",
		},
		entry_count: frame.entries.len(),
		truncated: truncated || frame.entries.len() > options.max_entries_per_frame,
		entries,
	}
}

#[derive(serde::Serialize)]
struct ShowJson {
	path: String,
	format: &'static str,
	fields: Vec<FieldJson>,
}

#[derive(serde::Serialize)]
struct FieldJson {
	name: String,
	value: FrameJson,
}

#[derive(serde::Serialize)]
struct FrameJson {
	#[serde(rename = "type")]
	type_tag: Option<String>,
	kind: &'static str,
	entry_count: usize,
	truncated: bool,
	entries: Vec<EntryJson>,
}

#[derive(serde::Serialize)]
struct EntryJson {
	key: String,
	value: NodeJson,
}

#[derive(serde::Serialize)]
#[serde(untagged)]
enum NodeJson {
	Text(String),
	Frame(FrameJson),
}
