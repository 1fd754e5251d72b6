use std::path::PathBuf;

use savekit::save::{FrameKind, Result};

use crate::cmd::util::{emit_json, load_settings, load_tree, path_label};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub settings: Option<PathBuf>,
	#[arg(long)]
	pub json: bool,
}

/// Print format and one summary line per save field.
pub fn run(args: Args) -> Result<()> {
	let Args { path, settings, json } = args;

	let settings = load_settings(settings.as_deref())?;
	let tree = load_tree(&path, &settings)?;

	let fields: Vec<FieldJson> = tree
		.roots
		.iter()
		.map(|root| FieldJson {
			name: root.name.to_string(),
			type_tag: root.frame.type_tag.as_deref().unwrap_or("-").to_owned(),
			kind: kind_label(root.frame.kind),
			entries: root.frame.entries.len(),
		})
		.collect();

	if json {
		return emit_json(&InfoJson {
			path: path_label(&path),
			format: tree.format.label(),
			encoding: settings.encoding.label(),
			bytes: tree.byte_len,
			field_count: fields.len(),
			fields,
		});
	}

	println!("path: {}", path.display());
	println!("format: {}", tree.format.label());
	println!("encoding: {}", settings.encoding.label());
	println!("bytes: {}", tree.byte_len);
	println!("field_count: {}", fields.len());
	println!("fields:");
	for field in &fields {
		println!("  {}: {} ({}, {} entries)", field.name, field.type_tag, field.kind, field.entries);
	}

	Ok(())
}

fn kind_label(kind: FrameKind) -> &'static str {
	match kind {
		FrameKind::Object => "object",
		FrameKind::List => "list",
	}
}

#[derive(serde::Serialize)]
struct FieldJson {
	name: String,
	type_tag: String,
	kind: &'static str,
	entries: usize,
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	format: &'static str,
	encoding: &'static str,
	bytes: usize,
	field_count: usize,
	fields: Vec<FieldJson>,
}
