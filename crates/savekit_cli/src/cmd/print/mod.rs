use savekit::save::{Frame, FrameKind, Node, RootFrame};

/// Output truncation limits for frame trees.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of entries printed for a single frame.
	pub max_entries_per_frame: usize,
	/// Maximum number of Unicode scalar values printed for scalar text.
	pub max_text_len: usize,
	/// Maximum nested frame depth printed.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_entries_per_frame: 80,
			max_text_len: 200,
			max_print_depth: 6,
		}
	}
}

/// Render one save field as indented lines.
pub fn render_root(root: &RootFrame, options: PrintOptions) -> Vec<String> {
	let mut lines = Vec::new();
	render_frame(&mut lines, &format!("{}: ", root.name), &root.frame, 0, 0, options);
	lines
}

fn render_frame(lines: &mut Vec<String>, prefix: &str, frame: &Frame, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	let tag = frame.type_tag.as_deref().unwrap_or("?");
	let (open, close) = match frame.kind {
		FrameKind::Object => ('{', '}'),
		FrameKind::List => ('[', ']'),
	};

	if frame.entries.is_empty() {
		lines.push(format!("{pad}{prefix}{tag} {open}{close}"));
		return;
	}
	if depth >= options.max_print_depth {
		lines.push(format!("{pad}{prefix}{tag} {open} ... {} entries {close}", frame.entries.len()));
		return;
	}

	lines.push(format!("{pad}{prefix}{tag} {open}"));
	for entry in frame.entries.iter().take(options.max_entries_per_frame) {
		match &entry.node {
			Node::Text(text) => lines.push(format!("{pad}  {} = {:?}", entry.key, truncate(text, options.max_text_len))),
			Node::Frame(child) => render_frame(lines, &format!("{} = ", entry.key), child, indent + 2, depth + 1, options),
		}
	}
	if frame.entries.len() > options.max_entries_per_frame {
		lines.push(format!("{pad}  ... {} more", frame.entries.len() - options.max_entries_per_frame));
	}
	lines.push(format!("{pad}{close}"));
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}

#[cfg(test)]
mod tests;
