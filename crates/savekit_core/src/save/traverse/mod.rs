use crate::save::{
	Class, Depth, Entry, Frame, FrameKind, MAX_DEPTH, MemberPolicy, Node, Persist, Persistable, Registry, Result, RootFrame, SCALAR_VALUE_KEY, SaveError,
	SaveField, Settings,
};

/// Depth bound and member policy shared by every codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraverseOptions {
	/// Nested descent bound.
	pub depth: Depth,
	/// Member discovery switches.
	pub members: MemberPolicy,
}

impl TraverseOptions {
	/// Options derived from per-file settings.
	pub fn from_settings(settings: &Settings) -> Self {
		Self {
			depth: settings.depth,
			members: MemberPolicy {
				include_inherited: settings.include_inherited,
				include_fields: settings.include_fields,
			},
		}
	}
}

/// Encode one save field at depth 0.
pub fn lower_root(field: &SaveField, opt: &TraverseOptions) -> RootFrame {
	let value = field.value();
	let frame = match value.lower_node(opt, 0) {
		Node::Frame(frame) => frame,
		Node::Text(text) => Frame {
			type_tag: Some(value.tag().into()),
			kind: FrameKind::Object,
			entries: vec![Entry {
				key: SCALAR_VALUE_KEY.into(),
				node: Node::Text(text),
			}],
		},
	};

	RootFrame {
		name: field.name().into(),
		frame,
	}
}

/// Rebuild one save field from its encoded frame.
pub fn raise_root(root: RootFrame, registry: &Registry, opt: &TraverseOptions) -> Result<SaveField> {
	let RootFrame { name, frame } = root;
	let Some(tag) = frame.type_tag.clone() else {
		return Err(SaveError::MalformedDocument {
			format: "save",
			reason: format!("save field {name:?} has no type tag"),
		});
	};

	let mut value = registry.instantiate(&tag)?;
	if let Class::Scalar(_) = value.kind() {
		let entry = frame.entry(SCALAR_VALUE_KEY).ok_or_else(|| SaveError::MissingMember {
			type_name: tag.to_string(),
			member: SCALAR_VALUE_KEY.to_owned(),
		})?;
		value.raise_node(&entry.node, opt, 0)?;
	} else {
		value.raise_node(&Node::Frame(frame), opt, 0)?;
	}

	Ok(SaveField::from_box(name.into_string(), value))
}

/// Visit a member or element; `None` when the governor omits it.
fn lower_child(child: &dyn Persistable, key: &str, opt: &TraverseOptions, depth: u32) -> Option<Node> {
	if let Class::Scalar(_) = child.kind() {
		return Some(child.lower_node(opt, depth));
	}

	let next = depth + 1;
	if !opt.depth.allows(next) {
		log::trace!("depth governor omitted {key} at depth {next}");
		return None;
	}
	Some(child.lower_node(opt, next))
}

/// Default [`Persist::lower`] for object types.
pub fn lower_object<T: Persist>(value: &T, opt: &TraverseOptions, depth: u32) -> Node {
	let members = T::members();
	let mut frame = Frame::new(Some(&*T::type_tag()), FrameKind::Object);
	for member in opt.members.eligible(&members) {
		let key = member.info().serialized_name();
		if let Some(node) = lower_child(member.get(value), key, opt, depth) {
			frame.entries.push(Entry { key: key.into(), node });
		}
	}
	Node::Frame(frame)
}

/// [`Persist::lower`] for `Vec<T>`.
pub fn lower_list<T: Persist>(items: &[T], opt: &TraverseOptions, depth: u32) -> Node {
	let element_tag = T::type_tag();
	let mut frame = Frame::new(Some(&*Vec::<T>::type_tag()), FrameKind::List);
	for item in items {
		if let Some(node) = lower_child(item, &element_tag, opt, depth) {
			frame.entries.push(Entry {
				key: (&*element_tag).into(),
				node,
			});
		}
	}
	Node::Frame(frame)
}

/// Default [`Persist::raise`] for object types.
pub fn raise_object<T: Persist>(value: &mut T, node: &Node, opt: &TraverseOptions, depth: u32) -> Result<()> {
	let frame = expect_frame::<T>(node, depth)?;
	let members = T::members();
	let tag = T::type_tag();
	for entry in &frame.entries {
		let member = opt.members.resolve(&members, &tag, &entry.key)?;
		member.get_mut(value).raise_node(&entry.node, opt, depth + 1)?;
	}
	Ok(())
}

/// [`Persist::raise`] for `Vec<T>`: replaces the contents with decoded elements.
pub fn raise_list<T: Persist>(items: &mut Vec<T>, node: &Node, opt: &TraverseOptions, depth: u32) -> Result<()> {
	let frame = expect_frame::<Vec<T>>(node, depth)?;
	let element_tag = T::type_tag();
	items.clear();
	items.reserve(frame.entries.len());
	for entry in &frame.entries {
		if *entry.key != *element_tag {
			return Err(SaveError::TypeMismatch {
				expected: element_tag.into_owned(),
				got: entry.key.to_string(),
			});
		}
		let mut item = T::default();
		item.raise(&entry.node, opt, depth + 1)?;
		items.push(item);
	}
	Ok(())
}

/// Borrow scalar text or report a shape mismatch for `T`.
pub fn expect_text<T: Persist>(node: &Node) -> Result<&str> {
	match node {
		Node::Text(text) => Ok(&**text),
		Node::Frame(_) => Err(SaveError::TypeMismatch {
			expected: format!("{} as scalar text", T::type_tag()),
			got: node.shape_label().to_owned(),
		}),
	}
}

fn expect_frame<T: Persist>(node: &Node, depth: u32) -> Result<&Frame> {
	if depth > MAX_DEPTH {
		return Err(SaveError::DecodeDepthExceeded { max_depth: MAX_DEPTH });
	}

	let Node::Frame(frame) = node else {
		return Err(SaveError::TypeMismatch {
			expected: format!("{} as {}", T::type_tag(), T::class().label()),
			got: node.shape_label().to_owned(),
		});
	};

	if let Some(tag) = frame.type_tag.as_deref() {
		let expected = T::type_tag();
		if tag != expected {
			return Err(SaveError::TypeMismatch {
				expected: expected.into_owned(),
				got: tag.to_owned(),
			});
		}
	}
	Ok(frame)
}
