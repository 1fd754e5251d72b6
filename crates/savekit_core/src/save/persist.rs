use std::any::{Any, type_name};
use std::borrow::Cow;
use std::rc::Rc;

use crate::save::traverse::{self, TraverseOptions};
use crate::save::{Decimal, Member, Node, Result, ScalarKind, ScalarValue};

/// Persistence classification of a type, fixed per type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
	/// Single text token.
	Scalar(ScalarKind),
	/// Homogeneous ordered sequence.
	List,
	/// Composite with named members.
	Object,
}

impl Class {
	/// Short label for diagnostics.
	pub fn label(self) -> &'static str {
		match self {
			Self::Scalar(_) => "scalar",
			Self::List => "list",
			Self::Object => "object",
		}
	}
}

/// Capability of a type that can be saved and restored.
///
/// Object types implement [`Persist::members`] and keep the default remaining
/// methods. Scalars and `Vec<T>` are implemented by this crate.
///
/// ```
/// use savekit::save::{Member, Persist};
///
/// #[derive(Default)]
/// struct Score {
/// 	points: i32,
/// 	holder: String,
/// }
///
/// impl Persist for Score {
/// 	fn members() -> Vec<Member<Self>> {
/// 		vec![
/// 			Member::property("points", |s: &Self| &s.points, |s: &mut Self| &mut s.points),
/// 			Member::property("holder", |s: &Self| &s.holder, |s: &mut Self| &mut s.holder).rename("by"),
/// 		]
/// 	}
/// }
/// ```
pub trait Persist: Any + Default {
	/// Tag written into save files and looked up in the registry.
	fn type_tag() -> Cow<'static, str> {
		Cow::Borrowed(type_name::<Self>())
	}

	/// Scalar, list, or object.
	fn class() -> Class {
		Class::Object
	}

	/// Member descriptors in declaration order.
	fn members() -> Vec<Member<Self>> {
		Vec::new()
	}

	/// Encode `self` visited at `depth`.
	fn lower(&self, opt: &TraverseOptions, depth: u32) -> Node {
		traverse::lower_object(self, opt, depth)
	}

	/// Populate `self` from `node` visited at `depth`.
	fn raise(&mut self, node: &Node, opt: &TraverseOptions, depth: u32) -> Result<()> {
		traverse::raise_object(self, node, opt, depth)
	}
}

/// Object-safe view of a [`Persist`] value.
pub trait Persistable: Any {
	/// Type tag of the concrete type.
	fn tag(&self) -> Cow<'static, str>;

	/// Classification of the concrete type.
	fn kind(&self) -> Class;

	/// Dynamic [`Persist::lower`].
	fn lower_node(&self, opt: &TraverseOptions, depth: u32) -> Node;

	/// Dynamic [`Persist::raise`].
	fn raise_node(&mut self, node: &Node, opt: &TraverseOptions, depth: u32) -> Result<()>;

	/// Borrow as [`Any`] for downcasting.
	fn as_any(&self) -> &dyn Any;

	/// Convert a shared handle into an [`Any`] handle for downcasting.
	fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any>;
}

impl<T: Persist> Persistable for T {
	fn tag(&self) -> Cow<'static, str> {
		T::type_tag()
	}

	fn kind(&self) -> Class {
		T::class()
	}

	fn lower_node(&self, opt: &TraverseOptions, depth: u32) -> Node {
		self.lower(opt, depth)
	}

	fn raise_node(&mut self, node: &Node, opt: &TraverseOptions, depth: u32) -> Result<()> {
		self.raise(node, opt, depth)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any> {
		self
	}
}

macro_rules! scalar_persist {
	($($ty:ty),* $(,)?) => {
		$(
			impl Persist for $ty {
				fn type_tag() -> Cow<'static, str> {
					Cow::Borrowed(<$ty as ScalarValue>::KIND.tag())
				}

				fn class() -> Class {
					Class::Scalar(<$ty as ScalarValue>::KIND)
				}

				fn lower(&self, _opt: &TraverseOptions, _depth: u32) -> Node {
					Node::Text(self.to_text().into_boxed_str())
				}

				fn raise(&mut self, node: &Node, _opt: &TraverseOptions, _depth: u32) -> Result<()> {
					*self = <$ty as ScalarValue>::parse_text(traverse::expect_text::<$ty>(node)?)?;
					Ok(())
				}
			}
		)*
	};
}

scalar_persist!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, Decimal, String);

impl<T: Persist> Persist for Vec<T> {
	fn type_tag() -> Cow<'static, str> {
		Cow::Owned(format!("alloc::vec::Vec<{}>", T::type_tag()))
	}

	fn class() -> Class {
		Class::List
	}

	fn lower(&self, opt: &TraverseOptions, depth: u32) -> Node {
		traverse::lower_list(self, opt, depth)
	}

	fn raise(&mut self, node: &Node, opt: &TraverseOptions, depth: u32) -> Result<()> {
		traverse::raise_list(self, node, opt, depth)
	}
}
