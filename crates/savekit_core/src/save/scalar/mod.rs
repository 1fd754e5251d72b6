use std::fmt;

use crate::save::{Decimal, Result, SaveError};

/// Closed set of value kinds persisted as a single text token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
	/// `bool`
	Bool,
	/// `char`
	Char,
	/// `i8`
	I8,
	/// `i16`
	I16,
	/// `i32`
	I32,
	/// `i64`
	I64,
	/// `i128`
	I128,
	/// `isize`
	Isize,
	/// `u8`
	U8,
	/// `u16`
	U16,
	/// `u32`
	U32,
	/// `u64`
	U64,
	/// `u128`
	U128,
	/// `usize`
	Usize,
	/// `f32`
	F32,
	/// `f64`
	F64,
	/// Fixed-point [`Decimal`].
	Decimal,
	/// `String`
	String,
}

impl ScalarKind {
	/// Every scalar kind, in declaration order.
	pub const ALL: [ScalarKind; 18] = [
		Self::Bool,
		Self::Char,
		Self::I8,
		Self::I16,
		Self::I32,
		Self::I64,
		Self::I128,
		Self::Isize,
		Self::U8,
		Self::U16,
		Self::U32,
		Self::U64,
		Self::U128,
		Self::Usize,
		Self::F32,
		Self::F64,
		Self::Decimal,
		Self::String,
	];

	/// Type tag written for values of this kind.
	pub fn tag(self) -> &'static str {
		match self {
			Self::Decimal => "savekit::Decimal",
			Self::String => "alloc::string::String",
			other => other.as_str(),
		}
	}

	/// Reverse of [`ScalarKind::tag`].
	pub fn from_tag(tag: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.tag() == tag)
	}

	/// Short lowercase label used in diagnostics.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::Char => "char",
			Self::I8 => "i8",
			Self::I16 => "i16",
			Self::I32 => "i32",
			Self::I64 => "i64",
			Self::I128 => "i128",
			Self::Isize => "isize",
			Self::U8 => "u8",
			Self::U16 => "u16",
			Self::U32 => "u32",
			Self::U64 => "u64",
			Self::U128 => "u128",
			Self::Usize => "usize",
			Self::F32 => "f32",
			Self::F64 => "f64",
			Self::Decimal => "decimal",
			Self::String => "string",
		}
	}
}

impl fmt::Display for ScalarKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Rust-native scalar convertible to and from locale-invariant text.
///
/// Formatting goes through `Display`, parsing through `FromStr`; both are
/// locale-independent in std. Floats print their shortest round-trip form.
pub trait ScalarValue: Sized {
	/// Kind reported by [`crate::save::Class::Scalar`].
	const KIND: ScalarKind;

	/// Render as text.
	fn to_text(&self) -> String;

	/// Parse text produced by [`ScalarValue::to_text`].
	fn parse_text(text: &str) -> Result<Self>;
}

fn invalid(kind: ScalarKind, text: &str) -> SaveError {
	SaveError::InvalidScalar {
		kind,
		text: text.to_owned(),
	}
}

macro_rules! display_scalar {
	($($ty:ty => $kind:ident),* $(,)?) => {
		$(
			impl ScalarValue for $ty {
				const KIND: ScalarKind = ScalarKind::$kind;

				fn to_text(&self) -> String {
					self.to_string()
				}

				fn parse_text(text: &str) -> Result<Self> {
					text.parse::<$ty>().map_err(|_| invalid(Self::KIND, text))
				}
			}
		)*
	};
}

display_scalar! {
	bool => Bool,
	i8 => I8,
	i16 => I16,
	i32 => I32,
	i64 => I64,
	i128 => I128,
	isize => Isize,
	u8 => U8,
	u16 => U16,
	u32 => U32,
	u64 => U64,
	u128 => U128,
	usize => Usize,
	f32 => F32,
	f64 => F64,
	Decimal => Decimal,
}

impl ScalarValue for char {
	const KIND: ScalarKind = ScalarKind::Char;

	fn to_text(&self) -> String {
		self.to_string()
	}

	fn parse_text(text: &str) -> Result<Self> {
		let mut chars = text.chars();
		match (chars.next(), chars.next()) {
			(Some(ch), None) => Ok(ch),
			_ => Err(invalid(Self::KIND, text)),
		}
	}
}

impl ScalarValue for String {
	const KIND: ScalarKind = ScalarKind::String;

	fn to_text(&self) -> String {
		self.clone()
	}

	fn parse_text(text: &str) -> Result<Self> {
		Ok(text.to_owned())
	}
}
