use std::collections::HashMap;

use crate::save::{Decimal, Persist, Persistable, Result, SaveError};

type Constructor = fn() -> Box<dyn Persistable>;

/// Type tag to default-constructor table consulted when loading save fields.
#[derive(Clone, Default)]
pub struct Registry {
	entries: HashMap<Box<str>, Constructor>,
}

impl std::fmt::Debug for Registry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut tags: Vec<&str> = self.entries.keys().map(|tag| &**tag).collect();
		tags.sort_unstable();
		f.debug_struct("Registry").field("tags", &tags).finish()
	}
}

fn create<T: Persist>() -> Box<dyn Persistable> {
	Box::new(T::default())
}

macro_rules! register_scalars {
	($registry:expr, $($ty:ty),* $(,)?) => {
		$(
			$registry.register::<$ty>();
			$registry.register::<Vec<$ty>>();
		)*
	};
}

impl Registry {
	/// Empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry preloaded with every scalar type and `Vec` of each scalar.
	pub fn with_builtins() -> Self {
		let mut registry = Self::new();
		register_scalars!(registry, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, Decimal, String);
		registry
	}

	/// Register `T` under [`Persist::type_tag`]; a repeated tag replaces the earlier entry.
	pub fn register<T: Persist>(&mut self) -> &mut Self {
		let tag = T::type_tag();
		if self.entries.insert((&*tag).into(), create::<T>).is_some() {
			log::warn!("type tag {tag} registered twice; keeping the latest registration");
		}
		self
	}

	/// Register `T` and `Vec<T>`.
	pub fn register_with_list<T: Persist>(&mut self) -> &mut Self {
		self.register::<T>().register::<Vec<T>>()
	}

	/// Whether `tag` resolves to a constructible type.
	pub fn contains(&self, tag: &str) -> bool {
		self.entries.contains_key(tag)
	}

	/// Number of registered tags.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether no tag is registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Default-construct the type registered under `tag`.
	pub fn instantiate(&self, tag: &str) -> Result<Box<dyn Persistable>> {
		let create = self.entries.get(tag).ok_or_else(|| SaveError::UnknownType { type_name: tag.to_owned() })?;
		Ok(create())
	}
}
