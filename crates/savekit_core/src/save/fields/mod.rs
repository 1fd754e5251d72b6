use std::borrow::Cow;
use std::rc::Rc;

use crate::save::{Persist, Persistable, Result, SaveError};

/// Named top-level value; clones share the referenced value.
#[derive(Clone)]
pub struct SaveField {
	name: String,
	value: Rc<dyn Persistable>,
}

impl std::fmt::Debug for SaveField {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SaveField").field("name", &self.name).field("type_tag", &self.value.tag()).finish()
	}
}

impl SaveField {
	/// Wrap an owned value.
	pub fn new<T: Persist>(name: impl Into<String>, value: T) -> Self {
		Self::from_rc(name, Rc::new(value))
	}

	/// Share a caller-held value without copying it.
	pub fn from_rc<T: Persist>(name: impl Into<String>, value: Rc<T>) -> Self {
		Self {
			name: name.into(),
			value,
		}
	}

	/// Share an already type-erased value.
	pub fn shared(name: impl Into<String>, value: Rc<dyn Persistable>) -> Self {
		Self { name: name.into(), value }
	}

	/// Take ownership of a freshly decoded value.
	pub fn from_box(name: impl Into<String>, value: Box<dyn Persistable>) -> Self {
		Self::shared(name, Rc::from(value))
	}

	/// Field name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Shared value handle.
	pub fn value(&self) -> &Rc<dyn Persistable> {
		&self.value
	}

	/// Type tag of the held value.
	pub fn type_tag(&self) -> Cow<'static, str> {
		self.value.tag()
	}

	/// Typed handle to the held value, if it is a `T`.
	pub fn downcast<T: Persist>(&self) -> Option<Rc<T>> {
		Rc::clone(&self.value).into_any_rc().downcast::<T>().ok()
	}

	/// Whether both fields reference the same value.
	pub fn shares_value(&self, other: &SaveField) -> bool {
		Rc::ptr_eq(&self.value, &other.value)
	}
}

/// Ordered save-field sequence; insertion order is on-disk order.
#[derive(Debug, Clone, Default)]
pub struct SaveFields {
	fields: Vec<SaveField>,
	allow_duplicates: bool,
}

impl SaveFields {
	/// Empty sequence that rejects duplicate names.
	pub fn new() -> Self {
		Self::default()
	}

	/// Empty sequence with an explicit duplicate-name policy.
	pub fn with_duplicates(allow_duplicates: bool) -> Self {
		Self {
			fields: Vec::new(),
			allow_duplicates,
		}
	}

	/// Number of fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Whether the sequence is empty.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Borrow every field in order.
	pub fn as_slice(&self) -> &[SaveField] {
		&self.fields
	}

	/// Field names in order.
	pub fn names(&self) -> Vec<&str> {
		self.fields.iter().map(SaveField::name).collect()
	}

	/// Whether a field named `name` exists.
	pub fn contains(&self, name: &str) -> bool {
		self.position(name).is_some()
	}

	/// Copy of the field at `index`.
	pub fn get(&self, index: usize) -> Option<SaveField> {
		self.fields.get(index).cloned()
	}

	/// Copy of the first field named `name`.
	pub fn get_by_name(&self, name: &str) -> Option<SaveField> {
		self.position(name).map(|at| self.fields[at].clone())
	}

	/// Typed handle to the first field named `name`.
	///
	/// `None` when the name is absent or holds a different type.
	pub fn get_as<T: Persist>(&self, name: &str) -> Option<Rc<T>> {
		self.fields.iter().find(|field| field.name == name)?.downcast::<T>()
	}

	/// Copy of the typed value named `name`, or `T::default()`.
	pub fn get_or_default<T: Persist + Clone>(&self, name: &str) -> T {
		self.get_as::<T>(name).map(|value| T::clone(&value)).unwrap_or_default()
	}

	/// Add at the end.
	pub fn append(&mut self, field: SaveField) -> Result<()> {
		self.check_unique(&field.name)?;
		self.fields.push(field);
		Ok(())
	}

	/// Add at the front.
	pub fn prepend(&mut self, field: SaveField) -> Result<()> {
		self.insert(0, field)
	}

	/// Add before `index`; `index == len()` appends.
	pub fn insert(&mut self, index: usize, field: SaveField) -> Result<()> {
		if index > self.fields.len() {
			return Err(SaveError::FieldIndexOutOfRange {
				index,
				len: self.fields.len(),
			});
		}
		self.check_unique(&field.name)?;
		self.fields.insert(index, field);
		Ok(())
	}

	/// Remove by position.
	pub fn remove_at(&mut self, index: usize) -> Option<SaveField> {
		(index < self.fields.len()).then(|| self.fields.remove(index))
	}

	/// Remove the first field referencing exactly `value` (pointer identity).
	pub fn remove_value<T: ?Sized>(&mut self, value: &Rc<T>) -> Option<SaveField> {
		let at = self.fields.iter().position(|field| std::ptr::addr_eq(Rc::as_ptr(&field.value), Rc::as_ptr(value)))?;
		Some(self.fields.remove(at))
	}

	/// Remove the first field named `name`.
	pub fn remove_by_name(&mut self, name: &str) -> Option<SaveField> {
		let at = self.position(name)?;
		Some(self.fields.remove(at))
	}

	/// Replace the value at `index`, keeping its name; returns the previous field.
	pub fn modify_at(&mut self, index: usize, value: Rc<dyn Persistable>) -> Result<SaveField> {
		let len = self.fields.len();
		let slot = self.fields.get_mut(index).ok_or(SaveError::FieldIndexOutOfRange { index, len })?;
		let previous = std::mem::replace(&mut slot.value, value);
		Ok(SaveField::shared(slot.name.clone(), previous))
	}

	/// Upsert: replace the first same-named field in place, else append.
	///
	/// Returns the position the field now occupies.
	pub fn modify(&mut self, field: SaveField) -> usize {
		match self.position(&field.name) {
			Some(at) => {
				self.fields[at] = field;
				at
			}
			None => {
				self.fields.push(field);
				self.fields.len() - 1
			}
		}
	}

	/// Remove every field.
	pub fn clear(&mut self) {
		self.fields.clear();
	}

	/// Lazy iterator of field copies over the current contents.
	pub fn iter(&self) -> impl Iterator<Item = SaveField> + '_ {
		self.fields.iter().cloned()
	}

	fn position(&self, name: &str) -> Option<usize> {
		self.fields.iter().position(|field| field.name == name)
	}

	fn check_unique(&self, name: &str) -> Result<()> {
		if !self.allow_duplicates && self.contains(name) {
			return Err(SaveError::DuplicateField { name: name.to_owned() });
		}
		Ok(())
	}
}
