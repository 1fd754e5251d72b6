use std::path::Path;
use std::rc::Rc;

use crate::save::{Persist, Registry, Result, SaveField, SaveFile, Settings};

/// Open `path`, upsert `value` under `name`, and write the file.
pub fn quick_save<T: Persist>(path: impl AsRef<Path>, name: &str, value: T, settings: Settings, registry: &Registry) -> Result<()> {
	let mut file = SaveFile::open(path, settings, registry.clone())?;
	file.fields_mut().modify(SaveField::new(name, value));
	file.save_changes()
}

/// Open `path` and return the value named `name` when it is a `T`.
pub fn quick_load<T: Persist>(path: impl AsRef<Path>, name: &str, settings: Settings, registry: &Registry) -> Result<Option<Rc<T>>> {
	let file = SaveFile::open(path, settings, registry.clone())?;
	Ok(file.fields().get_as::<T>(name))
}
