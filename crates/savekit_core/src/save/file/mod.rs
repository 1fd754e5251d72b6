use std::fs;
use std::path::{Path, PathBuf};

use crate::save::codec::{self, Format};
use crate::save::{Registry, Result, SaveField, SaveFields, Settings};

/// Save fields bound to one file, its format, and its settings.
///
/// Holds `Rc` values, so it stays on the thread that opened it.
#[derive(Debug)]
pub struct SaveFile {
	path: PathBuf,
	format: Format,
	settings: Settings,
	registry: Registry,
	fields: SaveFields,
}

impl SaveFile {
	/// Open `path`, loading it unless it is missing or `overwrite` is set.
	///
	/// The format comes from the extension, so unsupported extensions fail here
	/// for both loading and saving. Decoding finishes before the value exists.
	pub fn open(path: impl AsRef<Path>, settings: Settings, registry: Registry) -> Result<Self> {
		let path = path.as_ref().to_path_buf();
		let format = Format::from_path(&path)?;
		let fields = if settings.overwrite || !path.exists() {
			SaveFields::with_duplicates(settings.allow_duplicate_names)
		} else {
			load_fields(&path, format, &settings, &registry)?
		};

		log::info!("opened {} ({}, {} fields)", path.display(), format.label(), fields.len());
		Ok(Self {
			path,
			format,
			settings,
			registry,
			fields,
		})
	}

	/// Bound file path.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Format selected by the extension.
	pub fn format(&self) -> Format {
		self.format
	}

	/// Settings in effect.
	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	/// Registry used to decode.
	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	/// Current fields.
	pub fn fields(&self) -> &SaveFields {
		&self.fields
	}

	/// Mutable fields; changes reach disk on [`SaveFile::save_changes`].
	pub fn fields_mut(&mut self) -> &mut SaveFields {
		&mut self.fields
	}

	/// Encode every field and replace the file contents.
	pub fn save_changes(&self) -> Result<()> {
		let bytes = codec::encode(self.format, self.fields.as_slice(), &self.settings)?;
		fs::write(&self.path, &bytes)?;
		log::info!("saved {} ({}, {} fields, {} bytes)", self.path.display(), self.format.label(), self.fields.len(), bytes.len());
		Ok(())
	}

	/// Replace the in-memory fields with the file contents.
	///
	/// On error the current fields are kept. A missing file yields no fields.
	pub fn reload(&mut self) -> Result<()> {
		self.fields = if self.path.exists() {
			load_fields(&self.path, self.format, &self.settings, &self.registry)?
		} else {
			SaveFields::with_duplicates(self.settings.allow_duplicate_names)
		};
		Ok(())
	}
}

fn load_fields(path: &Path, format: Format, settings: &Settings, registry: &Registry) -> Result<SaveFields> {
	let bytes = fs::read(path)?;
	let decoded: Vec<SaveField> = codec::decode(format, &bytes, settings, registry)?;
	let mut fields = SaveFields::with_duplicates(settings.allow_duplicate_names);
	for field in decoded {
		fields.append(field)?;
	}
	Ok(fields)
}

#[cfg(test)]
mod tests;
