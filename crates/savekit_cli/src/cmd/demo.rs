use std::path::PathBuf;

use savekit::save::{Decimal, Registry, Result, SaveField, SaveFile, Settings};

use crate::cmd::util::load_settings;

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long)]
	pub settings: Option<PathBuf>,
}

/// Write a sample save file built from scalar and list types.
pub fn run(args: Args) -> Result<()> {
	let Args { file: path, settings } = args;

	let settings = Settings {
		overwrite: true,
		..load_settings(settings.as_deref())?
	};
	let mut file = SaveFile::open(&path, settings, Registry::with_builtins())?;
	for field in sample_fields() {
		file.fields_mut().modify(field);
	}
	file.save_changes()?;

	println!("wrote {} fields to {} ({})", file.fields().len(), path.display(), file.format().label());
	Ok(())
}

fn sample_fields() -> Vec<SaveField> {
	vec![
		SaveField::new("score", 42_i32),
		SaveField::new("player", String::from("Ann")),
		SaveField::new("gold", Decimal::new(1_999, 2).unwrap_or_default()),
		SaveField::new("volume", 0.75_f32),
		SaveField::new("items", vec![1_i32, 2, 3]),
		SaveField::new("unlocked", vec![true, false, true]),
		SaveField::new("grade", 'A'),
	]
}
