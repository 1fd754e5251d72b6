use std::fs;

use super::SaveFile;
use crate::save::{Format, Registry, SaveError, SaveField, Settings};

fn registry() -> Registry {
	Registry::with_builtins()
}

#[test]
fn missing_file_starts_empty_and_saves_on_request() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = dir.path().join("slot.json");
	let mut file = SaveFile::open(&path, Settings::default(), registry()).expect("open");
	assert_eq!(file.format(), Format::Json);
	assert!(file.fields().is_empty());
	assert!(!path.exists());

	file.fields_mut().append(SaveField::new("score", 42_i32)).expect("append");
	file.save_changes().expect("save");

	let reopened = SaveFile::open(&path, Settings::default(), registry()).expect("reopen");
	assert_eq!(reopened.fields().get_as::<i32>("score").map(|value| *value), Some(42));
}

#[test]
fn every_format_round_trips_builtins() {
	let dir = tempfile::tempdir().expect("tempdir");
	for ext in ["bin", "xml", "json"] {
		let path = dir.path().join(format!("slot.{ext}"));
		let mut file = SaveFile::open(&path, Settings::default(), registry()).expect("open");
		file.fields_mut().append(SaveField::new("name", String::from("ann <&> \"q\""))).expect("append");
		file.fields_mut().append(SaveField::new("ratio", 0.1_f64)).expect("append");
		file.fields_mut().append(SaveField::new("items", vec![1_i32, 2, 3])).expect("append");
		file.fields_mut().append(SaveField::new("empty", Vec::<String>::new())).expect("append");
		file.save_changes().expect("save");

		let loaded = SaveFile::open(&path, Settings::default(), registry()).expect("reopen");
		let fields = loaded.fields();
		assert_eq!(fields.names(), vec!["name", "ratio", "items", "empty"], "{ext}");
		assert_eq!(fields.get_or_default::<String>("name"), "ann <&> \"q\"", "{ext}");
		assert_eq!(fields.get_or_default::<f64>("ratio"), 0.1, "{ext}");
		assert_eq!(fields.get_or_default::<Vec<i32>>("items"), vec![1, 2, 3], "{ext}");
		assert!(fields.get_as::<Vec<String>>("empty").is_some_and(|value| value.is_empty()), "{ext}");
	}
}

#[test]
fn overwrite_skips_existing_contents() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = dir.path().join("slot.bin");
	let mut file = SaveFile::open(&path, Settings::default(), registry()).expect("open");
	file.fields_mut().append(SaveField::new("old", true)).expect("append");
	file.save_changes().expect("save");

	let settings = Settings {
		overwrite: true,
		..Settings::default()
	};
	let fresh = SaveFile::open(&path, settings, registry()).expect("open with overwrite");
	assert!(fresh.fields().is_empty());
}

#[test]
fn failed_decode_yields_no_file() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = dir.path().join("slot.json");
	fs::write(&path, br#"{"a":{"type":"i32","value":"1"},"b":{"type":"app::Gone","value":"2"}}"#).expect("write");

	let err = SaveFile::open(&path, Settings::default(), registry()).expect_err("unknown type");
	assert!(matches!(err, SaveError::UnknownType { ref type_name } if type_name == "app::Gone"));
}

#[test]
fn duplicate_names_on_disk_follow_settings() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = dir.path().join("slot.json");
	fs::write(&path, br#"{"a":{"type":"i32","value":"1"},"a":{"type":"i32","value":"2"}}"#).expect("write");

	let err = SaveFile::open(&path, Settings::default(), registry()).expect_err("duplicates disallowed");
	assert!(matches!(err, SaveError::DuplicateField { ref name } if name == "a"));

	let settings = Settings {
		allow_duplicate_names: true,
		..Settings::default()
	};
	let file = SaveFile::open(&path, settings, registry()).expect("duplicates allowed");
	assert_eq!(file.fields().len(), 2);
	assert_eq!(file.fields().get(1).and_then(|field| field.downcast::<i32>()).map(|value| *value), Some(2));
}

#[test]
fn reload_reads_external_changes() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = dir.path().join("slot.xml");
	let mut file = SaveFile::open(&path, Settings::default(), registry()).expect("open");
	file.fields_mut().append(SaveField::new("lives", 3_u8)).expect("append");
	file.save_changes().expect("save");

	let mut other = SaveFile::open(&path, Settings::default(), registry()).expect("second handle");
	other.fields_mut().modify(SaveField::new("lives", 2_u8));
	other.save_changes().expect("save");

	file.reload().expect("reload");
	assert_eq!(file.fields().get_or_default::<u8>("lives"), 2);

	fs::write(&path, b"not xml").expect("corrupt");
	assert!(file.reload().is_err());
	assert_eq!(file.fields().get_or_default::<u8>("lives"), 2);
}

#[test]
fn extension_and_io_errors_surface() {
	let dir = tempfile::tempdir().expect("tempdir");
	let err = SaveFile::open(dir.path().join("slot.txt"), Settings::default(), registry()).expect_err("txt");
	assert!(matches!(err, SaveError::UnsupportedExtension { ref extension } if extension == "txt"));

	let as_dir = dir.path().join("folder.json");
	fs::create_dir(&as_dir).expect("mkdir");
	let err = SaveFile::open(&as_dir, Settings::default(), registry()).expect_err("directory");
	assert!(matches!(err, SaveError::Io(_)));
}
