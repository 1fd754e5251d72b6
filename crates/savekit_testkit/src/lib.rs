//! Shared sample types and scratch paths for workspace tests.

use std::borrow::Cow;
use std::path::PathBuf;

use savekit::save::{Member, Persist, Registry};
use tempfile::TempDir;

/// Innermost nested object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inner {
	/// Scalar lost when the depth limit cuts `Outer::y`.
	pub z: i32,
}

impl Persist for Inner {
	fn type_tag() -> Cow<'static, str> {
		"testkit::Inner".into()
	}

	fn members() -> Vec<Member<Self>> {
		vec![Member::property("z", |s: &Self| &s.z, |s: &mut Self| &mut s.z)]
	}
}

/// Object holding a scalar and one nested object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outer {
	/// Top-level scalar.
	pub x: i32,
	/// Nested object at depth 1.
	pub y: Inner,
}

impl Persist for Outer {
	fn type_tag() -> Cow<'static, str> {
		"testkit::Outer".into()
	}

	fn members() -> Vec<Member<Self>> {
		vec![
			Member::property("x", |s: &Self| &s.x, |s: &mut Self| &mut s.x),
			Member::property("y", |s: &Self| &s.y, |s: &mut Self| &mut s.y),
		]
	}
}

/// Inventory element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
	/// Display name.
	pub name: String,
	/// Stack size.
	pub count: u16,
	/// Unit weight.
	pub weight: f32,
}

impl Persist for Item {
	fn type_tag() -> Cow<'static, str> {
		"testkit::Item".into()
	}

	fn members() -> Vec<Member<Self>> {
		vec![
			Member::property("name", |s: &Self| &s.name, |s: &mut Self| &mut s.name),
			Member::property("count", |s: &Self| &s.count, |s: &mut Self| &mut s.count),
			Member::property("weight", |s: &Self| &s.weight, |s: &mut Self| &mut s.weight),
		]
	}
}

/// Object covering every member marker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
	/// Plain property.
	pub name: String,
	/// Persisted as `"hp"`.
	pub health: i64,
	/// Never persisted.
	pub session_token: String,
	/// Read-only, never persisted.
	pub play_time: u64,
	/// Field access; persisted only with `include_fields`.
	pub seed: u32,
	/// Declared on the embedded base; persisted only with `include_inherited`.
	pub entity_id: u64,
	/// Fixed-point scalar.
	pub gold: savekit::save::Decimal,
	/// Nested object list.
	pub inventory: Vec<Item>,
	/// Nested object.
	pub home: Outer,
	/// List of scalars.
	pub flags: Vec<bool>,
	/// Single character.
	pub grade: char,
}

impl Persist for Player {
	fn type_tag() -> Cow<'static, str> {
		"testkit::Player".into()
	}

	fn members() -> Vec<Member<Self>> {
		vec![
			Member::property("entity_id", |s: &Self| &s.entity_id, |s: &mut Self| &mut s.entity_id).inherited(),
			Member::property("name", |s: &Self| &s.name, |s: &mut Self| &mut s.name),
			Member::property("health", |s: &Self| &s.health, |s: &mut Self| &mut s.health).rename("hp"),
			Member::property("session_token", |s: &Self| &s.session_token, |s: &mut Self| &mut s.session_token).exclude(),
			Member::property("play_time", |s: &Self| &s.play_time, |s: &mut Self| &mut s.play_time).read_only(),
			Member::field("seed", |s: &Self| &s.seed, |s: &mut Self| &mut s.seed),
			Member::property("gold", |s: &Self| &s.gold, |s: &mut Self| &mut s.gold),
			Member::property("inventory", |s: &Self| &s.inventory, |s: &mut Self| &mut s.inventory),
			Member::property("home", |s: &Self| &s.home, |s: &mut Self| &mut s.home),
			Member::property("flags", |s: &Self| &s.flags, |s: &mut Self| &mut s.flags),
			Member::property("grade", |s: &Self| &s.grade, |s: &mut Self| &mut s.grade),
		]
	}
}

/// Fully populated player.
pub fn sample_player() -> Player {
	Player {
		name: "Ann <the Bold> & co".to_owned(),
		health: -12,
		session_token: "secret".to_owned(),
		play_time: 3600,
		seed: 77,
		entity_id: 900,
		gold: savekit::save::Decimal::new(12_345, 2).unwrap_or_default(),
		inventory: vec![
			Item {
				name: "torch".to_owned(),
				count: 3,
				weight: 0.25,
			},
			Item {
				name: String::new(),
				count: 0,
				weight: 1.0e-7,
			},
		],
		home: Outer { x: 5, y: Inner { z: 6 } },
		flags: vec![true, false],
		grade: 'Å',
	}
}

/// Player as it reads back under default member policy.
pub fn persisted_player() -> Player {
	Player {
		session_token: String::new(),
		play_time: 0,
		seed: 0,
		entity_id: 0,
		..sample_player()
	}
}

/// Built-in scalars plus every sample type and its list.
pub fn registry() -> Registry {
	let mut registry = Registry::with_builtins();
	registry
		.register_with_list::<Inner>()
		.register_with_list::<Outer>()
		.register_with_list::<Item>()
		.register_with_list::<Player>();
	registry
}

/// Temporary directory removed on drop.
pub struct Scratch {
	dir: TempDir,
}

impl Scratch {
	/// Create a fresh scratch directory.
	pub fn new() -> Self {
		let dir = tempfile::Builder::new().prefix("savekit-").tempdir().unwrap_or_else(|err| panic!("create scratch dir: {err}"));
		Self { dir }
	}

	/// Path of `name` inside the scratch directory.
	pub fn path(&self, name: &str) -> PathBuf {
		self.dir.path().join(name)
	}
}

impl Default for Scratch {
	fn default() -> Self {
		Self::new()
	}
}
