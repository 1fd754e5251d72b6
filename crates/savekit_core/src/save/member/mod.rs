use std::borrow::Cow;

use crate::save::{Class, Persist, Persistable, Result, SaveError};

/// How a member is exposed on its owning type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
	/// Accessor-style member; always considered.
	Property,
	/// Plain data field; considered only when fields are enabled.
	Field,
}

/// Persistence metadata of one member, independent of its accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberInfo {
	/// Declared member name.
	pub name: &'static str,
	/// Explicit serialized name overriding `name`.
	pub rename: Option<&'static str>,
	/// Property or field exposure.
	pub access: Access,
	/// Read-only members never participate.
	pub writable: bool,
	/// Explicit exclusion marker.
	pub excluded: bool,
	/// Declared on a base type the owner embeds.
	pub inherited: bool,
}

impl MemberInfo {
	/// Key used in encoded output.
	pub fn serialized_name(&self) -> &'static str {
		self.rename.unwrap_or(self.name)
	}
}

/// Typed member descriptor: metadata plus borrow accessors into `T`.
pub struct Member<T> {
	info: MemberInfo,
	get: fn(&T) -> &dyn Persistable,
	get_mut: fn(&mut T) -> &mut dyn Persistable,
}

impl<T> Clone for Member<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for Member<T> {}

impl<T> std::fmt::Debug for Member<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Member").field("info", &self.info).finish_non_exhaustive()
	}
}

impl<T> Member<T> {
	/// Readable and writable accessor-style member.
	pub fn property(name: &'static str, get: fn(&T) -> &dyn Persistable, get_mut: fn(&mut T) -> &mut dyn Persistable) -> Self {
		Self::with_access(name, Access::Property, get, get_mut)
	}

	/// Plain data field, persisted only when fields are enabled.
	pub fn field(name: &'static str, get: fn(&T) -> &dyn Persistable, get_mut: fn(&mut T) -> &mut dyn Persistable) -> Self {
		Self::with_access(name, Access::Field, get, get_mut)
	}

	fn with_access(name: &'static str, access: Access, get: fn(&T) -> &dyn Persistable, get_mut: fn(&mut T) -> &mut dyn Persistable) -> Self {
		Self {
			info: MemberInfo {
				name,
				rename: None,
				access,
				writable: true,
				excluded: false,
				inherited: false,
			},
			get,
			get_mut,
		}
	}

	/// Persist under `serialized` instead of the declared name.
	pub fn rename(mut self, serialized: &'static str) -> Self {
		self.info.rename = Some(serialized);
		self
	}

	/// Never persist this member.
	pub fn exclude(mut self) -> Self {
		self.info.excluded = true;
		self
	}

	/// Mark as not writable; such members never participate.
	pub fn read_only(mut self) -> Self {
		self.info.writable = false;
		self
	}

	/// Mark as declared on an embedded base type.
	pub fn inherited(mut self) -> Self {
		self.info.inherited = true;
		self
	}

	/// Persistence metadata.
	pub fn info(&self) -> &MemberInfo {
		&self.info
	}

	/// Borrow the member value out of `owner`.
	pub fn get<'a>(&self, owner: &'a T) -> &'a dyn Persistable {
		(self.get)(owner)
	}

	/// Mutably borrow the member value out of `owner`.
	pub fn get_mut<'a>(&self, owner: &'a mut T) -> &'a mut dyn Persistable {
		(self.get_mut)(owner)
	}
}

/// Member discovery switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberPolicy {
	/// Include members marked [`Member::inherited`].
	pub include_inherited: bool,
	/// Include [`Access::Field`] members.
	pub include_fields: bool,
}

impl MemberPolicy {
	/// Whether a member participates in encoding and decoding.
	pub fn is_eligible(&self, info: &MemberInfo) -> bool {
		!info.excluded && info.writable && (self.include_inherited || !info.inherited) && (self.include_fields || info.access == Access::Property)
	}

	/// Eligible members in declaration order.
	pub fn eligible<'m, T>(&self, members: &'m [Member<T>]) -> impl Iterator<Item = &'m Member<T>> + use<'m, T> {
		let policy = *self;
		members.iter().filter(move |member| policy.is_eligible(&member.info))
	}

	/// Map a serialized key back to its member.
	///
	/// An explicit rename wins. A declared name only matches members without a rename.
	pub fn resolve<'m, T>(&self, members: &'m [Member<T>], type_tag: &str, key: &str) -> Result<&'m Member<T>> {
		self.eligible(members)
			.find(|member| member.info.rename == Some(key))
			.or_else(|| self.eligible(members).find(|member| member.info.rename.is_none() && member.info.name == key))
			.ok_or_else(|| SaveError::MissingMember {
				type_name: type_tag.to_owned(),
				member: key.to_owned(),
			})
	}
}

/// Runtime view of one eligible member, for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDescriptor {
	/// Declared member name.
	pub name: &'static str,
	/// Key used in encoded output.
	pub serialized_name: &'static str,
	/// Type tag of the member value.
	pub type_tag: Cow<'static, str>,
	/// Scalar, list, or object classification.
	pub class: Class,
}

/// Describe the eligible members of `T` under `policy`.
pub fn describe<T: Persist>(policy: &MemberPolicy) -> Vec<MemberDescriptor> {
	let probe = T::default();
	let members = T::members();
	policy
		.eligible(&members)
		.map(|member| {
			let value = member.get(&probe);
			MemberDescriptor {
				name: member.info.name,
				serialized_name: member.info.serialized_name(),
				type_tag: value.tag(),
				class: value.kind(),
			}
		})
		.collect()
}
