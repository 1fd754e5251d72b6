use serde::{Deserialize, Serialize};

/// Hard ceiling on nested descent, applied whatever the configuration says.
pub const MAX_DEPTH: u32 = 64;

/// Decide whether a frame at `current` depth may be visited.
///
/// A `configured` value of `0`, or anything above [`MAX_DEPTH`], selects the
/// hard ceiling. It does not mean "no nesting"; use [`Depth::None`] for that.
pub fn should_descend(current: u32, configured: u32) -> bool {
	if configured > 0 && configured <= MAX_DEPTH {
		current < configured
	} else {
		current < MAX_DEPTH
	}
}

/// Recursion bound for nested objects, lists, and object list elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Depth {
	/// Numeric bound with [`should_descend`] semantics (`0` = ceiling).
	Bounded(u32),
	/// Descend up to [`MAX_DEPTH`].
	#[default]
	Unbounded,
	/// Never descend: only scalars directly under a save field are kept.
	None,
}

impl From<u32> for Depth {
	fn from(value: u32) -> Self {
		Self::Bounded(value)
	}
}

impl Depth {
	/// Whether a child frame at `depth` is visited.
	pub fn allows(self, depth: u32) -> bool {
		match self {
			Self::Bounded(configured) => should_descend(depth, configured),
			Self::Unbounded => should_descend(depth, 0),
			Self::None => false,
		}
	}

	/// First frame depth that is no longer visited.
	pub fn effective_limit(self) -> u32 {
		match self {
			Self::Bounded(configured) if configured > 0 && configured <= MAX_DEPTH => configured,
			Self::Bounded(_) | Self::Unbounded => MAX_DEPTH,
			Self::None => 0,
		}
	}
}

#[cfg(test)]
mod tests;
