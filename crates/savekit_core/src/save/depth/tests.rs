use super::{Depth, MAX_DEPTH, should_descend};

#[test]
fn bounded_depth_stops_at_configured_limit() {
	assert!(should_descend(0, 2));
	assert!(should_descend(1, 2));
	assert!(!should_descend(2, 2));
	assert!(!should_descend(3, 2));
}

#[test]
fn zero_depth_means_hard_ceiling() {
	assert!(should_descend(1, 0));
	assert!(should_descend(MAX_DEPTH - 1, 0));
	assert!(!should_descend(MAX_DEPTH, 0));
}

#[test]
fn oversized_depth_is_clamped_to_ceiling() {
	assert!(should_descend(MAX_DEPTH - 1, MAX_DEPTH + 10));
	assert!(!should_descend(MAX_DEPTH, MAX_DEPTH + 10));
	assert!(should_descend(MAX_DEPTH - 1, MAX_DEPTH));
	assert!(!should_descend(MAX_DEPTH, MAX_DEPTH));
}

#[test]
fn depth_none_never_descends() {
	assert!(!Depth::None.allows(0));
	assert!(!Depth::None.allows(1));
	assert_eq!(Depth::None.effective_limit(), 0);
}

#[test]
fn depth_variants_follow_governor() {
	assert!(Depth::Bounded(1).allows(0));
	assert!(!Depth::Bounded(1).allows(1));
	assert!(Depth::Unbounded.allows(MAX_DEPTH - 1));
	assert!(!Depth::Unbounded.allows(MAX_DEPTH));
	assert_eq!(Depth::from(0), Depth::Bounded(0));
	assert_eq!(Depth::Bounded(0).effective_limit(), MAX_DEPTH);
	assert_eq!(Depth::Bounded(3).effective_limit(), 3);
}

#[test]
fn depth_settings_parse_from_json() {
	let bounded: Depth = serde_json::from_str(r#"{"bounded":3}"#).expect("bounded parses");
	let none: Depth = serde_json::from_str(r#""none""#).expect("none parses");
	assert_eq!(bounded, Depth::Bounded(3));
	assert_eq!(none, Depth::None);
}
