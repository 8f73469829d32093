use std::collections::BTreeMap;

use serde_json::json;

use crate::style::Context;
use crate::{State, StateFlag};

#[test]
fn default_state_has_all_flags_clear() {
    let s = State::new();
    for flag in StateFlag::ALL {
        assert!(!s.get(flag));
    }
}

#[test]
fn set_reports_whether_the_state_changed() {
    let mut s = State::new();
    assert!(s.set(StateFlag::Pressed, true));
    assert!(!s.set(StateFlag::Pressed, true));
    assert!(s.set(StateFlag::Pressed, false));
    assert!(!s.set(StateFlag::Pressed, false));
}

#[test]
fn toggle_flips_a_single_flag() {
    let mut s = State::new();
    s.toggle(StateFlag::Hover);
    assert!(s.get(StateFlag::Hover));
    assert!(!s.get(StateFlag::Pressed));
    s.toggle(StateFlag::Hover);
    assert_eq!(s, State::new());
}

#[test]
fn a_set_flag_sorts_before_an_unset_one() {
    let disabled = State::new().with(StateFlag::Disabled);
    let mut disabled_karaoke = disabled;
    disabled_karaoke.toggle(StateFlag::Karaoke);

    // First differing flag is Karaoke; the state with it set sorts earlier.
    assert!(disabled_karaoke < disabled);
    // Any set flag sorts before the all-clear state.
    assert!(disabled < State::new());
}

#[test]
fn states_key_an_ordered_map() {
    let mut cache: BTreeMap<State, &str> = BTreeMap::new();
    cache.insert(State::new(), "plain");
    cache.insert(State::new().with(StateFlag::Pressed), "pressed");
    assert_eq!(cache.get(&State::new()), Some(&"plain"));
    assert_eq!(
        cache.get(&State::new().with(StateFlag::Pressed)),
        Some(&"pressed")
    );
    assert_eq!(cache.len(), 2);
}

#[test]
fn flag_names_round_trip_through_the_table() {
    for flag in StateFlag::ALL {
        assert_eq!(StateFlag::from_name(flag.name()), Some(flag));
    }
    assert_eq!(StateFlag::from_name("karaokeTarget"), Some(StateFlag::KaraokeTarget));
}

#[test]
fn unknown_state_names_resolve_to_none() {
    assert_eq!(StateFlag::from_name("confusion"), None);
    assert_eq!(StateFlag::from_name(""), None);
    assert_eq!(StateFlag::from_name("Pressed"), None);
}

#[test]
fn extend_exposes_all_flags_under_the_state_namespace() {
    let mut root = Context::new();
    root.put("color", json!("red"));

    let state = State::new().with(StateFlag::Pressed).with(StateFlag::Hover);
    let scoped = state.extend(&root);

    assert_eq!(scoped.resolve("state.pressed"), Some(&json!(true)));
    assert_eq!(scoped.resolve("state.hover"), Some(&json!(true)));
    assert_eq!(scoped.resolve("state.disabled"), Some(&json!(false)));
    assert_eq!(scoped.resolve("state.karaokeTarget"), Some(&json!(false)));
    // Parent bindings stay visible through the child scope.
    assert_eq!(scoped.resolve("color"), Some(&json!("red")));
}

#[test]
fn display_lists_the_set_flags() {
    assert_eq!(State::new().to_string(), "none");
    let s = State::new().with(StateFlag::Pressed).with(StateFlag::Hover);
    assert_eq!(s.to_string(), "pressed|hover");
}
