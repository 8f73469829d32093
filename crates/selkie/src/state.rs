//! Interaction/display state flags.
//!
//! [`State`] is a fixed-size vector of seven booleans used both as the condition
//! input for state-dependent styles and as the key of the per-style instance cache.
//! Its total order exists solely for that cache: flags are compared in canonical enum
//! order with a set flag sorting before an unset one at the first difference.

use std::cmp::Ordering;
use std::fmt;

use crate::style::Context;

/// The closed set of interaction/display flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateFlag {
    Pressed,
    Disabled,
    Focused,
    Checked,
    Karaoke,
    KaraokeTarget,
    Hover,
}

/// Bidirectional flag/name table. Immutable after construction; lookups are linear
/// over seven entries.
static FLAG_NAMES: [(StateFlag, &str); 7] = [
    (StateFlag::Pressed, "pressed"),
    (StateFlag::Disabled, "disabled"),
    (StateFlag::Focused, "focused"),
    (StateFlag::Checked, "checked"),
    (StateFlag::Karaoke, "karaoke"),
    (StateFlag::KaraokeTarget, "karaokeTarget"),
    (StateFlag::Hover, "hover"),
];

impl StateFlag {
    /// Canonical iteration order; also the comparison order of [`State`].
    pub const ALL: [StateFlag; 7] = [
        StateFlag::Pressed,
        StateFlag::Disabled,
        StateFlag::Focused,
        StateFlag::Checked,
        StateFlag::Karaoke,
        StateFlag::KaraokeTarget,
        StateFlag::Hover,
    ];

    pub fn name(self) -> &'static str {
        FLAG_NAMES
            .iter()
            .find(|(flag, _)| *flag == self)
            .map(|(_, name)| *name)
            .unwrap_or("")
    }

    /// Reverse name lookup over the seven canonical names. Unknown names yield
    /// `None`, never an error.
    pub fn from_name(name: &str) -> Option<StateFlag> {
        FLAG_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(flag, _)| *flag)
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// A value type holding all seven flags. Mutated only through [`State::set`] and
/// [`State::toggle`]; equality and ordering are structural.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct State {
    bits: u8,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`State::set`].
    pub fn with(mut self, flag: StateFlag) -> Self {
        self.set(flag, true);
        self
    }

    pub fn get(&self, flag: StateFlag) -> bool {
        self.bits & flag.bit() != 0
    }

    /// Sets a flag, returning whether the state actually changed.
    pub fn set(&mut self, flag: StateFlag, value: bool) -> bool {
        let old = self.bits;
        if value {
            self.bits |= flag.bit();
        } else {
            self.bits &= !flag.bit();
        }
        self.bits != old
    }

    pub fn toggle(&mut self, flag: StateFlag) {
        self.bits ^= flag.bit();
    }

    /// Produces a child binding scope exposing all seven flags as named booleans
    /// under a `"state"` namespace. This is the only integration point with the
    /// expression-evaluation engine.
    pub fn extend<'a>(&self, parent: &'a Context<'a>) -> Context<'a> {
        let mut flags = serde_json::Map::new();
        for flag in StateFlag::ALL {
            flags.insert(flag.name().to_string(), self.get(flag).into());
        }
        let mut values = serde_json::Map::new();
        values.insert("state".to_string(), serde_json::Value::Object(flags));
        parent.extend_with(values)
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        for flag in StateFlag::ALL {
            let (a, b) = (self.get(flag), other.get(flag));
            if a != b {
                // A set flag sorts before an unset one.
                return if a { Ordering::Less } else { Ordering::Greater };
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for flag in StateFlag::ALL {
            if self.get(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(flag.name())?;
                first = false;
            }
        }
        if first {
            f.write_str("none")?;
        }
        Ok(())
    }
}
