//! Documentation comment dialects.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// A documentation comment dialect.
///
/// The dialect decides which tags are known and what each tag may carry in
/// its name and type positions.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Mode {
    /// Plain JSDoc.
    #[default]
    Jsdoc,
    /// TypeScript-flavored JSDoc.
    Typescript,
    /// Closure Compiler annotations.
    Closure,
    /// Accepts the union of the other dialects.
    Permissive,
}

impl Mode {
    /// All of the modes, in declaration order.
    pub const ALL: [Mode; 4] = [Self::Jsdoc, Self::Typescript, Self::Closure, Self::Permissive];

    /// Gets the name of the mode as used in configuration and messages.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Iterates the modes other than this one.
    pub fn others(self) -> impl Iterator<Item = Mode> {
        Self::ALL.into_iter().filter(move |m| *m != self)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A set of modes stored as a bitset.
///
/// Sets are constructed in const contexts so that grammar rows can name the
/// modes in which a facet holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModeSet(u8);

impl ModeSet {
    /// The empty set.
    pub const NONE: Self = Self(0);

    /// The set of every mode.
    pub const ALL: Self = Self::new(&Mode::ALL);

    /// Constructs a mode set from a slice of modes.
    pub const fn new(modes: &[Mode]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < modes.len() {
            bits |= Self::mask(modes[i]);
            i += 1;
        }
        Self(bits)
    }

    /// Constructs a set holding every mode except the given one.
    pub const fn except(mode: Mode) -> Self {
        Self(Self::ALL.0 & !Self::mask(mode))
    }

    /// Unions two mode sets together.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Checks if the mode is contained in the set.
    pub const fn contains(&self, mode: Mode) -> bool {
        self.0 & Self::mask(mode) != 0
    }

    /// Determines if the set is empty.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Masks the given mode to a `u8`.
    const fn mask(mode: Mode) -> u8 {
        1u8 << (mode as u8)
    }

    /// Iterates the modes in the set.
    pub fn iter(&self) -> impl Iterator<Item = Mode> + use<> {
        let bits = self.0;
        Mode::ALL
            .into_iter()
            .filter(move |m| bits & Self::mask(*m) != 0)
    }
}
