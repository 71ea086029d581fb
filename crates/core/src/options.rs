//! Conversion option flags.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// A set of conversion flags.
///
/// Flags are combined with [`ConvertOptions::union`] (or `|`) and tested with
/// [`ConvertOptions::contains`]. The default value is the empty set.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConvertOptions(u8);

impl ConvertOptions {
    /// Enable engine debug tracing before parsing.
    pub const DEBUG: Self = Self(1 << 0);
    /// Suppress optional whitespace in JSON and OpenStep output.
    pub const COMPACT: Self = Self(1 << 1);
    /// Sort dictionary keys before encoding.
    pub const SORT: Self = Self(1 << 2);

    const ALL_BITS: u8 = Self::DEBUG.0 | Self::COMPACT.0 | Self::SORT.0;

    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns the union of both sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Adds every flag of `other` to this set.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Whether every flag of `other` is present.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bit representation.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Builds a set from raw bits, dropping any that name no flag.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL_BITS)
    }

    /// Convenience constructor from individual switches.
    pub fn from_flags(debug: bool, compact: bool, sort: bool) -> Self {
        let mut options = Self::empty();
        if debug {
            options.insert(Self::DEBUG);
        }
        if compact {
            options.insert(Self::COMPACT);
        }
        if sort {
            options.insert(Self::SORT);
        }
        options
    }
}

impl BitOr for ConvertOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for ConvertOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

impl fmt::Debug for ConvertOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        if self.contains(Self::DEBUG) {
            set.entry(&"debug");
        }
        if self.contains(Self::COMPACT) {
            set.entry(&"compact");
        }
        if self.contains(Self::SORT) {
            set.entry(&"sort");
        }
        set.finish()
    }
}
