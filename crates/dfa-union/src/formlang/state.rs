//! State types for automata.

use fixedbitset::FixedBitSet;
use std::fmt;

/// A state identifier: the insertion index of the state in its automaton.
pub type StateId = u32;

/// A set of states implemented using a fixed-size bit set.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create a new empty state set with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Insert a state, returning `true` if it was not already present.
    pub fn insert(&mut self, state: StateId) -> bool {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        !self.bits.put(idx)
    }

    /// Check if the set contains a state.
    pub fn contains(&self, state: StateId) -> bool {
        let idx = state as usize;
        idx < self.bits.len() && self.bits.contains(idx)
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Get the number of states in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over all states in the set in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::with_capacity(0);
        for state in iter {
            set.insert(state);
        }
        set
    }
}

/// The name of a state.
///
/// States read from a description are plain names. States produced by a
/// product construction keep both operand labels as a pair, so two different
/// pairs never compare equal even when their rendered text does.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum StateLabel {
    Name(String),
    Pair(Box<StateLabel>, Box<StateLabel>),
}

impl StateLabel {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Composite label for the product state `(left, right)`.
    pub fn pair(left: &StateLabel, right: &StateLabel) -> Self {
        Self::Pair(Box::new(left.clone()), Box::new(right.clone()))
    }

    /// Render the label as text, joining the halves of every pair with
    /// `separator`.
    pub fn render(&self, separator: &str) -> String {
        let mut out = String::new();
        self.render_into(&mut out, separator);
        out
    }

    fn render_into(&self, out: &mut String, separator: &str) {
        match self {
            Self::Name(name) => out.push_str(name),
            Self::Pair(left, right) => {
                left.render_into(out, separator);
                out.push_str(separator);
                right.render_into(out, separator);
            }
        }
    }
}

impl fmt::Display for StateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(""))
    }
}

impl fmt::Debug for StateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name:?}"),
            Self::Pair(left, right) => write!(f, "({left:?}, {right:?})"),
        }
    }
}

impl From<&str> for StateLabel {
    fn from(name: &str) -> Self {
        Self::name(name)
    }
}

impl From<String> for StateLabel {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}
