//! Formal language automata.
//!
//! This module provides the DFA model and the cross-product construction:
//! - `DFA` and `DFABuilder` for assembling an automaton
//! - `union` and `product` for combining two automata
//! - `StateLabel` for atomic and composite state names

mod dfa;
mod product;
mod state;
mod symbol;

pub use dfa::{DFA, DFABuilder};
pub use product::{ProductOp, product, union};
pub use state::{StateId, StateLabel, StateSet};
pub use symbol::{Alphabet, SymbolId};
