//! Union of deterministic finite automata via the cross-product construction.
//!
//! ```no_run
//! # fn main() -> dfa_union::Result<()> {
//! use dfa_union::{RenderOptions, text, union};
//!
//! let left = text::load("dfaA.txt")?;
//! let right = text::load("dfaB.txt")?;
//! let result = union(&left, &right)?;
//! text::write("dfaUnion.txt", &result, &RenderOptions::default())?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod formlang;
pub mod text;

pub use error::{DfaError, Result};
pub use formlang::{DFA, DFABuilder, ProductOp, StateId, StateLabel, product, union};
pub use text::RenderOptions;
