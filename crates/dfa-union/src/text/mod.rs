//! Text encoding of a DFA.
//!
//! A description is five lines, in order:
//!
//! ```text
//! {p0,p1}
//! {0,1}
//! {p0,0=p0; p0,1=p1; p1,0=p1; p1,1=p0}
//! p0
//! {p1}
//! ```
//!
//! The states, the alphabet, the transition table, the start state and the
//! accepting states. Identifiers cannot contain the delimiters `{`, `}`,
//! `,`, `;` or `=`.

mod parse;
mod write;

pub use parse::{load, parse};
pub use write::{RenderOptions, serialize, write};
