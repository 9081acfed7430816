//! Error types shared by the automaton model, the product construction and
//! the text format.

use std::path::PathBuf;

/// Errors produced while building, combining, reading or writing automata.
#[derive(Debug, thiserror::Error)]
pub enum DfaError {
    #[error("symbol `{symbol}` is not in the alphabet")]
    UnknownSymbol { symbol: String },

    #[error("state `{state}` is not declared")]
    UnknownState { state: String },

    #[error("no transition from state `{state}` on symbol `{symbol}`")]
    MissingTransition { state: String, symbol: String },

    #[error("no start state was set")]
    MissingStartState,

    #[error("state `{state}` is declared more than once")]
    DuplicateState { state: String },

    #[error("symbol `{symbol}` is declared more than once")]
    DuplicateSymbol { symbol: String },

    #[error("product of {left} and {right} states exceeds the state id space")]
    TooManyStates { left: usize, right: usize },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("states #{first} and #{second} both render as `{rendered}`")]
    LabelCollision {
        rendered: String,
        first: u32,
        second: u32,
    },

    #[error("`{text}` contains the delimiter `{delimiter}`")]
    ReservedCharacter { text: String, delimiter: char },

    #[error("invalid configuration in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DfaError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DfaError>;
