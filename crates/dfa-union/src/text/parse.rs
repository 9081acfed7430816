//! Loader for the five-line DFA description.

use crate::error::{DfaError, Result};
use crate::formlang::{DFA, DFABuilder, StateId};
use std::path::Path;
use tracing::{debug, info};

const STATES_LINE: usize = 1;
const ALPHABET_LINE: usize = 2;
const TRANSITIONS_LINE: usize = 3;
const START_LINE: usize = 4;
const ACCEPT_LINE: usize = 5;

const SECTIONS: [&str; 5] = [
    "set of states",
    "alphabet",
    "transition table",
    "start state",
    "accept states",
];

/// Read and parse a DFA description from `path`.
pub fn load(path: impl AsRef<Path>) -> Result<DFA> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path).map_err(|source| DfaError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let dfa = parse(&input)?;
    info!(
        path = %path.display(),
        states = dfa.num_states(),
        symbols = dfa.alphabet().len(),
        "loaded automaton"
    );
    Ok(dfa)
}

/// Parse a DFA description.
///
/// Only the first five lines are read. Every state and symbol referenced by
/// the transition table, the start line and the accept line must have been
/// declared; the table is not required to be total.
pub fn parse(input: &str) -> Result<DFA> {
    let lines: Vec<&str> = input.lines().take(SECTIONS.len()).collect();
    if let Some(missing) = SECTIONS.get(lines.len()) {
        return Err(DfaError::parse(lines.len() + 1, format!("missing {missing}")));
    }

    let mut builder = DFABuilder::new();

    for name in set_items(lines[STATES_LINE - 1], STATES_LINE)? {
        builder.add_state(name).map_err(at_line(STATES_LINE))?;
    }

    for symbol in set_items(lines[ALPHABET_LINE - 1], ALPHABET_LINE)? {
        builder.add_symbol(symbol).map_err(at_line(ALPHABET_LINE))?;
    }

    for entry in transition_entries(lines[TRANSITIONS_LINE - 1])? {
        let (source, symbol, destination) = split_transition(entry)?;

        let source = lookup_state(&builder, source, TRANSITIONS_LINE)?;
        let destination = lookup_state(&builder, destination, TRANSITIONS_LINE)?;
        let symbol_id = builder.alphabet().id(symbol).ok_or_else(|| {
            DfaError::parse(
                TRANSITIONS_LINE,
                format!("symbol `{symbol}` is not in the alphabet"),
            )
        })?;

        if builder.transition(source, symbol_id).is_some() {
            return Err(DfaError::parse(
                TRANSITIONS_LINE,
                format!("more than one transition for `{entry}`"),
            ));
        }
        builder.add_transition(source, symbol_id, destination);
    }

    let start = lines[START_LINE - 1].trim();
    if start.is_empty() {
        return Err(DfaError::parse(START_LINE, "missing start state"));
    }
    let start = lookup_state(&builder, start, START_LINE)?;
    builder.set_start_state(start);

    for name in set_items(lines[ACCEPT_LINE - 1], ACCEPT_LINE)? {
        let state = lookup_state(&builder, name, ACCEPT_LINE)?;
        if !builder.add_accept_state(state) {
            debug!(state = name, "accept state listed twice");
        }
    }

    builder.build()
}

fn at_line(line: usize) -> impl Fn(DfaError) -> DfaError {
    move |err| DfaError::parse(line, err.to_string())
}

fn lookup_state(builder: &DFABuilder, name: &str, line: usize) -> Result<StateId> {
    builder
        .state_id(&name.into())
        .ok_or_else(|| DfaError::parse(line, format!("state `{name}` is not declared")))
}

fn strip_braces(line: &str) -> &str {
    let line = line.trim();
    let line = line.strip_prefix('{').unwrap_or(line);
    line.strip_suffix('}').unwrap_or(line).trim()
}

/// Split a `{a,b,c}` line into its trimmed elements.
fn set_items(line: &str, line_no: usize) -> Result<Vec<&str>> {
    let inner = strip_braces(line);
    if inner.is_empty() {
        return Err(DfaError::parse(
            line_no,
            format!("empty {}", SECTIONS[line_no - 1]),
        ));
    }

    inner
        .split(',')
        .map(str::trim)
        .map(|item| {
            if item.is_empty() {
                Err(DfaError::parse(line_no, "empty element in set"))
            } else {
                Ok(item)
            }
        })
        .collect()
}

fn transition_entries(line: &str) -> Result<Vec<&str>> {
    let inner = strip_braces(line);
    if inner.is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(';')
        .map(str::trim)
        .map(|entry| {
            if entry.is_empty() {
                Err(DfaError::parse(TRANSITIONS_LINE, "empty transition entry"))
            } else {
                Ok(entry)
            }
        })
        .collect()
}

/// Split `source,symbol=destination`.
fn split_transition(entry: &str) -> Result<(&str, &str, &str)> {
    let malformed = || {
        DfaError::parse(
            TRANSITIONS_LINE,
            format!("malformed transition `{entry}`, expected `state,symbol=state`"),
        )
    };

    let (key, destination) = entry.split_once('=').ok_or_else(malformed)?;
    let (source, symbol) = key.split_once(',').ok_or_else(malformed)?;
    let parts = (source.trim(), symbol.trim(), destination.trim());

    if parts.0.is_empty() || parts.1.is_empty() || parts.2.is_empty() {
        return Err(malformed());
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ODD_ONES: &str = "\
{p0,p1}
{0,1}
{p0,0=p0; p0,1=p1; p1,0=p1; p1,1=p0}
p0
{p1}
";

    fn parse_err(input: &str) -> (usize, String) {
        match parse(input) {
            Err(DfaError::Parse { line, message }) => (line, message),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_basic() {
        let dfa = parse(ODD_ONES).unwrap();

        assert_eq!(dfa.num_states(), 2);
        assert_eq!(dfa.alphabet().len(), 2);
        assert_eq!(dfa.num_transitions(), 4);
        assert_eq!(dfa.start_state(), dfa.state_named("p0").unwrap());
        assert_eq!(dfa.accept_states(), &[dfa.state_named("p1").unwrap()]);
        assert!(dfa.accepts(["1", "0"]).unwrap());
        assert!(!dfa.accepts(["1", "1"]).unwrap());
    }

    #[test]
    fn test_parse_tolerates_spacing() {
        let dfa = parse("{ a, b }\n{x}\n{a,x=b;b,x=a}\n a \n{b}").unwrap();

        assert_eq!(dfa.state_named("b"), Some(1));
        assert_eq!(dfa.delta(0, "x").unwrap(), 1);
    }

    #[test]
    fn test_ignores_extra_lines() {
        let input = format!("{ODD_ONES}\nthis line is not read\n");
        assert!(parse(&input).is_ok());
    }

    #[test]
    fn test_missing_lines() {
        assert_eq!(parse_err("{a}\n{x}\n"), (3, "missing transition table".to_string()));
        assert_eq!(parse_err(""), (1, "missing set of states".to_string()));
    }

    #[test]
    fn test_empty_sets() {
        assert_eq!(parse_err("{}\n{x}\n{}\na\n{a}").0, STATES_LINE);
        assert_eq!(parse_err("{a}\n{}\n{}\na\n{a}").0, ALPHABET_LINE);
        assert_eq!(parse_err("{a}\n{x}\n{a,x=a}\na\n{}").0, ACCEPT_LINE);
        assert_eq!(parse_err("{a,,b}\n{x}\n{}\na\n{a}").0, STATES_LINE);
    }

    #[test]
    fn test_empty_transition_table_is_allowed() {
        let dfa = parse("{a}\n{x}\n{}\na\n{a}").unwrap();
        assert_eq!(dfa.num_transitions(), 0);
    }

    #[test]
    fn test_malformed_transitions() {
        let (line, message) = parse_err("{a}\n{x}\n{a,x}\na\n{a}");
        assert_eq!(line, TRANSITIONS_LINE);
        assert!(message.contains("malformed transition `a,x`"));

        let (line, _) = parse_err("{a}\n{x}\n{ax=a}\na\n{a}");
        assert_eq!(line, TRANSITIONS_LINE);

        let (line, message) = parse_err("{a}\n{x}\n{a,x=a; a,x=a}\na\n{a}");
        assert_eq!(line, TRANSITIONS_LINE);
        assert!(message.contains("more than one transition"));
    }

    #[test]
    fn test_undeclared_references() {
        let (line, message) = parse_err("{a}\n{x}\n{a,y=a}\na\n{a}");
        assert_eq!(line, TRANSITIONS_LINE);
        assert!(message.contains("`y`"));

        assert_eq!(parse_err("{a}\n{x}\n{a,x=b}\na\n{a}").0, TRANSITIONS_LINE);
        assert_eq!(parse_err("{a}\n{x}\n{a,x=a}\nb\n{a}").0, START_LINE);
        assert_eq!(parse_err("{a}\n{x}\n{a,x=a}\n\n{a}").0, START_LINE);
        assert_eq!(parse_err("{a}\n{x}\n{a,x=a}\na\n{c}").0, ACCEPT_LINE);
    }

    #[test]
    fn test_duplicates() {
        let (line, message) = parse_err("{a,a}\n{x}\n{}\na\n{a}");
        assert_eq!(line, STATES_LINE);
        assert!(message.contains("more than once"));

        assert_eq!(parse_err("{a}\n{x,x}\n{}\na\n{a}").0, ALPHABET_LINE);

        let dfa = parse("{a}\n{x}\n{}\na\n{a,a}").unwrap();
        assert_eq!(dfa.accept_states(), &[0]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load("/nonexistent/dfa.txt").unwrap_err();
        assert!(matches!(err, DfaError::Io { .. }));
    }
}
