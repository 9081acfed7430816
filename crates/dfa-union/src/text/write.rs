//! Writer for the five-line DFA description.

use crate::error::{DfaError, Result};
use crate::formlang::{DFA, StateId};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Characters that structure the description and cannot appear in names.
const DELIMITERS: [char; 5] = ['{', '}', ',', ';', '='];

/// How state labels are turned into text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Inserted between the halves of a composite state label.
    pub separator: String,
}

/// Serialize `dfa` into the five-line description.
///
/// Transitions are sorted by their `state,symbol` key. Fails with
/// [`DfaError::LabelCollision`] when two states render to the same text and
/// with [`DfaError::ReservedCharacter`] when a state or symbol name contains
/// one of the delimiters `{ } , ; =`, since the output could not be read
/// back unambiguously.
pub fn serialize(dfa: &DFA, options: &RenderOptions) -> Result<String> {
    check_delimiters(&options.separator)?;
    let labels = render_labels(dfa, &options.separator)?;
    let symbols: Vec<&str> = dfa.alphabet().iter().map(|(_, symbol)| symbol).collect();
    for symbol in &symbols {
        check_delimiters(symbol)?;
    }
    let label = |state: StateId| labels[state as usize].as_str();

    let mut transitions: Vec<(String, &str)> = dfa
        .transitions()
        .map(|(src, sym, dst)| (format!("{},{}", label(src), symbols[sym as usize]), label(dst)))
        .collect();
    transitions.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    let transitions: Vec<String> = transitions
        .into_iter()
        .map(|(key, dst)| format!("{key}={dst}"))
        .collect();

    let accept: Vec<&str> = dfa.accept_states().iter().map(|&s| label(s)).collect();

    Ok(format!(
        "{{{}}}\n{{{}}}\n{{{}}}\n{}\n{{{}}}\n",
        labels.join(","),
        symbols.join(","),
        transitions.join("; "),
        label(dfa.start_state()),
        accept.join(","),
    ))
}

/// Serialize `dfa` and write it to `path`, replacing any existing file.
pub fn write(path: impl AsRef<Path>, dfa: &DFA, options: &RenderOptions) -> Result<()> {
    let path = path.as_ref();
    let output = serialize(dfa, options)?;
    std::fs::write(path, output).map_err(|source| DfaError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        states = dfa.num_states(),
        transitions = dfa.num_transitions(),
        "wrote automaton"
    );
    Ok(())
}

fn render_labels(dfa: &DFA, separator: &str) -> Result<Vec<String>> {
    let labels: Vec<String> = dfa
        .states()
        .map(|(_, label)| label.render(separator))
        .collect();

    let mut seen: HashMap<&str, StateId> = HashMap::with_capacity(labels.len());
    for (idx, rendered) in labels.iter().enumerate() {
        check_delimiters(rendered)?;
        if let Some(&first) = seen.get(rendered.as_str()) {
            return Err(DfaError::LabelCollision {
                rendered: rendered.clone(),
                first,
                second: idx as StateId,
            });
        }
        seen.insert(rendered, idx as StateId);
    }

    Ok(labels)
}

fn check_delimiters(text: &str) -> Result<()> {
    match text.chars().find(|c| DELIMITERS.contains(c)) {
        Some(delimiter) => Err(DfaError::ReservedCharacter {
            text: text.to_owned(),
            delimiter,
        }),
        None => Ok(()),
    }
}
