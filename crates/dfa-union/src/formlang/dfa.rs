//! Deterministic Finite Automaton (DFA) model.

use crate::error::{DfaError, Result};
use crate::formlang::state::{StateId, StateLabel, StateSet};
use crate::formlang::symbol::{Alphabet, SymbolId};
use indexmap::IndexSet;
use std::collections::{HashMap, VecDeque};

/// A Deterministic Finite Automaton.
///
/// A `DFA` is produced by [`DFABuilder::build`] and is read-only afterwards.
/// State and symbol ids are insertion indices, so the order in which states
/// and symbols were added is the order every accessor reports them in.
#[derive(Debug, Clone)]
pub struct DFA {
    /// State labels, indexed by `StateId`
    states: IndexSet<StateLabel>,
    /// Input symbols, indexed by `SymbolId`
    alphabet: Alphabet,
    /// Transitions: (source, symbol) -> destination
    transitions: HashMap<(StateId, SymbolId), StateId>,
    start_state: StateId,
    /// Accepting states in the order they were declared
    accept_order: Vec<StateId>,
    accept_states: StateSet,
}

impl DFA {
    /// Get the number of states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Iterate over `(id, label)` for every state in declaration order.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &StateLabel)> + '_ {
        self.states
            .iter()
            .enumerate()
            .map(|(idx, label)| (idx as StateId, label))
    }

    pub fn label(&self, state: StateId) -> Option<&StateLabel> {
        self.states.get_index(state as usize)
    }

    pub fn state_id(&self, label: &StateLabel) -> Option<StateId> {
        self.states
            .get_index_of(label)
            .map(|idx| idx as StateId)
    }

    /// Look up a state read from text by its plain name.
    pub fn state_named(&self, name: &str) -> Option<StateId> {
        self.state_id(&StateLabel::name(name))
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// Accepting states in declaration order.
    pub fn accept_states(&self) -> &[StateId] {
        &self.accept_order
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accept_states.contains(state)
    }

    /// Get the transition from a state on a symbol id.
    pub fn transition(&self, source: StateId, symbol: SymbolId) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    /// Resolve δ(state, symbol) for a symbol given by name.
    ///
    /// Fails with [`DfaError::UnknownSymbol`] when the symbol is not part of
    /// this automaton's alphabet and with [`DfaError::MissingTransition`]
    /// when the table has no entry for the pair.
    pub fn delta(&self, state: StateId, symbol: &str) -> Result<StateId> {
        let symbol_id = self
            .alphabet
            .id(symbol)
            .ok_or_else(|| DfaError::UnknownSymbol {
                symbol: symbol.to_owned(),
            })?;

        self.transition(state, symbol_id)
            .ok_or_else(|| DfaError::MissingTransition {
                state: self.describe(state),
                symbol: symbol.to_owned(),
            })
    }

    /// Get all transitions as an iterator. Order is unspecified.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .map(|(&(src, sym), &dst)| (src, sym, dst))
    }

    pub fn num_transitions(&self) -> usize {
        self.transitions.len()
    }

    /// Run the automaton over `word` and return the state it ends in.
    pub fn run<'a, I>(&self, word: I) -> Result<StateId>
    where
        I: IntoIterator<Item = &'a str>,
    {
        word.into_iter()
            .try_fold(self.start_state, |state, symbol| self.delta(state, symbol))
    }

    /// Check whether the automaton accepts `word`.
    pub fn accepts<'a, I>(&self, word: I) -> Result<bool>
    where
        I: IntoIterator<Item = &'a str>,
    {
        Ok(self.is_accepting(self.run(word)?))
    }

    /// Find all states reachable from the start state.
    pub fn reachable_states(&self) -> StateSet {
        let mut reachable = StateSet::with_capacity(self.num_states());
        let mut queue = VecDeque::new();
        queue.push_back(self.start_state);

        while let Some(state) = queue.pop_front() {
            if !reachable.insert(state) {
                continue;
            }

            for (symbol, _) in self.alphabet.iter() {
                if let Some(next) = self.transition(state, symbol) {
                    if !reachable.contains(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        reachable
    }

    /// Check if the DFA is empty (accepts no strings).
    pub fn is_empty(&self) -> bool {
        if self.accept_states.is_empty() {
            return true;
        }

        !self
            .reachable_states()
            .iter()
            .any(|state| self.is_accepting(state))
    }

    fn describe(&self, state: StateId) -> String {
        self.label(state)
            .map_or_else(|| format!("#{state}"), ToString::to_string)
    }
}

/// Incrementally assembles a [`DFA`].
#[derive(Debug, Clone, Default)]
pub struct DFABuilder {
    states: IndexSet<StateLabel>,
    alphabet: Alphabet,
    transitions: HashMap<(StateId, SymbolId), StateId>,
    start_state: Option<StateId>,
    accept_order: Vec<StateId>,
    accept_states: StateSet,
}

impl DFABuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with room for `num_states` states and
    /// `num_states * num_symbols` transitions.
    pub fn with_capacity(num_states: usize, num_symbols: usize) -> Self {
        Self {
            states: IndexSet::with_capacity(num_states),
            transitions: HashMap::with_capacity(num_states.saturating_mul(num_symbols)),
            accept_states: StateSet::with_capacity(num_states),
            ..Self::default()
        }
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self, label: impl Into<StateLabel>) -> Result<StateId> {
        let label = label.into();
        if self.states.contains(&label) {
            return Err(DfaError::DuplicateState {
                state: label.to_string(),
            });
        }
        let id = StateId::try_from(self.states.len()).map_err(|_| DfaError::TooManyStates {
            left: self.states.len(),
            right: 1,
        })?;
        self.states.insert(label);
        Ok(id)
    }

    /// Add a new symbol and return its ID.
    pub fn add_symbol(&mut self, symbol: &str) -> Result<SymbolId> {
        match self.alphabet.insert(symbol) {
            (id, true) => Ok(id),
            (_, false) => Err(DfaError::DuplicateSymbol {
                symbol: symbol.to_owned(),
            }),
        }
    }

    /// Add a symbol unless it is already present and return its ID.
    pub fn intern_symbol(&mut self, symbol: &str) -> SymbolId {
        self.alphabet.insert(symbol).0
    }

    pub fn state_id(&self, label: &StateLabel) -> Option<StateId> {
        self.states
            .get_index_of(label)
            .map(|idx| idx as StateId)
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn transition(&self, source: StateId, symbol: SymbolId) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    /// Add a transition. A later transition for the same (source, symbol)
    /// replaces the earlier one. Ids are checked by [`DFABuilder::build`].
    pub fn add_transition(&mut self, source: StateId, symbol: SymbolId, destination: StateId) {
        self.transitions.insert((source, symbol), destination);
    }

    /// Set the start state.
    pub fn set_start_state(&mut self, state: StateId) {
        self.start_state = Some(state);
    }

    /// Add a final (accepting) state. Returns `false` if it was already
    /// accepting.
    pub fn add_accept_state(&mut self, state: StateId) -> bool {
        if !self.accept_states.insert(state) {
            return false;
        }
        self.accept_order.push(state);
        true
    }

    /// Finish the automaton.
    ///
    /// Fails if no start state was set, or if the start state, an accepting
    /// state or a transition refers to a state or symbol id that was never
    /// added.
    pub fn build(self) -> Result<DFA> {
        let start_state = self.start_state.ok_or(DfaError::MissingStartState)?;
        self.check_state(start_state)?;
        for &state in &self.accept_order {
            self.check_state(state)?;
        }
        for (&(source, symbol), &destination) in &self.transitions {
            self.check_state(source)?;
            self.check_state(destination)?;
            if symbol as usize >= self.alphabet.len() {
                return Err(DfaError::UnknownSymbol {
                    symbol: format!("#{symbol}"),
                });
            }
        }

        Ok(DFA {
            states: self.states,
            alphabet: self.alphabet,
            transitions: self.transitions,
            start_state,
            accept_order: self.accept_order,
            accept_states: self.accept_states,
        })
    }

    fn check_state(&self, state: StateId) -> Result<()> {
        if (state as usize) < self.states.len() {
            Ok(())
        } else {
            Err(DfaError::UnknownState {
                state: format!("#{state}"),
            })
        }
    }
}
