//! Cross-product construction over two DFAs.

use crate::error::{DfaError, Result};
use crate::formlang::dfa::{DFA, DFABuilder};
use crate::formlang::state::{StateId, StateLabel};
use crate::formlang::symbol::SymbolId;
use tracing::debug;

/// Boolean operation deciding which composite states accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductOp {
    /// Accept when either operand accepts.
    #[default]
    Union,
    /// Accept when both operands accept.
    Intersection,
    /// Accept when the left operand accepts and the right one does not.
    Difference,
}

impl ProductOp {
    pub fn accepts(self, left: bool, right: bool) -> bool {
        match self {
            Self::Union => left || right,
            Self::Intersection => left && right,
            Self::Difference => left && !right,
        }
    }
}

/// Maps a pair of operand states to the id of their composite state.
///
/// Composite states are laid out row-major with the left operand as the
/// outer loop, so `(a, b)` lives at `a * |right| + b`.
#[derive(Debug, Clone, Copy)]
struct PairIndex {
    width: StateId,
}

impl PairIndex {
    fn new(left: &DFA, right: &DFA) -> Result<Self> {
        let too_many = || DfaError::TooManyStates {
            left: left.num_states(),
            right: right.num_states(),
        };

        let total = left
            .num_states()
            .checked_mul(right.num_states())
            .ok_or_else(too_many)?;
        StateId::try_from(total).map_err(|_| too_many())?;

        Ok(Self {
            width: right.num_states() as StateId,
        })
    }

    fn compose(self, left: StateId, right: StateId) -> StateId {
        left * self.width + right
    }
}

/// Build the union of two DFAs with the cross-product construction.
///
/// The result accepts a word iff `left` or `right` accepts it. Composite
/// states are enumerated with `left` as the outer loop, the alphabet is
/// `left`'s symbols followed by the new symbols of `right`, and accepting
/// states are listed as `F_left x Q_right` followed by the remaining
/// `Q_left x F_right`.
///
/// Every symbol of the combined alphabet must have a transition in both
/// operands; a missing one fails the whole construction.
pub fn union(left: &DFA, right: &DFA) -> Result<DFA> {
    product(left, right, ProductOp::Union)
}

/// Build the product automaton of `left` and `right` under `op`.
pub fn product(left: &DFA, right: &DFA, op: ProductOp) -> Result<DFA> {
    let index = PairIndex::new(left, right)?;
    let mut builder = DFABuilder::with_capacity(
        left.num_states() * right.num_states(),
        left.alphabet().len() + right.alphabet().len(),
    );

    for (_, a) in left.states() {
        for (_, b) in right.states() {
            builder.add_state(StateLabel::pair(a, b))?;
        }
    }

    let mut symbols: Vec<(SymbolId, &str)> = Vec::new();
    for (_, symbol) in left.alphabet().iter().chain(right.alphabet().iter()) {
        if !builder.alphabet().contains(symbol) {
            symbols.push((builder.intern_symbol(symbol), symbol));
        }
    }

    for (a, _) in left.states() {
        for (b, _) in right.states() {
            let source = index.compose(a, b);
            for &(symbol, name) in &symbols {
                let next_a = left.delta(a, name)?;
                let next_b = right.delta(b, name)?;
                builder.add_transition(source, symbol, index.compose(next_a, next_b));
            }
        }
    }

    builder.set_start_state(index.compose(left.start_state(), right.start_state()));

    match op {
        ProductOp::Union => {
            for &a in left.accept_states() {
                for (b, _) in right.states() {
                    builder.add_accept_state(index.compose(a, b));
                }
            }
            for &b in right.accept_states() {
                for (a, _) in left.states() {
                    builder.add_accept_state(index.compose(a, b));
                }
            }
        }
        ProductOp::Intersection | ProductOp::Difference => {
            for (a, _) in left.states() {
                for (b, _) in right.states() {
                    if op.accepts(left.is_accepting(a), right.is_accepting(b)) {
                        builder.add_accept_state(index.compose(a, b));
                    }
                }
            }
        }
    }

    let dfa = builder.build()?;
    debug!(
        ?op,
        left_states = left.num_states(),
        right_states = right.num_states(),
        states = dfa.num_states(),
        symbols = dfa.alphabet().len(),
        accepting = dfa.accept_states().len(),
        "built product automaton"
    );
    Ok(dfa)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a DFA over the given symbols from `(source, symbol, destination)`
    /// triples. The first state is the start state.
    fn dfa(
        states: &[&str],
        symbols: &[&str],
        delta: &[(&str, &str, &str)],
        accept: &[&str],
    ) -> DFA {
        let mut builder = DFABuilder::new();
        for &state in states {
            builder.add_state(state).unwrap();
        }
        for &symbol in symbols {
            builder.add_symbol(symbol).unwrap();
        }
        for &(src, sym, dst) in delta {
            let src = builder.state_id(&src.into()).unwrap();
            let dst = builder.state_id(&dst.into()).unwrap();
            let sym = builder.alphabet().id(sym).unwrap();
            builder.add_transition(src, sym, dst);
        }
        builder.set_start_state(0);
        for &state in accept {
            let id = builder.state_id(&state.into()).unwrap();
            builder.add_accept_state(id);
        }
        builder.build().unwrap()
    }

    /// Odd number of 1s.
    fn odd_ones() -> DFA {
        dfa(
            &["p0", "p1"],
            &["0", "1"],
            &[
                ("p0", "0", "p0"),
                ("p0", "1", "p1"),
                ("p1", "0", "p1"),
                ("p1", "1", "p0"),
            ],
            &["p1"],
        )
    }

    /// Odd number of 0s.
    fn odd_zeros() -> DFA {
        dfa(
            &["q0", "q1"],
            &["0", "1"],
            &[
                ("q0", "0", "q1"),
                ("q0", "1", "q0"),
                ("q1", "0", "q0"),
                ("q1", "1", "q1"),
            ],
            &["q1"],
        )
    }

    fn rendered_states(dfa: &DFA) -> Vec<String> {
        dfa.states().map(|(_, label)| label.to_string()).collect()
    }

    fn rendered_accept(dfa: &DFA) -> Vec<String> {
        dfa.accept_states()
            .iter()
            .map(|&state| dfa.label(state).unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_union_parity() {
        let union = union(&odd_ones(), &odd_zeros()).unwrap();

        assert_eq!(rendered_states(&union), ["p0q0", "p0q1", "p1q0", "p1q1"]);
        assert_eq!(union.label(union.start_state()).unwrap().to_string(), "p0q0");
        assert_eq!(rendered_accept(&union), ["p1q0", "p1q1", "p0q1"]);

        let after_0 = union.delta(union.start_state(), "0").unwrap();
        assert_eq!(union.label(after_0).unwrap().to_string(), "p0q1");
        let after_01 = union.delta(after_0, "1").unwrap();
        assert_eq!(union.label(after_01).unwrap().to_string(), "p1q1");

        assert!(union.accepts(["0", "1"]).unwrap());
        assert!(union.accepts(["0"]).unwrap());
        assert!(!union.accepts(["0", "0", "1", "1"]).unwrap());
        assert!(!union.accepts(Vec::<&str>::new()).unwrap());
    }

    #[test]
    fn test_union_is_total() {
        let union = union(&odd_ones(), &odd_zeros()).unwrap();
        assert_eq!(union.num_transitions(), 4 * 2);
        for (state, _) in union.states() {
            for (_, symbol) in union.alphabet().iter() {
                assert!(union.delta(state, symbol).is_ok());
            }
        }
    }

    #[test]
    fn test_alphabet_is_left_first() {
        let left = dfa(
            &["l"],
            &["b", "a"],
            &[("l", "b", "l"), ("l", "a", "l")],
            &[],
        );
        let right = dfa(
            &["r"],
            &["a", "b"],
            &[("r", "a", "r"), ("r", "b", "r")],
            &["r"],
        );

        let union = union(&left, &right).unwrap();
        let symbols: Vec<_> = union.alphabet().iter().map(|(_, s)| s).collect();
        assert_eq!(symbols, ["b", "a"]);
    }

    #[test]
    fn test_symbol_missing_from_one_operand() {
        let left = dfa(
            &["l"],
            &["a", "b"],
            &[("l", "a", "l"), ("l", "b", "l")],
            &["l"],
        );
        let right = dfa(&["r"], &["a"], &[("r", "a", "r")], &[]);

        let err = union(&left, &right).unwrap_err();
        assert!(matches!(err, DfaError::UnknownSymbol { symbol } if symbol == "b"));
    }

    #[test]
    fn test_partial_table_fails() {
        let left = dfa(&["l0", "l1"], &["a"], &[("l0", "a", "l1")], &["l1"]);
        let right = dfa(&["r"], &["a"], &[("r", "a", "r")], &[]);

        let err = union(&left, &right).unwrap_err();
        assert!(matches!(
            err,
            DfaError::MissingTransition { state, symbol } if state == "l1" && symbol == "a"
        ));
    }

    #[test]
    fn test_ambiguous_labels_stay_distinct() {
        let left = dfa(
            &["A", "AB"],
            &["x"],
            &[("A", "x", "AB"), ("AB", "x", "A")],
            &["AB"],
        );
        let right = dfa(
            &["BC", "C"],
            &["x"],
            &[("BC", "x", "C"), ("C", "x", "BC")],
            &[],
        );

        let union = union(&left, &right).unwrap();
        assert_eq!(union.num_states(), 4);
        assert_eq!(rendered_states(&union), ["ABC", "AC", "ABBC", "ABC"]);
        // (A, BC) rejects, (AB, C) accepts, despite sharing a rendering.
        assert!(!union.is_accepting(0));
        assert!(union.is_accepting(3));
    }

    #[test]
    fn test_intersection_and_difference() {
        let both = product(&odd_ones(), &odd_zeros(), ProductOp::Intersection).unwrap();
        assert_eq!(rendered_accept(&both), ["p1q1"]);
        assert!(both.accepts(["0", "1"]).unwrap());
        assert!(!both.accepts(["1"]).unwrap());

        let diff = product(&odd_ones(), &odd_zeros(), ProductOp::Difference).unwrap();
        assert_eq!(rendered_accept(&diff), ["p1q0"]);
        assert!(diff.accepts(["1"]).unwrap());
        assert!(!diff.accepts(["0", "1"]).unwrap());
    }

    #[test]
    fn test_operands_untouched() {
        let left = odd_ones();
        let right = odd_zeros();
        let _ = union(&left, &right).unwrap();

        assert_eq!(rendered_states(&left), ["p0", "p1"]);
        assert_eq!(rendered_accept(&right), ["q1"]);
    }
}
