//! Validated automaton definitions.
//!
//! A definition fixes the membership sets a run is interpreted against:
//! states, input alphabet, start and accepting states, and for pushdown
//! automata the stack alphabet and start stack symbol. All referential
//! invariants are checked at construction; violations are configuration
//! errors, never run-time surprises.

use super::error::ConfigError;
use super::symbol::{State, StackSymbol, Symbol, EPSILON};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Definition of a deterministic finite automaton.
///
/// # Example
///
/// ```rust
/// use lockstep::core::{DfaDefinition, State, Symbol};
///
/// let definition = DfaDefinition::new(
///     ["q0", "q1"].map(State::from),
///     ['a', 'b'].map(Symbol::new),
///     State::new("q0"),
///     [State::new("q1")],
/// )
/// .unwrap();
///
/// assert!(definition.has_state(&State::new("q0")));
/// assert!(definition.is_accepting(&State::new("q1")));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DfaDefinition {
    states: HashSet<State>,
    alphabet: HashSet<Symbol>,
    start: State,
    accepting: HashSet<State>,
}

impl DfaDefinition {
    /// Build a definition, validating that the start state and every
    /// accepting state are declared and that the alphabet does not claim
    /// the reserved epsilon marker.
    pub fn new<S, A, F>(
        states: S,
        alphabet: A,
        start: State,
        accepting: F,
    ) -> Result<Self, ConfigError>
    where
        S: IntoIterator<Item = State>,
        A: IntoIterator<Item = Symbol>,
        F: IntoIterator<Item = State>,
    {
        let states: HashSet<State> = states.into_iter().collect();
        let alphabet: HashSet<Symbol> = alphabet.into_iter().collect();
        let accepting: HashSet<State> = accepting.into_iter().collect();

        check_alphabet(&alphabet)?;
        check_member(&states, &start)?;
        for state in &accepting {
            check_member(&states, state)?;
        }

        Ok(Self {
            states,
            alphabet,
            start,
            accepting,
        })
    }

    pub fn start(&self) -> &State {
        &self.start
    }

    pub fn has_state(&self, state: &State) -> bool {
        self.states.contains(state)
    }

    pub fn has_symbol(&self, symbol: Symbol) -> bool {
        self.alphabet.contains(&symbol)
    }

    pub fn is_accepting(&self, state: &State) -> bool {
        self.accepting.contains(state)
    }

    pub fn states(&self) -> &HashSet<State> {
        &self.states
    }

    pub fn alphabet(&self) -> &HashSet<Symbol> {
        &self.alphabet
    }
}

/// How a pushdown run decides acceptance once the input is consumed.
///
/// `FinalState` is the default: the run accepts when it halts in an
/// accepting state. `EmptyStack`
/// accepts when the run halts having drained its stack, regardless of
/// the halting state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptMode {
    #[default]
    FinalState,
    EmptyStack,
}

/// Definition of a deterministic pushdown automaton.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PdaDefinition {
    states: HashSet<State>,
    alphabet: HashSet<Symbol>,
    start: State,
    accepting: HashSet<State>,
    stack_alphabet: HashSet<StackSymbol>,
    start_stack: StackSymbol,
    accept_mode: AcceptMode,
}

impl PdaDefinition {
    /// Build a definition. On top of the finite-automaton checks, the
    /// stack alphabet must not claim the epsilon marker and the start
    /// stack symbol must be declared.
    pub fn new<S, A, F, G>(
        states: S,
        alphabet: A,
        start: State,
        accepting: F,
        stack_alphabet: G,
        start_stack: StackSymbol,
        accept_mode: AcceptMode,
    ) -> Result<Self, ConfigError>
    where
        S: IntoIterator<Item = State>,
        A: IntoIterator<Item = Symbol>,
        F: IntoIterator<Item = State>,
        G: IntoIterator<Item = StackSymbol>,
    {
        let states: HashSet<State> = states.into_iter().collect();
        let alphabet: HashSet<Symbol> = alphabet.into_iter().collect();
        let accepting: HashSet<State> = accepting.into_iter().collect();
        let stack_alphabet: HashSet<StackSymbol> = stack_alphabet.into_iter().collect();

        check_alphabet(&alphabet)?;
        check_member(&states, &start)?;
        for state in &accepting {
            check_member(&states, state)?;
        }
        if stack_alphabet.contains(&StackSymbol::new(EPSILON)) {
            return Err(ConfigError::InvalidSymbol {
                value: EPSILON.to_string(),
            });
        }
        if !stack_alphabet.contains(&start_stack) {
            return Err(ConfigError::UndefinedReference {
                kind: "stack symbol",
                name: start_stack.to_string(),
                set: "stack alphabet",
            });
        }

        Ok(Self {
            states,
            alphabet,
            start,
            accepting,
            stack_alphabet,
            start_stack,
            accept_mode,
        })
    }

    pub fn start(&self) -> &State {
        &self.start
    }

    pub fn start_stack(&self) -> StackSymbol {
        self.start_stack
    }

    pub fn accept_mode(&self) -> AcceptMode {
        self.accept_mode
    }

    pub fn has_state(&self, state: &State) -> bool {
        self.states.contains(state)
    }

    pub fn has_symbol(&self, symbol: Symbol) -> bool {
        self.alphabet.contains(&symbol)
    }

    pub fn has_stack_symbol(&self, symbol: StackSymbol) -> bool {
        self.stack_alphabet.contains(&symbol)
    }

    pub fn is_accepting(&self, state: &State) -> bool {
        self.accepting.contains(state)
    }

    pub fn states(&self) -> &HashSet<State> {
        &self.states
    }
}

fn check_alphabet(alphabet: &HashSet<Symbol>) -> Result<(), ConfigError> {
    if alphabet.contains(&Symbol::new(EPSILON)) {
        return Err(ConfigError::InvalidSymbol {
            value: EPSILON.to_string(),
        });
    }
    Ok(())
}

fn check_member(states: &HashSet<State>, state: &State) -> Result<(), ConfigError> {
    if !states.contains(state) {
        return Err(ConfigError::UndefinedReference {
            kind: "state",
            name: state.to_string(),
            set: "state set",
        });
    }
    Ok(())
}
