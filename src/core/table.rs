//! Transition tables: immutable, validated, queryable.
//!
//! A table is built once from `(key, outcome)` pairs against a governing
//! definition and never mutated afterwards. Lookup is an exact key match;
//! there is no prefix or text matching anywhere in the engine.

use super::definition::{DfaDefinition, PdaDefinition};
use super::error::ConfigError;
use super::symbol::{InputSymbol, StackSymbol, State, Symbol, EPSILON};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Membership check of a key or outcome against a definition.
///
/// Implemented by every key and outcome shape; table construction runs
/// these checks so that a constructed table can only reference declared
/// states and symbols.
pub trait Declared<D> {
    fn check(&self, definition: &D) -> Result<(), ConfigError>;
}

/// Transition key of a finite automaton: `(state, symbol)`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DfaKey {
    pub state: State,
    pub symbol: Symbol,
}

impl fmt::Display for DfaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "δ({},{})", self.state, self.symbol)
    }
}

impl Declared<DfaDefinition> for DfaKey {
    fn check(&self, definition: &DfaDefinition) -> Result<(), ConfigError> {
        check_state(definition.has_state(&self.state), &self.state)?;
        if !definition.has_symbol(self.symbol) {
            return Err(undeclared_symbol(self.symbol));
        }
        Ok(())
    }
}

impl Declared<DfaDefinition> for State {
    fn check(&self, definition: &DfaDefinition) -> Result<(), ConfigError> {
        check_state(definition.has_state(self), self)
    }
}

/// Transition key of a pushdown automaton:
/// `(state, symbol-or-epsilon, stack top)`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct PdaKey {
    pub state: State,
    pub input: InputSymbol,
    pub top: StackSymbol,
}

impl fmt::Display for PdaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "δ({},{},{})", self.state, self.input, self.top)
    }
}

impl Declared<PdaDefinition> for PdaKey {
    fn check(&self, definition: &PdaDefinition) -> Result<(), ConfigError> {
        check_state(definition.has_state(&self.state), &self.state)?;
        if let InputSymbol::Symbol(symbol) = self.input {
            if !definition.has_symbol(symbol) {
                return Err(undeclared_symbol(symbol));
            }
        }
        check_stack_symbol(definition, self.top)
    }
}

/// The parsed right-hand side of a pushdown rule.
///
/// The document encoding is a string over the stack alphabet with three
/// shapes, where `X` is the matched top symbol:
///
/// - the epsilon marker alone: pop `X`, push nothing;
/// - a single symbol: pop `X`, push that symbol in its place;
/// - two or more symbols: `X` is NOT popped. A trailing symbol equal to
///   `X` is dropped (it denotes the existing top staying put); the rest
///   are pushed so the string's first symbol ends up on top.
///
/// The multi-symbol branch never pops the matched top, unlike the
/// single-symbol branch. The asymmetry is observed behavior and is kept
/// as is.
///
/// # Example
///
/// ```rust
/// use lockstep::core::{Rewrite, StackSymbol};
///
/// assert_eq!(Rewrite::parse("λ"), Some(Rewrite::Pop));
/// assert_eq!(
///     Rewrite::parse("a"),
///     Some(Rewrite::Replace(StackSymbol::new('a')))
/// );
/// assert_eq!(
///     Rewrite::parse("aZ"),
///     Some(Rewrite::Push(vec![StackSymbol::new('a'), StackSymbol::new('Z')]))
/// );
/// assert_eq!(Rewrite::parse(""), None);
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Rewrite {
    Pop,
    Replace(StackSymbol),
    Push(Vec<StackSymbol>),
}

impl Rewrite {
    /// Parse a rewrite string. Returns `None` for an empty string, which
    /// has no meaning in the encoding.
    pub fn parse(raw: &str) -> Option<Self> {
        let symbols: Vec<char> = raw.chars().collect();
        match symbols.as_slice() {
            [] => None,
            [EPSILON] => Some(Self::Pop),
            [one] => Some(Self::Replace(StackSymbol::new(*one))),
            many => Some(Self::Push(
                many.iter().map(|c| StackSymbol::new(*c)).collect(),
            )),
        }
    }
}

/// Transition outcome of a pushdown automaton: next state plus the
/// parsed stack rewrite.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PdaOutcome {
    pub next: State,
    pub rewrite: Rewrite,
}

impl Declared<PdaDefinition> for PdaOutcome {
    fn check(&self, definition: &PdaDefinition) -> Result<(), ConfigError> {
        check_state(definition.has_state(&self.next), &self.next)?;
        match &self.rewrite {
            Rewrite::Pop => Ok(()),
            Rewrite::Replace(symbol) => check_stack_symbol(definition, *symbol),
            Rewrite::Push(symbols) => {
                for symbol in symbols {
                    check_stack_symbol(definition, *symbol)?;
                }
                Ok(())
            }
        }
    }
}

fn check_state(declared: bool, state: &State) -> Result<(), ConfigError> {
    if declared {
        Ok(())
    } else {
        Err(ConfigError::UndefinedReference {
            kind: "state",
            name: state.to_string(),
            set: "state set",
        })
    }
}

fn undeclared_symbol(symbol: Symbol) -> ConfigError {
    ConfigError::UndefinedReference {
        kind: "symbol",
        name: symbol.to_string(),
        set: "alphabet",
    }
}

fn check_stack_symbol(definition: &PdaDefinition, symbol: StackSymbol) -> Result<(), ConfigError> {
    if definition.has_stack_symbol(symbol) {
        Ok(())
    } else {
        Err(ConfigError::UndefinedReference {
            kind: "stack symbol",
            name: symbol.to_string(),
            set: "stack alphabet",
        })
    }
}

/// An immutable mapping from transition keys to transition outcomes.
///
/// Duplicate keys and undeclared references are configuration errors at
/// construction; `lookup` is pure and O(1) amortized.
#[derive(Clone, Debug)]
pub struct TransitionTable<K, O> {
    entries: HashMap<K, O>,
}

impl<K, O> TransitionTable<K, O>
where
    K: Eq + Hash + fmt::Display,
{
    /// Build a table from `(key, outcome)` pairs, validating every
    /// reference against the definition.
    pub fn from_pairs<D>(
        definition: &D,
        pairs: impl IntoIterator<Item = (K, O)>,
    ) -> Result<Self, ConfigError>
    where
        K: Declared<D>,
        O: Declared<D>,
    {
        let mut entries = HashMap::new();
        for (key, outcome) in pairs {
            key.check(definition)?;
            outcome.check(definition)?;
            if entries.contains_key(&key) {
                return Err(ConfigError::DuplicateKey {
                    key: key.to_string(),
                });
            }
            entries.insert(key, outcome);
        }
        Ok(Self { entries })
    }

    /// Exact-match lookup. Absence means the machine has no move for
    /// this configuration.
    pub fn lookup(&self, key: &K) -> Option<&O> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &O)> {
        self.entries.iter()
    }
}

/// Table of a deterministic finite automaton.
pub type DfaTable = TransitionTable<DfaKey, State>;

/// Table of a deterministic pushdown automaton.
pub type PdaTable = TransitionTable<PdaKey, PdaOutcome>;
