//! Definition document shapes.
//!
//! An automaton definition arrives as a JSON document. The finite
//! variant carries its transition function as a nested mapping:
//!
//! ```json
//! {
//!   "states": ["q0", "q1", "q2"],
//!   "alphabet": ["a", "b"],
//!   "start": "q0",
//!   "ends": ["q2"],
//!   "Func": {
//!     "q0": {"a": "q1"},
//!     "q1": {"b": "q2"}
//!   }
//! }
//! ```
//!
//! The pushdown variant carries a stack alphabet and a rule list of
//! 5-tuples `[state, symbol, stack_top, next_state, rewrite]`, with the
//! epsilon marker standing for "consume no input" in the symbol
//! position:
//!
//! ```json
//! {
//!   "states": ["p0", "p1"],
//!   "alphabet": ["0", "1"],
//!   "start": "p0",
//!   "ends": ["p1"],
//!   "in_stack": ["Z", "a"],
//!   "start_stack": "Z",
//!   "rules": [
//!     ["p0", "0", "Z", "p0", "aZ"],
//!     ["p0", "1", "a", "p0", "λ"],
//!     ["p0", "λ", "Z", "p1", "Z"]
//!   ]
//! }
//! ```
//!
//! Reading the file and parsing the JSON is the loader's job; compiling
//! a document runs the authoritative validation and produces the
//! definition and table the engines consume.

use crate::core::{
    AcceptMode, ConfigError, DfaDefinition, DfaKey, DfaTable, InputSymbol, PdaDefinition, PdaKey,
    PdaOutcome, PdaTable, Rewrite, StackSymbol, State, Symbol,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A finite-automaton definition document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DfaDocument {
    pub states: Vec<String>,
    pub alphabet: Vec<String>,
    pub start: String,
    pub ends: Vec<String>,
    #[serde(rename = "Func")]
    pub func: HashMap<String, HashMap<String, String>>,
}

impl DfaDocument {
    /// Parse a document from JSON text. Parse failures stay with the
    /// loader; this does not validate the automaton.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Validate the document and produce the definition and table.
    pub fn compile(&self) -> Result<(DfaDefinition, DfaTable), ConfigError> {
        let states = self.states.iter().map(|s| State::new(s.as_str()));
        let alphabet = self
            .alphabet
            .iter()
            .map(|s| symbol_of(s).map(Symbol::new))
            .collect::<Result<Vec<_>, _>>()?;
        let accepting = self.ends.iter().map(|s| State::new(s.as_str()));

        let definition =
            DfaDefinition::new(states, alphabet, State::new(self.start.as_str()), accepting)?;

        let mut pairs = Vec::new();
        for (state, row) in &self.func {
            for (symbol, next) in row {
                let key = DfaKey {
                    state: State::new(state.as_str()),
                    symbol: Symbol::new(symbol_of(symbol)?),
                };
                pairs.push((key, State::new(next.as_str())));
            }
        }
        let table = DfaTable::from_pairs(&definition, pairs)?;
        Ok((definition, table))
    }
}

/// A pushdown-automaton definition document.
///
/// `accept` is optional and defaults to final-state acceptance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdaDocument {
    pub states: Vec<String>,
    pub alphabet: Vec<String>,
    pub start: String,
    pub ends: Vec<String>,
    pub in_stack: Vec<String>,
    pub start_stack: String,
    #[serde(default)]
    pub accept: AcceptMode,
    pub rules: Vec<(String, String, String, String, String)>,
}

impl PdaDocument {
    /// Parse a document from JSON text. Parse failures stay with the
    /// loader; this does not validate the automaton.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Validate the document and produce the definition and table.
    pub fn compile(&self) -> Result<(PdaDefinition, PdaTable), ConfigError> {
        let states = self.states.iter().map(|s| State::new(s.as_str()));
        let alphabet = self
            .alphabet
            .iter()
            .map(|s| symbol_of(s).map(Symbol::new))
            .collect::<Result<Vec<_>, _>>()?;
        let accepting = self.ends.iter().map(|s| State::new(s.as_str()));
        let stack_alphabet = self
            .in_stack
            .iter()
            .map(|s| symbol_of(s).map(StackSymbol::new))
            .collect::<Result<Vec<_>, _>>()?;
        let start_stack = StackSymbol::new(symbol_of(&self.start_stack)?);

        let definition = PdaDefinition::new(
            states,
            alphabet,
            State::new(self.start.as_str()),
            accepting,
            stack_alphabet,
            start_stack,
            self.accept,
        )?;

        let mut pairs = Vec::with_capacity(self.rules.len());
        for (state, symbol, top, next, rewrite) in &self.rules {
            let key = PdaKey {
                state: State::new(state.as_str()),
                input: InputSymbol::from_char(symbol_of(symbol)?),
                top: StackSymbol::new(symbol_of(top)?),
            };
            let rewrite = Rewrite::parse(rewrite).ok_or_else(|| ConfigError::EmptyRewrite {
                key: key.to_string(),
            })?;
            pairs.push((
                key,
                PdaOutcome {
                    next: State::new(next.as_str()),
                    rewrite,
                },
            ));
        }
        let table = PdaTable::from_pairs(&definition, pairs)?;
        Ok((definition, table))
    }
}

/// A document symbol entry must be exactly one character.
fn symbol_of(value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::InvalidSymbol {
            value: value.to_string(),
        }),
    }
}
