//! State and symbol identifiers.
//!
//! States are opaque strings taken from the loaded definition; input and
//! stack symbols are single characters. The reserved epsilon marker `'λ'`
//! stands for "no symbol" and is never a member of any alphabet.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The reserved epsilon marker.
///
/// In the definition document it spells "consume no input" in a rule's
/// symbol position and "pop, push nothing" in a rewrite string. Declaring
/// it as an alphabet member is a configuration error, which is what keeps
/// it from ever colliding with a real symbol.
pub const EPSILON: char = 'λ';

/// An opaque state identifier.
///
/// The set of valid states is fixed when a definition is constructed;
/// a `State` value by itself carries no validity guarantee.
///
/// # Example
///
/// ```rust
/// use lockstep::core::State;
///
/// let state = State::new("q0");
/// assert_eq!(state.as_str(), "q0");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(String);

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for State {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for State {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single-character element of the input alphabet.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(char);

impl Symbol {
    pub fn new(c: char) -> Self {
        Self(c)
    }

    pub fn as_char(&self) -> char {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single-character element of the stack alphabet.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackSymbol(char);

impl StackSymbol {
    pub fn new(c: char) -> Self {
        Self(c)
    }

    pub fn as_char(&self) -> char {
        self.0
    }
}

impl fmt::Display for StackSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The symbol position of a pushdown transition key: a real input symbol,
/// or epsilon when the rule fires without consuming input.
///
/// # Example
///
/// ```rust
/// use lockstep::core::{InputSymbol, EPSILON};
///
/// assert!(InputSymbol::from_char(EPSILON).is_epsilon());
/// assert!(!InputSymbol::from_char('a').is_epsilon());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum InputSymbol {
    Epsilon,
    Symbol(Symbol),
}

impl InputSymbol {
    /// Interpret a character from a rule's symbol position, mapping the
    /// reserved marker to epsilon.
    pub fn from_char(c: char) -> Self {
        if c == EPSILON {
            Self::Epsilon
        } else {
            Self::Symbol(Symbol::new(c))
        }
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Self::Epsilon)
    }
}

impl From<Symbol> for InputSymbol {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl fmt::Display for InputSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Epsilon => write!(f, "{EPSILON}"),
            Self::Symbol(symbol) => write!(f, "{symbol}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_displays_its_name() {
        let state = State::new("q0");
        assert_eq!(state.to_string(), "q0");
        assert_eq!(state, State::from("q0"));
    }

    #[test]
    fn state_serializes_transparently() {
        let state = State::new("q1");
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, "\"q1\"");
        let back: State = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn symbol_wraps_a_single_character() {
        let symbol = Symbol::new('a');
        assert_eq!(symbol.as_char(), 'a');
        assert_eq!(symbol.to_string(), "a");
    }

    #[test]
    fn epsilon_character_maps_to_epsilon_input() {
        assert_eq!(InputSymbol::from_char(EPSILON), InputSymbol::Epsilon);
        assert_eq!(
            InputSymbol::from_char('b'),
            InputSymbol::Symbol(Symbol::new('b'))
        );
    }

    #[test]
    fn epsilon_input_displays_the_marker() {
        assert_eq!(InputSymbol::Epsilon.to_string(), "λ");
        assert_eq!(InputSymbol::from_char('a').to_string(), "a");
    }
}
