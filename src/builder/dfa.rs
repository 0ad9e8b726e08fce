//! Builder for finite-automaton definitions.

use super::error::BuildError;
use crate::core::{DfaDefinition, DfaKey, DfaTable, State, Symbol};

/// Builder assembling a [`DfaDefinition`] and its [`DfaTable`] with a
/// fluent API.
///
/// # Example
///
/// ```rust
/// use lockstep::builder::DfaBuilder;
///
/// let (definition, table) = DfaBuilder::new()
///     .states(["even", "odd"])
///     .symbols(['0', '1'])
///     .start("even")
///     .accepting(["even"])
///     .rule("even", '0', "odd")
///     .rule("odd", '0', "even")
///     .rule("even", '1', "even")
///     .rule("odd", '1', "odd")
///     .build()
///     .unwrap();
///
/// assert_eq!(table.len(), 4);
/// assert_eq!(definition.start().as_str(), "even");
/// ```
pub struct DfaBuilder {
    states: Vec<State>,
    symbols: Vec<Symbol>,
    start: Option<State>,
    accepting: Vec<State>,
    rules: Vec<(DfaKey, State)>,
}

impl DfaBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            symbols: Vec::new(),
            start: None,
            accepting: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Declare one state.
    pub fn state(mut self, name: impl Into<State>) -> Self {
        self.states.push(name.into());
        self
    }

    /// Declare several states at once.
    pub fn states<I, T>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<State>,
    {
        self.states.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declare one alphabet symbol.
    pub fn symbol(mut self, c: char) -> Self {
        self.symbols.push(Symbol::new(c));
        self
    }

    /// Declare several alphabet symbols at once.
    pub fn symbols(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.symbols.extend(chars.into_iter().map(Symbol::new));
        self
    }

    /// Set the start state (required).
    pub fn start(mut self, name: impl Into<State>) -> Self {
        self.start = Some(name.into());
        self
    }

    /// Declare the accepting states.
    pub fn accepting<I, T>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<State>,
    {
        self.accepting.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add a transition rule.
    pub fn rule(mut self, from: impl Into<State>, on: char, to: impl Into<State>) -> Self {
        self.rules.push((
            DfaKey {
                state: from.into(),
                symbol: Symbol::new(on),
            },
            to.into(),
        ));
        self
    }

    /// Build the definition and table.
    /// Returns an error if required fields are missing or validation
    /// fails.
    pub fn build(self) -> Result<(DfaDefinition, DfaTable), BuildError> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }
        let start = self.start.ok_or(BuildError::MissingStartState)?;

        let definition = DfaDefinition::new(self.states, self.symbols, start, self.accepting)?;
        let table = DfaTable::from_pairs(&definition, self.rules)?;
        Ok((definition, table))
    }
}

impl Default for DfaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
