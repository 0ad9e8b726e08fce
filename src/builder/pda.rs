//! Builder for pushdown-automaton definitions.

use super::error::BuildError;
use crate::core::{
    AcceptMode, ConfigError, InputSymbol, PdaDefinition, PdaKey, PdaOutcome, PdaTable, Rewrite,
    StackSymbol, State, Symbol,
};

/// Builder assembling a [`PdaDefinition`] and its [`PdaTable`] with a
/// fluent API.
///
/// Rules carry their rewrite as the document-format string; passing the
/// epsilon marker in the symbol position declares an epsilon rule.
///
/// # Example
///
/// ```rust
/// use lockstep::builder::PdaBuilder;
///
/// let (definition, table) = PdaBuilder::new()
///     .states(["p0", "p1"])
///     .symbols(['(', ')'])
///     .stack_symbols(['Z', 'x'])
///     .start("p0")
///     .start_stack('Z')
///     .accepting(["p1"])
///     .rule("p0", '(', 'Z', "p0", "xZ")
///     .rule("p0", '(', 'x', "p0", "xx")
///     .rule("p0", ')', 'x', "p0", "λ")
///     .rule("p0", 'λ', 'Z', "p1", "Z")
///     .build()
///     .unwrap();
///
/// assert_eq!(table.len(), 4);
/// assert_eq!(definition.start_stack().as_char(), 'Z');
/// ```
pub struct PdaBuilder {
    states: Vec<State>,
    symbols: Vec<Symbol>,
    stack_symbols: Vec<StackSymbol>,
    start: Option<State>,
    start_stack: Option<StackSymbol>,
    accepting: Vec<State>,
    accept_mode: AcceptMode,
    rules: Vec<(PdaKey, State, String)>,
}

impl PdaBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            symbols: Vec::new(),
            stack_symbols: Vec::new(),
            start: None,
            start_stack: None,
            accepting: Vec::new(),
            accept_mode: AcceptMode::default(),
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

    /// Declare several alphabet symbols at once.
    pub fn symbols(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.symbols.extend(chars.into_iter().map(Symbol::new));
        self
    }

    /// Declare several stack-alphabet symbols at once.
    pub fn stack_symbols(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.stack_symbols
            .extend(chars.into_iter().map(StackSymbol::new));
        self
    }

    /// Set the start state (required).
    pub fn start(mut self, name: impl Into<State>) -> Self {
        self.start = Some(name.into());
        self
    }

    /// Set the start stack symbol (required).
    pub fn start_stack(mut self, c: char) -> Self {
        self.start_stack = Some(StackSymbol::new(c));
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

    /// Choose the acceptance mode; final-state acceptance is the
    /// default.
    pub fn accept_mode(mut self, mode: AcceptMode) -> Self {
        self.accept_mode = mode;
        self
    }

    /// Add a transition rule. The symbol position accepts the epsilon
    /// marker; `rewrite` is the document-format rewrite string.
    pub fn rule(
        mut self,
        from: impl Into<State>,
        on: char,
        top: char,
        to: impl Into<State>,
        rewrite: &str,
    ) -> Self {
        self.rules.push((
            PdaKey {
                state: from.into(),
                input: InputSymbol::from_char(on),
                top: StackSymbol::new(top),
            },
            to.into(),
            rewrite.to_string(),
        ));
        self
    }

    /// Build the definition and table.
    /// Returns an error if required fields are missing or validation
    /// fails.
    pub fn build(self) -> Result<(PdaDefinition, PdaTable), BuildError> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }
        let start = self.start.ok_or(BuildError::MissingStartState)?;
        let start_stack = self.start_stack.ok_or(BuildError::MissingStartStackSymbol)?;

        let definition = PdaDefinition::new(
            self.states,
            self.symbols,
            start,
            self.accepting,
            self.stack_symbols,
            start_stack,
            self.accept_mode,
        )?;

        let mut pairs = Vec::with_capacity(self.rules.len());
        for (key, next, raw) in self.rules {
            let rewrite = Rewrite::parse(&raw).ok_or_else(|| ConfigError::EmptyRewrite {
                key: key.to_string(),
            })?;
            pairs.push((key, PdaOutcome { next, rewrite }));
        }
        let table = PdaTable::from_pairs(&definition, pairs)?;
        Ok((definition, table))
    }
}

impl Default for PdaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_validates_required_fields() {
        let result = PdaBuilder::new().build();
        assert!(matches!(result, Err(BuildError::NoStates)));

        let result = PdaBuilder::new().state("p0").build();
        assert!(matches!(result, Err(BuildError::MissingStartState)));

        let result = PdaBuilder::new().state("p0").start("p0").build();
        assert!(matches!(result, Err(BuildError::MissingStartStackSymbol)));
    }

    #[test]
    fn epsilon_marker_in_the_symbol_position_is_an_epsilon_rule() {
        let (_definition, table) = PdaBuilder::new()
            .states(["p0"])
            .symbols(['a'])
            .stack_symbols(['Z'])
            .start("p0")
            .start_stack('Z')
            .rule("p0", 'λ', 'Z', "p0", "Z")
            .build()
            .unwrap();

        let key = PdaKey {
            state: State::new("p0"),
            input: InputSymbol::Epsilon,
            top: StackSymbol::new('Z'),
        };
        assert!(table.lookup(&key).is_some());
    }

    #[test]
    fn empty_rewrite_strings_are_rejected() {
        let result = PdaBuilder::new()
            .states(["p0"])
            .symbols(['a'])
            .stack_symbols(['Z'])
            .start("p0")
            .start_stack('Z')
            .rule("p0", 'a', 'Z', "p0", "")
            .build();

        assert!(matches!(
            result,
            Err(BuildError::Config(ConfigError::EmptyRewrite { .. }))
        ));
    }

    #[test]
    fn rewrites_are_parsed_into_structured_outcomes() {
        let (_definition, table) = PdaBuilder::new()
            .states(["p0"])
            .symbols(['a'])
            .stack_symbols(['Z', 'x'])
            .start("p0")
            .start_stack('Z')
            .rule("p0", 'a', 'Z', "p0", "xZ")
            .build()
            .unwrap();

        let key = PdaKey {
            state: State::new("p0"),
            input: InputSymbol::from_char('a'),
            top: StackSymbol::new('Z'),
        };
        let outcome = table.lookup(&key).unwrap();
        assert_eq!(
            outcome.rewrite,
            Rewrite::Push(vec![StackSymbol::new('x'), StackSymbol::new('Z')])
        );
    }
}
