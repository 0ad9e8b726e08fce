//! Configuration errors raised while constructing definitions and tables.

use thiserror::Error;

/// Errors detected while validating a definition or building a transition
/// table.
///
/// Configuration errors are fatal to the construction attempt that raised
/// them; no partial table is ever produced. They are fully recoverable by
/// reloading a corrected definition.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The same transition key appeared twice in the rule list.
    #[error("duplicate transition for {key}")]
    DuplicateKey { key: String },

    /// A key or outcome referenced a state or symbol that the definition
    /// does not declare.
    #[error("{kind} '{name}' is not declared in the {set}")]
    UndefinedReference {
        kind: &'static str,
        name: String,
        set: &'static str,
    },

    /// An alphabet entry that cannot serve as a symbol: longer than one
    /// character, or the reserved epsilon marker.
    #[error("'{value}' cannot be declared as an alphabet symbol")]
    InvalidSymbol { value: String },

    /// A stack rewrite rule with an empty right-hand side. Popping is
    /// spelled with the epsilon marker, never with an empty string.
    #[error("transition for {key} has an empty rewrite string")]
    EmptyRewrite { key: String },
}
