//! Build errors for the definition builders.

use crate::core::ConfigError;
use thiserror::Error;

/// Errors that can occur when building definitions and tables.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("start state not specified. Call .start(state) before .build()")]
    MissingStartState,

    #[error("no states declared. Add at least one state")]
    NoStates,

    #[error("start stack symbol not specified. Call .start_stack(symbol) before .build()")]
    MissingStartStackSymbol,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
