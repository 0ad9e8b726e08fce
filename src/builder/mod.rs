//! Builder API for ergonomic definition construction.
//!
//! The builders assemble a definition and its transition table in one
//! fluent pass, with missing-field errors before construction and the
//! usual configuration validation during it. Hosts that load documents
//! use the `document` module instead; the builders are for code that
//! constructs automata directly, tests included.

pub mod dfa;
pub mod error;
pub mod pda;

pub use dfa::DfaBuilder;
pub use error::BuildError;
pub use pda::PdaBuilder;
