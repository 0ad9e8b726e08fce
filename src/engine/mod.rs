//! Step-by-step interpreters for the two automaton classes.
//!
//! A run owns its remaining input (and stack, for pushdown runs) and
//! walks an immutable transition table one step at a time. Runs are
//! synchronous and never touch a clock; any pacing between visible
//! steps belongs to the driver, between its calls to `step()`.

mod dfa;
mod observer;
mod pda;

pub use dfa::DfaRun;
pub use observer::{NullObserver, StepObserver, Transcript};
pub use pda::PdaRun;

use crate::core::Verdict;
use thiserror::Error;

/// Lifecycle of a run, distinct from the automaton's own states.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RunStatus {
    /// The run can take further steps.
    Running,
    /// The run reached its verdict; `step()` is no longer valid.
    Finished(Verdict),
}

/// Contract violations by the driver.
///
/// These are programming errors, not data problems: the input and the
/// definition have nothing to do with them.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("step() called after the run reached a terminal verdict")]
    AlreadyTerminal,
}
