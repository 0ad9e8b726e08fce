//! Step events, traces and verdicts.
//!
//! Every completed `step()` yields a [`StepEvent`] describing the
//! configuration before the step and what the step did. The [`Trace`]
//! collects the transition events of a run in order; terminal events
//! reach the caller through `step()`'s return value and the observer but
//! are not recorded, so a run rejected before its first transition has an
//! empty trace.

use super::stack::Stack;
use super::symbol::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a run was rejected.
///
/// Rejection is a normal terminal outcome, not an error: the input
/// simply does not belong to the automaton's language, or the
/// configuration ran off the defined transition relation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum RejectReason {
    /// The current state is not a member of the state set. Only
    /// reachable through external corruption; checked defensively.
    UnknownState,
    /// The next input character is not a member of the alphabet.
    SymbolNotInAlphabet,
    /// The stack top is not a member of the stack alphabet.
    StackSymbolNotInStackAlphabet,
    /// No transition is defined for the current configuration.
    NoMatchingTransition,
    /// The machine halted while input was left to read.
    InputNotFullyConsumed,
    /// The run ended outside an accepting configuration.
    NotAccepting,
    /// The stack was emptied before the input was consumed.
    StackExhausted,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::UnknownState => "current state is not part of the state set",
            Self::SymbolNotInAlphabet => "input symbol is not part of the alphabet",
            Self::StackSymbolNotInStackAlphabet => "stack top is not part of the stack alphabet",
            Self::NoMatchingTransition => "no transition is defined for this configuration",
            Self::InputNotFullyConsumed => "the machine halted with input left to read",
            Self::NotAccepting => "the run ended outside an accepting state",
            Self::StackExhausted => "the stack was emptied before the input was consumed",
        };
        f.write_str(message)
    }
}

/// Final result of a completed run.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Verdict {
    Accepted,
    Rejected(RejectReason),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => f.write_str("accepted"),
            Self::Rejected(reason) => write!(f, "rejected: {reason}"),
        }
    }
}

/// What a single step did.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum StepOutcome {
    /// A transition was taken; the run continues.
    Transitioned,
    /// The run reached its terminal accepting verdict.
    Accepted,
    /// The run reached a terminal rejection.
    Rejected(RejectReason),
}

/// Record of one completed step.
///
/// The pre-step configuration is always present; the matched key and
/// post-step fields are present only when a transition was taken. Stack
/// snapshots are present only for pushdown runs.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct StepEvent<K> {
    pub state_before: State,
    pub remaining_before: String,
    pub stack_before: Option<Stack>,
    pub matched_key: Option<K>,
    pub state_after: Option<State>,
    pub stack_after: Option<Stack>,
    pub outcome: StepOutcome,
}

impl<K> StepEvent<K> {
    /// Whether this event records a taken transition, as opposed to a
    /// terminal verdict.
    pub fn is_transition(&self) -> bool {
        matches!(self.outcome, StepOutcome::Transitioned)
    }
}

/// Ordered sequence of the transition events of one run.
///
/// Recording is pure: `record` returns a new trace and leaves the
/// original untouched.
///
/// # Example
///
/// ```rust
/// use lockstep::builder::DfaBuilder;
/// use lockstep::core::State;
///
/// let (definition, table) = DfaBuilder::new()
///     .states(["q0", "q1"])
///     .symbols(['a'])
///     .start("q0")
///     .accepting(["q1"])
///     .rule("q0", 'a', "q1")
///     .build()
///     .unwrap();
///
/// let mut run = lockstep::DfaRun::new(&table, &definition, "a");
/// let (trace, verdict) = run.run();
///
/// assert!(verdict.is_accepted());
/// assert_eq!(trace.len(), 1);
/// assert_eq!(
///     trace.path(),
///     vec![&State::new("q0"), &State::new("q1")]
/// );
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Trace<K> {
    events: Vec<StepEvent<K>>,
}

impl<K> Default for Trace<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Trace<K> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Record an event, returning a new trace.
    pub fn record(&self, event: StepEvent<K>) -> Self
    where
        K: Clone,
    {
        let mut events = self.events.clone();
        events.push(event);
        Self { events }
    }

    pub fn events(&self) -> &[StepEvent<K>] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The states visited, in order: the first event's pre-state, then
    /// every post-state.
    pub fn path(&self) -> Vec<&State> {
        let mut path = Vec::new();
        if let Some(first) = self.events.first() {
            path.push(&first.state_before);
        }
        for event in &self.events {
            if let Some(next) = &event.state_after {
                path.push(next);
            }
        }
        path
    }
}
