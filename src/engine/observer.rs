//! Step observation sinks.

use crate::core::{StepEvent, StepOutcome, EPSILON};
use std::fmt;

/// Consumer of step events, called synchronously once per completed
/// step, in input order, before the engine proceeds.
///
/// The engine makes no assumption about how long an observer takes and
/// never retries a call. Whatever an observer does with the event
/// (rendering, highlighting a table cell, pacing an animation) is the
/// driver's concern.
pub trait StepObserver<K> {
    fn on_step(&mut self, event: &StepEvent<K>);
}

/// Observer that discards every event.
pub struct NullObserver;

impl<K> StepObserver<K> for NullObserver {
    fn on_step(&mut self, _event: &StepEvent<K>) {}
}

/// Observer that renders each event as human-readable log lines.
///
/// Each step contributes a configuration line `(state, remaining)` and
/// either a transition line in `δ(...) -> state` notation or the final
/// verdict line. An exhausted input is shown as the epsilon marker.
///
/// # Example
///
/// ```rust
/// use lockstep::builder::DfaBuilder;
/// use lockstep::{DfaRun, Transcript};
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
/// let mut transcript = Transcript::new();
/// let mut run = DfaRun::new(&table, &definition, "a");
/// run.run_observed(&mut transcript);
///
/// assert_eq!(
///     transcript.lines(),
///     &[
///         "(q0, a)".to_string(),
///         "δ(q0,a) -> q1".to_string(),
///         "(q1, λ)".to_string(),
///         "input accepted".to_string(),
///     ]
/// );
/// ```
#[derive(Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl<K: fmt::Display> StepObserver<K> for Transcript {
    fn on_step(&mut self, event: &StepEvent<K>) {
        let remaining = if event.remaining_before.is_empty() {
            EPSILON.to_string()
        } else {
            event.remaining_before.clone()
        };
        self.lines
            .push(format!("({}, {})", event.state_before, remaining));

        match &event.outcome {
            StepOutcome::Transitioned => {
                if let (Some(key), Some(next)) = (&event.matched_key, &event.state_after) {
                    self.lines.push(format!("{key} -> {next}"));
                }
            }
            StepOutcome::Accepted => self.lines.push("input accepted".to_string()),
            StepOutcome::Rejected(reason) => {
                self.lines.push(format!("input rejected: {reason}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DfaKey, State, Symbol};

    fn event(outcome: StepOutcome) -> StepEvent<DfaKey> {
        StepEvent {
            state_before: State::new("q0"),
            remaining_before: "ab".to_string(),
            stack_before: None,
            matched_key: Some(DfaKey {
                state: State::new("q0"),
                symbol: Symbol::new('a'),
            }),
            state_after: Some(State::new("q1")),
            stack_after: None,
            outcome,
        }
    }

    #[test]
    fn null_observer_ignores_events() {
        let mut observer = NullObserver;
        observer.on_step(&event(StepOutcome::Transitioned));
    }

    #[test]
    fn transcript_renders_transition_lines() {
        let mut transcript = Transcript::new();
        transcript.on_step(&event(StepOutcome::Transitioned));

        assert_eq!(
            transcript.lines(),
            &["(q0, ab)".to_string(), "δ(q0,a) -> q1".to_string()]
        );
    }

    #[test]
    fn transcript_renders_verdict_lines() {
        let mut transcript = Transcript::new();
        let mut terminal = event(StepOutcome::Accepted);
        terminal.remaining_before = String::new();
        terminal.matched_key = None;
        terminal.state_after = None;
        transcript.on_step(&terminal);

        assert_eq!(
            transcript.lines(),
            &["(q0, λ)".to_string(), "input accepted".to_string()]
        );
    }
}
