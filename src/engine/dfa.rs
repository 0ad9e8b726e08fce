//! The finite-automaton interpreter.

use super::observer::{NullObserver, StepObserver};
use super::{RunStatus, UsageError};
use crate::checkpoint::{RunSnapshot, SnapshotError, SNAPSHOT_VERSION};
use crate::core::{
    DfaDefinition, DfaKey, DfaTable, RejectReason, State, StepEvent, StepOutcome, Symbol, Trace,
    Verdict,
};
use chrono::Utc;
use std::collections::VecDeque;
use uuid::Uuid;

/// One in-progress run of an input string through a finite automaton.
///
/// A run borrows its table and definition (both immutable) and
/// exclusively owns its remaining input and trace. Stepping is
/// synchronous; each call advances the machine by at most one consumed
/// symbol and reports what happened.
///
/// # Example
///
/// ```rust
/// use lockstep::builder::DfaBuilder;
/// use lockstep::DfaRun;
///
/// let (definition, table) = DfaBuilder::new()
///     .states(["q0", "q1", "q2"])
///     .symbols(['a', 'b'])
///     .start("q0")
///     .accepting(["q2"])
///     .rule("q0", 'a', "q1")
///     .rule("q1", 'b', "q2")
///     .build()
///     .unwrap();
///
/// let mut run = DfaRun::new(&table, &definition, "ab");
/// let (trace, verdict) = run.run();
///
/// assert!(verdict.is_accepted());
/// assert_eq!(trace.len(), 2);
/// ```
pub struct DfaRun<'a> {
    table: &'a DfaTable,
    definition: &'a DfaDefinition,
    current: State,
    remaining: VecDeque<char>,
    trace: Trace<DfaKey>,
    status: RunStatus,
}

impl<'a> DfaRun<'a> {
    /// Start a run at the definition's start state with the whole input
    /// ahead of it.
    pub fn new(table: &'a DfaTable, definition: &'a DfaDefinition, input: &str) -> Self {
        Self {
            table,
            definition,
            current: definition.start().clone(),
            remaining: input.chars().collect(),
            trace: Trace::new(),
            status: RunStatus::Running,
        }
    }

    pub fn current(&self) -> &State {
        &self.current
    }

    /// The input not yet consumed.
    pub fn remaining(&self) -> String {
        self.remaining.iter().collect()
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// The verdict, once the run has finished.
    pub fn verdict(&self) -> Option<Verdict> {
        match self.status {
            RunStatus::Finished(verdict) => Some(verdict),
            RunStatus::Running => None,
        }
    }

    /// The transitions taken so far.
    pub fn trace(&self) -> &Trace<DfaKey> {
        &self.trace
    }

    /// Advance the run by one step.
    ///
    /// With input left, looks up `(current, next symbol)` and either
    /// takes the transition or finishes with the first applicable
    /// rejection. With the input exhausted, finishes with the
    /// acceptance check. Calling `step()` after the run has finished is
    /// a usage error.
    pub fn step(&mut self) -> Result<StepEvent<DfaKey>, UsageError> {
        if let RunStatus::Finished(_) = self.status {
            return Err(UsageError::AlreadyTerminal);
        }

        let state_before = self.current.clone();
        let remaining_before = self.remaining();

        let Some(c) = self.remaining.front().copied() else {
            let verdict = if self.definition.is_accepting(&self.current) {
                Verdict::Accepted
            } else {
                Verdict::Rejected(RejectReason::NotAccepting)
            };
            return Ok(self.finish(state_before, remaining_before, verdict));
        };

        if !self.definition.has_state(&self.current) {
            let verdict = Verdict::Rejected(RejectReason::UnknownState);
            return Ok(self.finish(state_before, remaining_before, verdict));
        }

        let symbol = Symbol::new(c);
        if !self.definition.has_symbol(symbol) {
            let verdict = Verdict::Rejected(RejectReason::SymbolNotInAlphabet);
            return Ok(self.finish(state_before, remaining_before, verdict));
        }

        let key = DfaKey {
            state: self.current.clone(),
            symbol,
        };
        let Some(next) = self.table.lookup(&key).cloned() else {
            let verdict = Verdict::Rejected(RejectReason::NoMatchingTransition);
            return Ok(self.finish(state_before, remaining_before, verdict));
        };

        self.remaining.pop_front();
        self.current = next.clone();

        let event = StepEvent {
            state_before,
            remaining_before,
            stack_before: None,
            matched_key: Some(key),
            state_after: Some(next),
            stack_after: None,
            outcome: StepOutcome::Transitioned,
        };
        self.trace = self.trace.record(event.clone());
        Ok(event)
    }

    /// Run to the verdict, discarding events.
    pub fn run(&mut self) -> (Trace<DfaKey>, Verdict) {
        self.run_observed(&mut NullObserver)
    }

    /// Run to the verdict, forwarding each event to the observer before
    /// the next step is taken.
    pub fn run_observed(
        &mut self,
        observer: &mut dyn StepObserver<DfaKey>,
    ) -> (Trace<DfaKey>, Verdict) {
        loop {
            if let RunStatus::Finished(verdict) = self.status {
                return (self.trace.clone(), verdict);
            }
            if let Ok(event) = self.step() {
                observer.on_step(&event);
            }
        }
    }

    /// Capture the run for later resumption. Only an unfinished run can
    /// be snapshotted.
    pub fn snapshot(&self) -> Result<RunSnapshot<DfaKey>, SnapshotError> {
        if let RunStatus::Finished(_) = self.status {
            return Err(SnapshotError::ValidationFailed(
                "the run has already reached a verdict".to_string(),
            ));
        }
        Ok(RunSnapshot {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            current: self.current.clone(),
            remaining: self.remaining(),
            stack: None,
            trace: self.trace.clone(),
        })
    }

    /// Rebuild a running run from a snapshot, re-validating it against
    /// the definition.
    pub fn resume(
        table: &'a DfaTable,
        definition: &'a DfaDefinition,
        snapshot: &RunSnapshot<DfaKey>,
    ) -> Result<Self, SnapshotError> {
        snapshot.validate_version()?;
        if snapshot.stack.is_some() {
            return Err(SnapshotError::ValidationFailed(
                "snapshot carries a stack but the target is a finite automaton".to_string(),
            ));
        }
        if !definition.has_state(&snapshot.current) {
            return Err(SnapshotError::ValidationFailed(format!(
                "state '{}' is not declared in the definition",
                snapshot.current
            )));
        }
        Ok(Self {
            table,
            definition,
            current: snapshot.current.clone(),
            remaining: snapshot.remaining.chars().collect(),
            trace: snapshot.trace.clone(),
            status: RunStatus::Running,
        })
    }

    fn finish(
        &mut self,
        state_before: State,
        remaining_before: String,
        verdict: Verdict,
    ) -> StepEvent<DfaKey> {
        self.status = RunStatus::Finished(verdict);
        let outcome = match verdict {
            Verdict::Accepted => StepOutcome::Accepted,
            Verdict::Rejected(reason) => StepOutcome::Rejected(reason),
        };
        StepEvent {
            state_before,
            remaining_before,
            stack_before: None,
            matched_key: None,
            state_after: None,
            stack_after: None,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DfaBuilder;

    fn two_step_machine() -> (DfaDefinition, DfaTable) {
        DfaBuilder::new()
            .states(["q0", "q1", "q2"])
            .symbols(['a', 'b', 'c'])
            .start("q0")
            .accepting(["q2"])
            .rule("q0", 'a', "q1")
            .rule("q1", 'b', "q2")
            .build()
            .unwrap()
    }

    #[test]
    fn accepting_input_yields_a_two_step_trace() {
        let (definition, table) = two_step_machine();
        let mut run = DfaRun::new(&table, &definition, "ab");

        let (trace, verdict) = run.run();

        assert_eq!(verdict, Verdict::Accepted);
        assert_eq!(trace.len(), 2);
        assert_eq!(
            trace.path(),
            vec![&State::new("q0"), &State::new("q1"), &State::new("q2")]
        );
        assert_eq!(
            trace.events()[0].matched_key,
            Some(DfaKey {
                state: State::new("q0"),
                symbol: Symbol::new('a'),
            })
        );
    }

    #[test]
    fn missing_transition_rejects_after_one_step() {
        let (definition, table) = two_step_machine();
        let mut run = DfaRun::new(&table, &definition, "ac");

        let (trace, verdict) = run.run();

        assert_eq!(
            verdict,
            Verdict::Rejected(RejectReason::NoMatchingTransition)
        );
        assert_eq!(trace.len(), 1);
        assert_eq!(run.current(), &State::new("q1"));
    }

    #[test]
    fn foreign_symbol_rejects_before_lookup() {
        let (definition, table) = two_step_machine();
        let mut run = DfaRun::new(&table, &definition, "ax");

        let (trace, verdict) = run.run();

        assert_eq!(
            verdict,
            Verdict::Rejected(RejectReason::SymbolNotInAlphabet)
        );
        assert_eq!(trace.len(), 1);
    }

    #[test]
    fn empty_input_outside_accepting_rejects_with_empty_trace() {
        let (definition, table) = two_step_machine();
        let mut run = DfaRun::new(&table, &definition, "");

        let (trace, verdict) = run.run();

        assert_eq!(verdict, Verdict::Rejected(RejectReason::NotAccepting));
        assert!(trace.is_empty());
    }

    #[test]
    fn stepping_a_finished_run_is_a_usage_error() {
        let (definition, table) = two_step_machine();
        let mut run = DfaRun::new(&table, &definition, "");

        run.run();
        assert!(matches!(run.step(), Err(UsageError::AlreadyTerminal)));
    }

    #[test]
    fn step_reports_the_configuration_before_the_move() {
        let (definition, table) = two_step_machine();
        let mut run = DfaRun::new(&table, &definition, "ab");

        let event = run.step().unwrap();

        assert_eq!(event.state_before, State::new("q0"));
        assert_eq!(event.remaining_before, "ab");
        assert_eq!(event.state_after, Some(State::new("q1")));
        assert_eq!(run.remaining(), "b");
        assert_eq!(run.verdict(), None);
    }

    #[test]
    fn terminal_step_is_not_recorded_in_the_trace() {
        let (definition, table) = two_step_machine();
        let mut run = DfaRun::new(&table, &definition, "ab");

        run.step().unwrap();
        run.step().unwrap();
        let terminal = run.step().unwrap();

        assert_eq!(terminal.outcome, StepOutcome::Accepted);
        assert!(terminal.matched_key.is_none());
        assert_eq!(run.trace().len(), 2);
        assert_eq!(run.verdict(), Some(Verdict::Accepted));
    }

    #[test]
    fn snapshot_and_resume_finish_like_an_uninterrupted_run() {
        let (definition, table) = two_step_machine();

        let mut paused = DfaRun::new(&table, &definition, "ab");
        paused.step().unwrap();
        let snapshot = paused.snapshot().unwrap();

        let mut resumed = DfaRun::resume(&table, &definition, &snapshot).unwrap();
        let (trace, verdict) = resumed.run();

        assert_eq!(verdict, Verdict::Accepted);
        assert_eq!(trace.len(), 2);
    }

    #[test]
    fn finished_runs_cannot_be_snapshotted() {
        let (definition, table) = two_step_machine();
        let mut run = DfaRun::new(&table, &definition, "");
        run.run();

        assert!(matches!(
            run.snapshot(),
            Err(SnapshotError::ValidationFailed(_))
        ));
    }
}
