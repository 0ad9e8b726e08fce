//! The pushdown-automaton interpreter.

use super::observer::{NullObserver, StepObserver};
use super::{RunStatus, UsageError};
use crate::checkpoint::{RunSnapshot, SnapshotError, SNAPSHOT_VERSION};
use crate::core::{
    AcceptMode, InputSymbol, PdaDefinition, PdaKey, PdaTable, RejectReason, Rewrite, Stack,
    StackSymbol, State, StepEvent, StepOutcome, Symbol, Trace, Verdict,
};
use chrono::Utc;
use std::collections::VecDeque;
use uuid::Uuid;

/// One in-progress run of an input string through a pushdown automaton.
///
/// On top of the finite-automaton run state, a pushdown run owns a
/// stack seeded with the definition's start stack symbol. Transitions
/// are keyed by `(state, symbol-or-epsilon, stack top)`; the epsilon
/// key is used exactly when the input is exhausted, so epsilon rules
/// let a machine finish its stack work after reading the whole string.
///
/// # Example
///
/// ```rust
/// use lockstep::builder::PdaBuilder;
/// use lockstep::PdaRun;
///
/// // 0^n 1^n by final state.
/// let (definition, table) = PdaBuilder::new()
///     .states(["p0", "p1", "p2"])
///     .symbols(['0', '1'])
///     .stack_symbols(['Z', 'a'])
///     .start("p0")
///     .start_stack('Z')
///     .accepting(["p2"])
///     .rule("p0", '0', 'Z', "p0", "aZ")
///     .rule("p0", '0', 'a', "p0", "aa")
///     .rule("p0", '1', 'a', "p1", "λ")
///     .rule("p1", '1', 'a', "p1", "λ")
///     .rule("p1", 'λ', 'Z', "p2", "Z")
///     .build()
///     .unwrap();
///
/// let mut run = PdaRun::new(&table, &definition, "0011");
/// let (_trace, verdict) = run.run();
/// assert!(verdict.is_accepted());
/// ```
pub struct PdaRun<'a> {
    table: &'a PdaTable,
    definition: &'a PdaDefinition,
    current: State,
    remaining: VecDeque<char>,
    stack: Stack,
    trace: Trace<PdaKey>,
    status: RunStatus,
}

impl<'a> PdaRun<'a> {
    /// Start a run at the start state with the start stack symbol as
    /// the only stack entry.
    pub fn new(table: &'a PdaTable, definition: &'a PdaDefinition, input: &str) -> Self {
        Self {
            table,
            definition,
            current: definition.start().clone(),
            remaining: input.chars().collect(),
            stack: Stack::new(definition.start_stack()),
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

    pub fn stack(&self) -> &Stack {
        &self.stack
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
    pub fn trace(&self) -> &Trace<PdaKey> {
        &self.trace
    }

    /// Advance the run by one step.
    ///
    /// Failure checks run in a fixed order: exhausted stack, foreign
    /// stack top, foreign input symbol, unknown state, missing
    /// transition. With the input exhausted the epsilon key is tried;
    /// when no epsilon rule forces a further move the run finishes with
    /// the acceptance check for the definition's mode.
    pub fn step(&mut self) -> Result<StepEvent<PdaKey>, UsageError> {
        if let RunStatus::Finished(_) = self.status {
            return Err(UsageError::AlreadyTerminal);
        }

        let state_before = self.current.clone();
        let remaining_before = self.remaining();
        let stack_before = self.stack.clone();

        // A prior pop emptied the stack; no transition can match.
        let Some(top) = self.stack.peek() else {
            let verdict = self.halted_verdict();
            return Ok(self.finish(state_before, remaining_before, stack_before, verdict));
        };

        if !self.definition.has_stack_symbol(top) {
            let verdict = Verdict::Rejected(RejectReason::StackSymbolNotInStackAlphabet);
            return Ok(self.finish(state_before, remaining_before, stack_before, verdict));
        }

        let input = match self.remaining.front().copied() {
            None => InputSymbol::Epsilon,
            Some(c) => {
                let symbol = Symbol::new(c);
                if !self.definition.has_symbol(symbol) {
                    let verdict = Verdict::Rejected(RejectReason::SymbolNotInAlphabet);
                    return Ok(self.finish(state_before, remaining_before, stack_before, verdict));
                }
                InputSymbol::Symbol(symbol)
            }
        };

        if !self.definition.has_state(&self.current) {
            let verdict = Verdict::Rejected(RejectReason::UnknownState);
            return Ok(self.finish(state_before, remaining_before, stack_before, verdict));
        }

        let key = PdaKey {
            state: self.current.clone(),
            input,
            top,
        };
        let Some(outcome) = self.table.lookup(&key).cloned() else {
            // With the input exhausted the absence of an epsilon rule is
            // not a failure: nothing further is forced, so the run
            // finishes with the acceptance check.
            let verdict = if input.is_epsilon() {
                self.acceptance_verdict()
            } else {
                Verdict::Rejected(RejectReason::NoMatchingTransition)
            };
            return Ok(self.finish(state_before, remaining_before, stack_before, verdict));
        };

        self.apply_rewrite(&outcome.rewrite, top);
        if !input.is_epsilon() {
            self.remaining.pop_front();
        }
        self.current = outcome.next.clone();

        let event = StepEvent {
            state_before,
            remaining_before,
            stack_before: Some(stack_before),
            matched_key: Some(key),
            state_after: Some(outcome.next),
            stack_after: Some(self.stack.clone()),
            outcome: StepOutcome::Transitioned,
        };
        self.trace = self.trace.record(event.clone());
        Ok(event)
    }

    /// Run to the verdict, discarding events.
    pub fn run(&mut self) -> (Trace<PdaKey>, Verdict) {
        self.run_observed(&mut NullObserver)
    }

    /// Run to the verdict, forwarding each event to the observer before
    /// the next step is taken.
    pub fn run_observed(
        &mut self,
        observer: &mut dyn StepObserver<PdaKey>,
    ) -> (Trace<PdaKey>, Verdict) {
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
    pub fn snapshot(&self) -> Result<RunSnapshot<PdaKey>, SnapshotError> {
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
            stack: Some(self.stack.clone()),
            trace: self.trace.clone(),
        })
    }

    /// Rebuild a running run from a snapshot, re-validating it against
    /// the definition.
    pub fn resume(
        table: &'a PdaTable,
        definition: &'a PdaDefinition,
        snapshot: &RunSnapshot<PdaKey>,
    ) -> Result<Self, SnapshotError> {
        snapshot.validate_version()?;
        let Some(stack) = snapshot.stack.clone() else {
            return Err(SnapshotError::ValidationFailed(
                "snapshot has no stack but the target is a pushdown automaton".to_string(),
            ));
        };
        if !definition.has_state(&snapshot.current) {
            return Err(SnapshotError::ValidationFailed(format!(
                "state '{}' is not declared in the definition",
                snapshot.current
            )));
        }
        for symbol in stack.symbols() {
            if !definition.has_stack_symbol(*symbol) {
                return Err(SnapshotError::ValidationFailed(format!(
                    "stack symbol '{symbol}' is not declared in the definition"
                )));
            }
        }
        Ok(Self {
            table,
            definition,
            current: snapshot.current.clone(),
            remaining: snapshot.remaining.chars().collect(),
            stack,
            trace: snapshot.trace.clone(),
            status: RunStatus::Running,
        })
    }

    /// Apply a parsed rewrite to the stack, `top` being the matched top
    /// symbol.
    ///
    /// The multi-symbol branch leaves the matched top in place under all
    /// circumstances; a trailing symbol equal to the top is dropped
    /// rather than pushed again.
    fn apply_rewrite(&mut self, rewrite: &Rewrite, top: StackSymbol) {
        match rewrite {
            Rewrite::Pop => {
                let _ = self.stack.pop();
            }
            Rewrite::Replace(symbol) => {
                let _ = self.stack.pop();
                self.stack.push(*symbol);
            }
            Rewrite::Push(symbols) => {
                let mut pending = symbols.as_slice();
                if pending.last() == Some(&top) {
                    pending = &pending[..pending.len() - 1];
                }
                for symbol in pending.iter().rev() {
                    self.stack.push(*symbol);
                }
            }
        }
    }

    /// Verdict when the input is exhausted and nothing further is
    /// forced.
    fn acceptance_verdict(&self) -> Verdict {
        let accepted = match self.definition.accept_mode() {
            AcceptMode::FinalState => self.definition.is_accepting(&self.current),
            AcceptMode::EmptyStack => self.stack.is_empty(),
        };
        if accepted {
            Verdict::Accepted
        } else {
            Verdict::Rejected(RejectReason::NotAccepting)
        }
    }

    /// Verdict when the stack has been emptied. With the input also
    /// consumed this is the ordinary acceptance check; with input left
    /// the machine halted too early.
    fn halted_verdict(&self) -> Verdict {
        if self.remaining.is_empty() {
            self.acceptance_verdict()
        } else {
            match self.definition.accept_mode() {
                AcceptMode::FinalState => Verdict::Rejected(RejectReason::StackExhausted),
                AcceptMode::EmptyStack => Verdict::Rejected(RejectReason::InputNotFullyConsumed),
            }
        }
    }

    fn finish(
        &mut self,
        state_before: State,
        remaining_before: String,
        stack_before: Stack,
        verdict: Verdict,
    ) -> StepEvent<PdaKey> {
        self.status = RunStatus::Finished(verdict);
        let outcome = match verdict {
            Verdict::Accepted => StepOutcome::Accepted,
            Verdict::Rejected(reason) => StepOutcome::Rejected(reason),
        };
        StepEvent {
            state_before,
            remaining_before,
            stack_before: Some(stack_before.clone()),
            matched_key: None,
            state_after: None,
            stack_after: Some(stack_before),
            outcome,
        }
    }
}
