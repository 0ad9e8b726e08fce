//! Property-based tests for the automaton engines.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use lockstep::builder::{DfaBuilder, PdaBuilder};
use lockstep::core::{RejectReason, State};
use lockstep::{DfaRun, PdaRun, RunStatus, Verdict};
use proptest::prelude::*;

/// Parity-of-zeros machine over {0, 1}: accepts strings with an even
/// number of zeros.
fn parity_machine() -> (lockstep::DfaDefinition, lockstep::DfaTable) {
    DfaBuilder::new()
        .states(["even", "odd"])
        .symbols(['0', '1'])
        .start("even")
        .accepting(["even"])
        .rule("even", '0', "odd")
        .rule("odd", '0', "even")
        .rule("even", '1', "even")
        .rule("odd", '1', "odd")
        .build()
        .unwrap()
}

/// 0^n 1^n machine (n >= 0) accepting by final state. The epsilon rule
/// at the start state admits the empty string.
fn matched_pairs_machine() -> (lockstep::PdaDefinition, lockstep::PdaTable) {
    PdaBuilder::new()
        .states(["p0", "p1", "p2"])
        .symbols(['0', '1'])
        .stack_symbols(['Z', 'a'])
        .start("p0")
        .start_stack('Z')
        .accepting(["p2"])
        .rule("p0", '0', 'Z', "p0", "aZ")
        .rule("p0", '0', 'a', "p0", "aa")
        .rule("p0", '1', 'a', "p1", "λ")
        .rule("p1", '1', 'a', "p1", "λ")
        .rule("p0", 'λ', 'Z', "p2", "Z")
        .rule("p1", 'λ', 'Z', "p2", "Z")
        .build()
        .unwrap()
}

prop_compose! {
    fn binary_input()(s in "[01]{0,24}") -> String {
        s
    }
}

prop_compose! {
    fn mixed_input()(s in "[0-2ab]{0,16}") -> String {
        s
    }
}

proptest! {
    #[test]
    fn dfa_reaches_a_verdict_within_input_length_plus_one_steps(input in mixed_input()) {
        let (definition, table) = parity_machine();
        let mut run = DfaRun::new(&table, &definition, &input);

        let mut steps = 0;
        while matches!(run.status(), RunStatus::Running) {
            run.step().unwrap();
            steps += 1;
            prop_assert!(steps <= input.chars().count() + 1);
        }
        prop_assert!(run.verdict().is_some());
    }

    #[test]
    fn dfa_verdicts_are_deterministic(input in mixed_input()) {
        let (definition, table) = parity_machine();

        let (first_trace, first) = DfaRun::new(&table, &definition, &input).run();
        let (second_trace, second) = DfaRun::new(&table, &definition, &input).run();

        prop_assert_eq!(first, second);
        prop_assert_eq!(first_trace.len(), second_trace.len());
    }

    #[test]
    fn dfa_accepts_exactly_even_zero_counts(input in binary_input()) {
        let (definition, table) = parity_machine();
        let (_trace, verdict) = DfaRun::new(&table, &definition, &input).run();

        let zeros = input.chars().filter(|c| *c == '0').count();
        prop_assert_eq!(verdict.is_accepted(), zeros % 2 == 0);
    }

    #[test]
    fn dfa_trace_length_equals_consumed_symbols(input in binary_input()) {
        let (definition, table) = parity_machine();
        let mut run = DfaRun::new(&table, &definition, &input);
        let (trace, _verdict) = run.run();

        // The parity machine is total over {0,1}, so every symbol is
        // consumed and every step is a transition.
        prop_assert_eq!(trace.len(), input.chars().count());
        prop_assert_eq!(run.remaining(), "");
    }

    #[test]
    fn dfa_remaining_input_strictly_shrinks(input in binary_input()) {
        let (definition, table) = parity_machine();
        let mut run = DfaRun::new(&table, &definition, &input);

        let mut previous = run.remaining().chars().count();
        while matches!(run.status(), RunStatus::Running) {
            let event = run.step().unwrap();
            if event.is_transition() {
                let now = run.remaining().chars().count();
                prop_assert_eq!(now + 1, previous);
                previous = now;
            }
        }
    }

    #[test]
    fn pda_accepts_exactly_matched_pairs(zeros in 0usize..12, ones in 0usize..12) {
        let (definition, table) = matched_pairs_machine();
        let input = "0".repeat(zeros) + &"1".repeat(ones);

        let (_trace, verdict) = PdaRun::new(&table, &definition, &input).run();

        prop_assert_eq!(verdict.is_accepted(), zeros == ones);
    }

    #[test]
    fn pda_verdicts_are_deterministic(input in binary_input()) {
        let (definition, table) = matched_pairs_machine();

        let (first_trace, first) = PdaRun::new(&table, &definition, &input).run();
        let (second_trace, second) = PdaRun::new(&table, &definition, &input).run();

        prop_assert_eq!(first, second);
        prop_assert_eq!(first_trace.len(), second_trace.len());
    }

    #[test]
    fn pda_stack_snapshots_chain_across_events(input in binary_input()) {
        let (definition, table) = matched_pairs_machine();
        let mut run = PdaRun::new(&table, &definition, &input);
        let (trace, _verdict) = run.run();

        for pair in trace.events().windows(2) {
            prop_assert_eq!(
                pair[0].stack_after.as_ref(),
                pair[1].stack_before.as_ref()
            );
        }
    }

    #[test]
    fn rebuilding_the_table_is_observationally_equivalent(input in binary_input()) {
        let (definition_a, table_a) = parity_machine();
        let (definition_b, table_b) = parity_machine();

        for (key, outcome) in table_a.iter() {
            prop_assert_eq!(table_b.lookup(key), Some(outcome));
        }
        prop_assert_eq!(table_a.len(), table_b.len());

        let (_ta, va) = DfaRun::new(&table_a, &definition_a, &input).run();
        let (_tb, vb) = DfaRun::new(&table_b, &definition_b, &input).run();
        prop_assert_eq!(va, vb);
    }

    #[test]
    fn foreign_symbols_never_panic_the_pda(input in mixed_input()) {
        let (definition, table) = matched_pairs_machine();
        let (_trace, verdict) = PdaRun::new(&table, &definition, &input).run();

        if input.chars().any(|c| c != '0' && c != '1') {
            prop_assert!(matches!(
                verdict,
                Verdict::Rejected(
                    RejectReason::SymbolNotInAlphabet
                        | RejectReason::NoMatchingTransition
                        | RejectReason::NotAccepting
                )
            ));
        }
    }

    #[test]
    fn pda_snapshot_resume_preserves_the_verdict(input in binary_input(), pause in 0usize..6) {
        let (definition, table) = matched_pairs_machine();

        let (_trace, uninterrupted) = PdaRun::new(&table, &definition, &input).run();

        let mut paused = PdaRun::new(&table, &definition, &input);
        for _ in 0..pause {
            if matches!(paused.status(), RunStatus::Finished(_)) {
                break;
            }
            paused.step().unwrap();
        }
        if matches!(paused.status(), RunStatus::Running) {
            let snapshot = paused.snapshot().unwrap();
            let bytes = snapshot.to_bytes().unwrap();
            let restored = lockstep::checkpoint::RunSnapshot::from_bytes(&bytes).unwrap();
            let mut resumed = PdaRun::resume(&table, &definition, &restored).unwrap();
            let (_trace, verdict) = resumed.run();
            prop_assert_eq!(verdict, uninterrupted);
        }
    }

    #[test]
    fn dfa_path_starts_at_the_start_state(input in binary_input()) {
        let (definition, table) = parity_machine();
        let mut run = DfaRun::new(&table, &definition, &input);
        let (trace, _verdict) = run.run();

        if !input.is_empty() {
            prop_assert_eq!(trace.path()[0], &State::new("even"));
        }
    }
}
