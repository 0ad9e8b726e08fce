//! Even-Zeros Finite Automaton
//!
//! This example demonstrates stepping a DFA and observing each move.
//!
//! Key concepts:
//! - Building a definition and table with the fluent builder
//! - Driving a run step by step
//! - Rendering the step log with a Transcript observer
//!
//! Run with: cargo run --example even_zeros

use lockstep::builder::DfaBuilder;
use lockstep::{DfaRun, Transcript};

fn main() {
    println!("=== Even-Zeros Finite Automaton ===\n");

    // Accepts binary strings containing an even number of zeros.
    let (definition, table) = DfaBuilder::new()
        .states(["even", "odd"])
        .symbols(['0', '1'])
        .start("even")
        .accepting(["even"])
        .rule("even", '0', "odd")
        .rule("odd", '0', "even")
        .rule("even", '1', "even")
        .rule("odd", '1', "odd")
        .build()
        .expect("definition is well formed");

    for input in ["0110", "010", ""] {
        println!("input: {:?}", input);

        let mut transcript = Transcript::new();
        let mut run = DfaRun::new(&table, &definition, input);
        let (trace, verdict) = run.run_observed(&mut transcript);

        for line in transcript.lines() {
            println!("  {line}");
        }
        println!("  steps taken: {}", trace.len());
        println!("  verdict: {verdict}\n");
    }

    println!("A driver that wants visible pacing calls step() itself");
    println!("and sleeps between calls; the engine never waits.");

    println!("\n=== Example Complete ===");
}
