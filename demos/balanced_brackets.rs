//! Balanced-Brackets Pushdown Automaton
//!
//! This example demonstrates a DPDA run with stack observation.
//!
//! Key concepts:
//! - Stack-rewrite rules in the document encoding
//! - Epsilon rules firing once the input is exhausted
//! - Stack snapshots in the step events
//!
//! Run with: cargo run --example balanced_brackets

use lockstep::builder::PdaBuilder;
use lockstep::PdaRun;

fn main() {
    println!("=== Balanced-Brackets Pushdown Automaton ===\n");

    // Accepts balanced strings of ( and ) by final state. The rewrite
    // "xZ" grows the stack above the untouched bottom marker; "λ" pops
    // one x per closing bracket.
    let (definition, table) = PdaBuilder::new()
        .states(["p0", "p1"])
        .symbols(['(', ')'])
        .stack_symbols(['Z', 'x'])
        .start("p0")
        .start_stack('Z')
        .accepting(["p1"])
        .rule("p0", '(', 'Z', "p0", "xZ")
        .rule("p0", '(', 'x', "p0", "xx")
        .rule("p0", ')', 'x', "p0", "λ")
        .rule("p0", 'λ', 'Z', "p1", "Z")
        .build()
        .expect("definition is well formed");

    for input in ["(())", "(()", ")("] {
        println!("input: {:?}", input);

        let mut run = PdaRun::new(&table, &definition, input);
        while run.verdict().is_none() {
            let event = run.step().expect("run is still in progress");
            if let Some(stack) = &event.stack_after {
                println!(
                    "  {} | remaining: {:?} | stack: {}",
                    event
                        .matched_key
                        .as_ref()
                        .map(|key| key.to_string())
                        .unwrap_or_else(|| "halt".to_string()),
                    run.remaining(),
                    stack,
                );
            }
        }

        if let Some(verdict) = run.verdict() {
            println!("  verdict: {verdict}\n");
        }
    }

    println!("=== Example Complete ===");
}
