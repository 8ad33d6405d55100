//! End-to-end episode loop example.
//!
//! Demonstrates: build reward and observation → reset → step the solver →
//! obtain observation and reward → reset → repeat.

use tally_bench::{reference_reward, solver_trace, MockSolver};
use tally_core::{Signal, SignalExt, StepFlags};
use tally_obs::DictFunction;
use tally_reward::{LpIterations, NNodes};

fn main() {
    println!("=== Tally Episode Loop Example ===\n");

    let reward = reference_reward();
    let observation: DictFunction<MockSolver, f64> = DictFunction::builder()
        .with("lp_iterations", LpIterations::new().shared())
        .with("n_nodes", NNodes::new().shared())
        .with("reward", reward.clone().shared())
        .build()
        .unwrap();
    println!("reward:      {reward}");
    println!("observation: {}\n", observation.name());

    for (episode, seed) in [42u64, 99].into_iter().enumerate() {
        let mut solver = MockSolver::new();
        reward.reset(&solver).unwrap();
        observation.reset(&solver).unwrap();

        let trace = solver_trace(20, seed);
        let mut total = 0.0;
        println!("Episode {}: {} steps", episode + 1, trace.len());
        for (step, &(lp, nodes)) in trace.iter().enumerate() {
            solver.advance(lp, nodes);
            let flags = StepFlags::done(step + 1 == trace.len());
            let obs = observation.obtain(&solver, flags).unwrap();
            let r = reward.obtain(&solver, flags).unwrap();
            total += r;

            if step % 5 == 0 || flags.done {
                println!(
                    "  step {:>2}: lp={:>6} nodes={:>4} reward={:>9.3}",
                    step + 1,
                    obs["lp_iterations"],
                    obs["n_nodes"],
                    r,
                );
            }
        }
        println!("  total reward: {total:.3}\n");
    }
}
