//! Benchmark profiles for Tally reward and observation trees.
//!
//! Provides pre-built trees over [`MockSolver`] for benchmarks and examples:
//!
//! - [`reference_reward`]: the typical "bonus on done, cost per LP iteration" reward
//! - [`deep_chain`]: a reward nested `depth` combinators deep
//! - [`wide_dict`]: a dict observation with `width` entries sharing one leaf
//! - [`solver_trace`]: deterministic per-step solver work

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tally_core::{SignalExt, SignalError};
use tally_obs::DictFunction;
use tally_reward::{neg_lp_iterations, IsDone, NNodes, Reward};
pub use tally_test_utils::MockSolver;

/// `10 * IsDone + 0.01 * -LpIterations`.
pub fn reference_reward() -> Reward<MockSolver> {
    10.0 * Reward::new(IsDone::new()) + 0.01 * neg_lp_iterations()
}

/// A reward of depth `depth` built by alternating `+ 1` and `abs`.
///
/// Every level keeps the previous level as its left operand, so reset and
/// obtain both walk the whole chain.
pub fn deep_chain(depth: usize) -> Reward<MockSolver> {
    let mut r = -Reward::new(NNodes::new());
    for level in 1..depth {
        r = if level % 2 == 0 { r.abs() } else { r + 1 };
    }
    r
}

/// A dict observation whose `width` entries all scale one shared reward.
pub fn wide_dict(width: usize) -> Result<DictFunction<MockSolver, f64>, SignalError> {
    let shared = reference_reward();
    DictFunction::new((0..width).map(|i| {
        let entry = shared.clone() * (i as f64 + 1.0);
        (format!("r{i}"), entry.shared())
    }))
}

/// Deterministic `(lp_iterations, n_nodes)` increments for `steps` steps.
pub fn solver_trace(steps: usize, seed: u64) -> Vec<(u64, u64)> {
    let mut x = seed;
    (0..steps)
        .map(|_| {
            x = x
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((x >> 33) % 500, (x >> 20) % 8)
        })
        .collect()
}
