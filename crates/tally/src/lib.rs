//! Tally: composable reward and observation functions for reinforcement
//! learning environments driven by an external solver.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Tally sub-crates. For most users, adding `tally` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tally::prelude::*;
//!
//! // The solver state is an external collaborator; anything implementing
//! // `SolverStats` works with the built-in primitives.
//! struct Solver {
//!     lp_iterations: u64,
//!     n_nodes: u64,
//! }
//!
//! impl SolverStats for Solver {
//!     fn lp_iterations(&self) -> u64 { self.lp_iterations }
//!     fn n_nodes(&self) -> u64 { self.n_nodes }
//! }
//!
//! // Reward: a bonus for finishing, minus a small cost per LP iteration.
//! let reward = 10.0 * Reward::new(IsDone::new()) + 0.01 * neg_lp_iterations();
//!
//! // Observation: the reward itself and the node count, keyed by name.
//! let observation = DictFunction::builder()
//!     .with("reward", reward.clone().shared())
//!     .with("nodes", NNodes::new().shared())
//!     .build()
//!     .unwrap();
//!
//! let mut solver = Solver { lp_iterations: 0, n_nodes: 0 };
//!
//! // Episode start: one reset per tree.
//! reward.reset(&solver).unwrap();
//! observation.reset(&solver).unwrap();
//!
//! // One step of solver work.
//! solver.lp_iterations += 200;
//! solver.n_nodes += 3;
//!
//! let r = reward.obtain(&solver, StepFlags::NONE).unwrap();
//! assert!((r - -2.0).abs() < 1e-9);
//!
//! let obs = observation.obtain(&solver, StepFlags::DONE).unwrap();
//! assert!((obs["reward"] - 8.0).abs() < 1e-9);
//! assert_eq!(obs["nodes"], 3.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tally-core` | `Signal` trait, lifecycle, values, errors |
//! | [`reward`] | `tally-reward` | Reward primitives and the reward algebra |
//! | [`obs`] | `tally-obs` | Focus node observation, tuple and dict packers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and errors (`tally-core`).
///
/// Contains the [`types::Signal`] trait, the per-node
/// [`types::Lifecycle`], [`types::Value`], and [`types::SignalError`].
pub use tally_core as types;

/// Reward primitives and the reward expression algebra (`tally-reward`).
///
/// [`reward::Reward`] handles combine with `+ - * /`, unary `-` and
/// [`reward::Reward::abs`].
pub use tally_reward as reward;

/// Observations and packers (`tally-obs`).
///
/// [`obs::TupleFunction`] and [`obs::DictFunction`] pack several
/// observation functions into one.
pub use tally_obs as obs;

/// Common imports for typical Tally usage.
///
/// ```rust
/// use tally::prelude::*;
/// ```
pub mod prelude {
    // Core traits and types
    pub use tally_core::{
        FocusNodeObs, FocusNodeView, Shared, Signal, SignalExt, SolverStats, StepFlags, Value,
    };

    // Errors
    pub use tally_core::SignalError;

    // Rewards
    pub use tally_reward::{neg_lp_iterations, Constant, IsDone, LpIterations, NNodes, Reward};

    // Observations
    pub use tally_obs::{DictFunction, FocusNode, Nothing, TupleFunction};
}
