//! Reward functions and the reward expression algebra for Tally.
//!
//! A [`Reward`] is a shared handle to a scalar signal. Rewards combine
//! through the standard operators into new rewards, building an immutable
//! expression tree instead of computing anything eagerly:
//!
//! ```
//! use tally_core::{Signal, StepFlags};
//! use tally_reward::{IsDone, Reward};
//!
//! // 10 on the terminal step, -1 on every other step.
//! let reward: Reward<()> = 11.0 * Reward::new(IsDone::new()) - 1.0;
//!
//! reward.reset(&()).unwrap();
//! assert_eq!(reward.obtain(&(), StepFlags::NONE).unwrap(), -1.0);
//! assert_eq!(reward.obtain(&(), StepFlags::DONE).unwrap(), 10.0);
//! ```
//!
//! # Primitives
//!
//! - [`Constant`]: a fixed value; stateless.
//! - [`IsDone`]: `1` on the terminal step, `0` otherwise.
//! - [`LpIterations`] / [`neg_lp_iterations`]: LP iterations since reset.
//! - [`NNodes`]: branch-and-bound nodes since reset.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod constant;
pub mod expr;
pub mod ops;
pub mod primitives;
pub mod reward;

pub use constant::Constant;
pub use expr::{BinaryOp, UnaryOp};
pub use ops::IntoReward;
pub use primitives::{neg_lp_iterations, IsDone, LpIterations, NNodes};
pub use reward::Reward;
