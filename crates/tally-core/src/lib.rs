//! Core types and traits for Tally reward and observation functions.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Tally workspace:
//! the [`Signal`] trait, the per-node reset [`Lifecycle`], reset pass
//! identifiers, structured observation [`Value`]s, the read-only solver
//! views in [`solver`], and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod ext;
pub mod id;
pub mod lifecycle;
pub mod solver;
pub mod traits;
pub mod value;

pub use error::SignalError;
pub use ext::{Map, SignalExt};
pub use id::ResetPass;
pub use lifecycle::{Lifecycle, Phase};
pub use solver::{FocusNodeObs, FocusNodeView, SolverStats};
pub use traits::{Shared, Signal, StepFlags};
pub use value::Value;
