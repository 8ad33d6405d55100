//! Observation functions and packers for Tally.
//!
//! [`FocusNode`] observes the branch-and-bound node the solver is
//! working on.
//!
//! Packers combine several observation functions into one:
//!
//! - [`TupleFunction`] returns the children's observations in order.
//! - [`DictFunction`] returns them keyed by name, in insertion order.
//!
//! Packers are observation functions themselves, so they nest. To pack
//! children with different output types, convert each with
//! [`SignalExt::into_value`](tally_core::SignalExt::into_value) and pack
//! [`Value`](tally_core::Value)s.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dict;
pub mod focus_node;
pub mod nothing;
pub mod tuple;

pub use dict::{DictFunction, DictFunctionBuilder};
pub use focus_node::FocusNode;
pub use nothing::Nothing;
pub use tuple::TupleFunction;
