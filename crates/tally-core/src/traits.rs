//! Core abstraction traits for signal functions.

use std::sync::Arc;

use crate::error::SignalError;
use crate::id::ResetPass;

/// Per-call context handed to [`Signal::obtain`].
///
/// Only leaf primitives interpret the flags; combinators and packers pass
/// them through unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StepFlags {
    /// Whether the episode terminated on this step.
    pub done: bool,
}

impl StepFlags {
    /// No flags set. Same as `StepFlags::default()`.
    pub const NONE: Self = Self { done: false };

    /// The episode terminated on this step.
    pub const DONE: Self = Self { done: true };

    /// Flags with `done` set as given.
    pub fn done(done: bool) -> Self {
        Self { done }
    }
}

/// A reward or observation function evaluated against solver state `S`.
///
/// # Contract
///
/// - `reset_pass()` reinitializes per-episode state and forwards the same
///   pass to every child, in construction order. A node already reset in
///   this pass does nothing, so shared children are reset once.
/// - `obtain()` fails with [`SignalError::UninitializedUse`] until the node
///   has been reset. It may be called repeatedly within a step and returns
///   the same value for the same state.
/// - Child errors are returned unchanged.
///
/// Implementors usually embed a [`Lifecycle`](crate::Lifecycle) and route
/// `reset_pass()` through [`Lifecycle::run`](crate::Lifecycle::run).
///
/// # Object safety
///
/// This trait is object-safe; composite nodes hold children as
/// [`Shared`] handles.
///
/// # Examples
///
/// ```
/// use tally_core::{Lifecycle, ResetPass, Signal, SignalError, StepFlags};
///
/// struct StepCount {
///     lifecycle: Lifecycle,
/// }
///
/// impl Signal<u64> for StepCount {
///     type Output = f64;
///
///     fn name(&self) -> &str { "StepCount" }
///
///     fn reset_pass(&self, _state: &u64, pass: ResetPass) -> Result<(), SignalError> {
///         self.lifecycle.run(self.name(), pass, || Ok(()))
///     }
///
///     fn obtain(&self, state: &u64, _flags: StepFlags) -> Result<f64, SignalError> {
///         self.lifecycle.ensure_ready(self.name())?;
///         Ok(*state as f64)
///     }
/// }
///
/// let f = StepCount { lifecycle: Lifecycle::new() };
/// assert!(f.obtain(&3, StepFlags::NONE).is_err());
/// f.reset(&0).unwrap();
/// assert_eq!(f.obtain(&3, StepFlags::NONE).unwrap(), 3.0);
/// ```
pub trait Signal<S: ?Sized>: Send + Sync {
    /// The value produced by [`obtain`](Signal::obtain).
    type Output;

    /// Human-readable name for error reporting and logs.
    fn name(&self) -> &str;

    /// Reset this node and its descendants as part of `pass`.
    fn reset_pass(&self, state: &S, pass: ResetPass) -> Result<(), SignalError>;

    /// Compute the current value.
    fn obtain(&self, state: &S, flags: StepFlags) -> Result<Self::Output, SignalError>;

    /// Start a new episode: reset the whole tree under a fresh pass.
    fn reset(&self, state: &S) -> Result<(), SignalError> {
        self.reset_pass(state, ResetPass::next())
    }
}

/// Shared handle to a type-erased signal.
///
/// Cloning the handle shares the node; it never copies it.
pub type Shared<S, O> = Arc<dyn Signal<S, Output = O>>;

impl<S: ?Sized, T: Signal<S> + ?Sized> Signal<S> for Arc<T> {
    type Output = T::Output;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn reset_pass(&self, state: &S, pass: ResetPass) -> Result<(), SignalError> {
        (**self).reset_pass(state, pass)
    }

    fn obtain(&self, state: &S, flags: StepFlags) -> Result<Self::Output, SignalError> {
        (**self).obtain(state, flags)
    }
}

impl<S: ?Sized, T: Signal<S> + ?Sized> Signal<S> for Box<T> {
    type Output = T::Output;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn reset_pass(&self, state: &S, pass: ResetPass) -> Result<(), SignalError> {
        (**self).reset_pass(state, pass)
    }

    fn obtain(&self, state: &S, flags: StepFlags) -> Result<Self::Output, SignalError> {
        (**self).obtain(state, flags)
    }
}
