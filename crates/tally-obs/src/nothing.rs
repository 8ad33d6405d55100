//! The empty observation.

use tally_core::{ResetPass, Signal, SignalError, StepFlags};

/// Observation function that observes nothing.
///
/// Useful for environments whose agent acts without observing, and as a
/// placeholder slot in a packer. Stateless, so always ready.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Nothing;

impl<S: ?Sized> Signal<S> for Nothing {
    type Output = ();

    fn name(&self) -> &str {
        "Nothing"
    }

    fn reset_pass(&self, _state: &S, _pass: ResetPass) -> Result<(), SignalError> {
        Ok(())
    }

    fn obtain(&self, _state: &S, _flags: StepFlags) -> Result<(), SignalError> {
        Ok(())
    }
}
