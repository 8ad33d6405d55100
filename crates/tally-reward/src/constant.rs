//! Constant reward.

use tally_core::{ResetPass, Signal, SignalError, StepFlags};

/// A reward that always returns the same value.
///
/// Constants hold no per-episode state, so they are always ready: `obtain()`
/// succeeds before any reset and returns the same value regardless of the
/// state or reset history. This is also what numeric literals are lifted to
/// when they appear in a reward expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Constant {
    value: f64,
    name: String,
}

impl Constant {
    /// Wrap any value, including non-finite ones.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            name: value.to_string(),
        }
    }

    /// Wrap `value`, rejecting NaN and infinities.
    pub fn try_new(value: f64) -> Result<Self, SignalError> {
        if value.is_finite() {
            Ok(Self::new(value))
        } else {
            Err(SignalError::NonFiniteLiteral { value })
        }
    }

    /// The wrapped value.
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl<S: ?Sized> Signal<S> for Constant {
    type Output = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn reset_pass(&self, _state: &S, _pass: ResetPass) -> Result<(), SignalError> {
        Ok(())
    }

    fn obtain(&self, _state: &S, _flags: StepFlags) -> Result<f64, SignalError> {
        Ok(self.value)
    }
}
