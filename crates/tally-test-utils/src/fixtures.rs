//! Reusable signal test fixtures.
//!
//! - [`CountingSignal`]: observes how many times it has been reset.
//! - [`RecordingSignal`]: appends every reset/obtain to an [`EventLog`].
//! - [`FailingSignal`]: fails deterministically on reset or obtain.
//!
//! All fixtures work with any state type.

use std::sync::atomic::{AtomicUsize, Ordering};

use tally_core::{Lifecycle, ResetPass, Signal, SignalError, StepFlags};

use crate::EventLog;

/// Counts resets and returns the count as its value.
///
/// A reset driven through any parent is visible through every other
/// parent sharing the same instance.
pub struct CountingSignal {
    pub name: String,
    resets: AtomicUsize,
    obtains: AtomicUsize,
    lifecycle: Lifecycle,
}

impl CountingSignal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resets: AtomicUsize::new(0),
            obtains: AtomicUsize::new(0),
            lifecycle: Lifecycle::new(),
        }
    }

    /// Number of resets performed so far.
    pub fn resets(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }

    /// Number of `obtain()` calls so far, including failed ones.
    pub fn obtains(&self) -> usize {
        self.obtains.load(Ordering::SeqCst)
    }
}

impl<S: ?Sized> Signal<S> for CountingSignal {
    type Output = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn reset_pass(&self, _state: &S, pass: ResetPass) -> Result<(), SignalError> {
        self.lifecycle.run(&self.name, pass, || {
            self.resets.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    fn obtain(&self, _state: &S, _flags: StepFlags) -> Result<f64, SignalError> {
        self.obtains.fetch_add(1, Ordering::SeqCst);
        self.lifecycle.ensure_ready(&self.name)?;
        Ok(self.resets() as f64)
    }
}

/// Returns a fixed value and logs every reset and obtain.
pub struct RecordingSignal {
    pub name: String,
    pub value: f64,
    log: EventLog,
    lifecycle: Lifecycle,
}

impl RecordingSignal {
    pub fn new(name: impl Into<String>, value: f64, log: EventLog) -> Self {
        Self {
            name: name.into(),
            value,
            log,
            lifecycle: Lifecycle::new(),
        }
    }
}

impl<S: ?Sized> Signal<S> for RecordingSignal {
    type Output = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn reset_pass(&self, _state: &S, pass: ResetPass) -> Result<(), SignalError> {
        self.lifecycle.run(&self.name, pass, || {
            self.log.push(format!("reset:{}", self.name));
            Ok(())
        })
    }

    fn obtain(&self, _state: &S, _flags: StepFlags) -> Result<f64, SignalError> {
        self.lifecycle.ensure_ready(&self.name)?;
        self.log.push(format!("obtain:{}", self.name));
        Ok(self.value)
    }
}

/// Which call a [`FailingSignal`] fails on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Reset,
    Obtain,
}

/// Fails with [`FailingSignal::error`] on the configured call.
pub struct FailingSignal {
    pub name: String,
    pub fail_on: FailOn,
    lifecycle: Lifecycle,
}

impl FailingSignal {
    pub fn new(name: impl Into<String>, fail_on: FailOn) -> Self {
        Self {
            name: name.into(),
            fail_on,
            lifecycle: Lifecycle::new(),
        }
    }

    /// The error a `FailingSignal` named `name` returns.
    pub fn error(name: &str) -> SignalError {
        SignalError::provider_failed(name, "injected failure")
    }
}

impl<S: ?Sized> Signal<S> for FailingSignal {
    type Output = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn reset_pass(&self, _state: &S, pass: ResetPass) -> Result<(), SignalError> {
        self.lifecycle.run(&self.name, pass, || match self.fail_on {
            FailOn::Reset => Err(Self::error(&self.name)),
            FailOn::Obtain => Ok(()),
        })
    }

    fn obtain(&self, _state: &S, _flags: StepFlags) -> Result<f64, SignalError> {
        self.lifecycle.ensure_ready(&self.name)?;
        match self.fail_on {
            FailOn::Obtain => Err(Self::error(&self.name)),
            FailOn::Reset => Ok(0.0),
        }
    }
}
