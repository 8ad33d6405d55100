//! Built-in primitive reward functions.
//!
//! The counters read solver statistics through
//! [`SolverStats`]; they snapshot the counter on reset and report the
//! amount of work done since. `obtain()` does not move the snapshot, so
//! repeated calls within a step agree.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use tally_core::{Lifecycle, ResetPass, Signal, SignalError, SolverStats, StepFlags};

use crate::reward::Reward;

/// `1` on the step the episode terminates, `0` otherwise.
///
/// Reads only the [`StepFlags::done`] flag, never the state.
#[derive(Debug, Default)]
pub struct IsDone {
    lifecycle: Lifecycle,
}

impl IsDone {
    /// Create an unreset `IsDone`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: ?Sized> Signal<S> for IsDone {
    type Output = f64;

    fn name(&self) -> &str {
        "IsDone"
    }

    fn reset_pass(&self, _state: &S, pass: ResetPass) -> Result<(), SignalError> {
        self.lifecycle.run("IsDone", pass, || Ok(()))
    }

    fn obtain(&self, _state: &S, flags: StepFlags) -> Result<f64, SignalError> {
        self.lifecycle.ensure_ready("IsDone")?;
        Ok(if flags.done { 1.0 } else { 0.0 })
    }
}

/// Counter snapshot shared by the "work since reset" primitives.
#[derive(Debug, Default)]
struct Baseline {
    value: AtomicU64,
}

impl Baseline {
    fn snapshot(&self, current: u64) {
        self.value.store(current, Ordering::Release);
    }

    fn since(&self, name: &str, current: u64) -> Result<f64, SignalError> {
        let base = self.value.load(Ordering::Acquire);
        let delta = current.checked_sub(base).ok_or_else(|| {
            SignalError::provider_failed(
                name,
                format!("counter went backwards: {current} < {base} at reset"),
            )
        })?;
        trace!(target: "tally::reward", node = name, base, current, "counter delta");
        Ok(delta as f64)
    }
}

/// Number of LP iterations performed since the episode was reset.
///
/// Always `>= 0`. See [`neg_lp_iterations`] for the penalty form.
pub struct LpIterations<S: ?Sized> {
    lifecycle: Lifecycle,
    baseline: Baseline,
    _state: PhantomData<fn(&S)>,
}

impl<S: ?Sized> LpIterations<S> {
    /// Create an unreset `LpIterations`.
    pub fn new() -> Self {
        Self {
            lifecycle: Lifecycle::new(),
            baseline: Baseline::default(),
            _state: PhantomData,
        }
    }
}

impl<S: ?Sized> Default for LpIterations<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SolverStats + ?Sized> Signal<S> for LpIterations<S> {
    type Output = f64;

    fn name(&self) -> &str {
        "LpIterations"
    }

    fn reset_pass(&self, state: &S, pass: ResetPass) -> Result<(), SignalError> {
        self.lifecycle.run("LpIterations", pass, || {
            self.baseline.snapshot(state.lp_iterations());
            Ok(())
        })
    }

    fn obtain(&self, state: &S, _flags: StepFlags) -> Result<f64, SignalError> {
        self.lifecycle.ensure_ready("LpIterations")?;
        self.baseline.since("LpIterations", state.lp_iterations())
    }
}

/// Number of branch-and-bound nodes processed since the episode was reset.
pub struct NNodes<S: ?Sized> {
    lifecycle: Lifecycle,
    baseline: Baseline,
    _state: PhantomData<fn(&S)>,
}

impl<S: ?Sized> NNodes<S> {
    /// Create an unreset `NNodes`.
    pub fn new() -> Self {
        Self {
            lifecycle: Lifecycle::new(),
            baseline: Baseline::default(),
            _state: PhantomData,
        }
    }
}

impl<S: ?Sized> Default for NNodes<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SolverStats + ?Sized> Signal<S> for NNodes<S> {
    type Output = f64;

    fn name(&self) -> &str {
        "NNodes"
    }

    fn reset_pass(&self, state: &S, pass: ResetPass) -> Result<(), SignalError> {
        self.lifecycle.run("NNodes", pass, || {
            self.baseline.snapshot(state.n_nodes());
            Ok(())
        })
    }

    fn obtain(&self, state: &S, _flags: StepFlags) -> Result<f64, SignalError> {
        self.lifecycle.ensure_ready("NNodes")?;
        self.baseline.since("NNodes", state.n_nodes())
    }
}

/// LP iteration penalty: `-LpIterations`, always `<= 0`.
pub fn neg_lp_iterations<S: SolverStats + ?Sized + 'static>() -> Reward<S> {
    -Reward::new(LpIterations::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_test_utils::MockSolver;

    #[test]
    fn is_done_reads_flag() {
        let f = IsDone::new();
        let state = MockSolver::new();
        Signal::<MockSolver>::reset(&f, &state).unwrap();
        assert_eq!(f.obtain(&state, StepFlags::NONE).unwrap(), 0.0);
        assert_eq!(f.obtain(&state, StepFlags::DONE).unwrap(), 1.0);
    }

    #[test]
    fn is_done_requires_reset() {
        let f = IsDone::new();
        let err = Signal::<MockSolver>::obtain(&f, &MockSolver::new(), StepFlags::DONE)
            .unwrap_err();
        assert_eq!(
            err,
            SignalError::UninitializedUse {
                name: "IsDone".into()
            }
        );
    }

    #[test]
    fn lp_iterations_counts_from_reset() {
        let f = LpIterations::new();
        let mut state = MockSolver::new();
        state.advance(40, 3);
        f.reset(&state).unwrap();
        assert_eq!(f.obtain(&state, StepFlags::NONE).unwrap(), 0.0);

        state.advance(25, 1);
        assert_eq!(f.obtain(&state, StepFlags::NONE).unwrap(), 25.0);
        // Repeated calls within a step agree.
        assert_eq!(f.obtain(&state, StepFlags::NONE).unwrap(), 25.0);

        f.reset(&state).unwrap();
        assert_eq!(f.obtain(&state, StepFlags::NONE).unwrap(), 0.0);
    }

    #[test]
    fn counter_going_backwards_is_an_error() {
        let f = NNodes::new();
        let mut state = MockSolver::new();
        state.advance(0, 10);
        f.reset(&state).unwrap();
        let restarted = MockSolver::new();
        assert!(matches!(
            f.obtain(&restarted, StepFlags::NONE),
            Err(SignalError::ProviderFailed { name, .. }) if name == "NNodes"
        ));
    }

    #[test]
    fn n_nodes_counts_from_reset() {
        let f = NNodes::new();
        let mut state = MockSolver::new();
        f.reset(&state).unwrap();
        state.advance(100, 7);
        assert_eq!(f.obtain(&state, StepFlags::NONE).unwrap(), 7.0);
    }

    #[test]
    fn neg_lp_iterations_is_non_positive() {
        let f = neg_lp_iterations::<MockSolver>();
        let mut state = MockSolver::new();
        state.advance(12, 0);
        f.reset(&state).unwrap();
        assert!(f.obtain(&state, StepFlags::NONE).unwrap() <= 0.0);
        state.advance(8, 0);
        assert_eq!(f.obtain(&state, StepFlags::NONE).unwrap(), -8.0);
        assert_eq!(f.to_string(), "-LpIterations");
    }
}
