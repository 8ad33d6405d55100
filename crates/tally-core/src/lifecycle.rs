//! Per-node reset state.
//!
//! Every stateful node embeds a [`Lifecycle`]. It records the last
//! [`ResetPass`] the node completed, which gives both the
//! `Unreset -> Ready` state machine and the "once per pass" guarantee
//! for nodes shared between several parents.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::error::SignalError;
use crate::id::ResetPass;

const UNRESET: u64 = 0;

/// Observable lifecycle state of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Never reset, or the last reset failed part-way.
    Unreset,
    /// Reset completed; `obtain()` is well-defined.
    Ready,
}

/// Reset bookkeeping for one node.
///
/// Holds the last completed pass (`0` while unreset). Atomic so that
/// nodes stay `Send + Sync` and can be shared behind an `Arc`.
pub struct Lifecycle {
    pass: AtomicU64,
}

// Compile-time assertion: Lifecycle must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<Lifecycle>();
};

impl Lifecycle {
    /// A fresh lifecycle in [`Phase::Unreset`].
    pub const fn new() -> Self {
        Self {
            pass: AtomicU64::new(UNRESET),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        match self.pass.load(Ordering::Acquire) {
            UNRESET => Phase::Unreset,
            _ => Phase::Ready,
        }
    }

    /// The last pass this node completed, if any.
    pub fn last_pass(&self) -> Option<ResetPass> {
        ResetPass::from_raw(self.pass.load(Ordering::Acquire))
    }

    /// Run one node's reset for `pass`.
    ///
    /// If the node already completed `pass` this is a no-op. Otherwise the
    /// node drops to [`Phase::Unreset`], `reset` runs (typically resetting
    /// children, then any local snapshot), and on success the node is marked
    /// [`Phase::Ready`] for `pass`. An error from `reset` is returned
    /// unchanged and leaves the node unreset.
    pub fn run<F>(&self, name: &str, pass: ResetPass, reset: F) -> Result<(), SignalError>
    where
        F: FnOnce() -> Result<(), SignalError>,
    {
        if self.pass.load(Ordering::Acquire) == pass.get() {
            return Ok(());
        }
        self.pass.store(UNRESET, Ordering::Release);
        reset()?;
        self.pass.store(pass.get(), Ordering::Release);
        debug!(target: "tally::lifecycle", node = name, %pass, "reset");
        Ok(())
    }

    /// Fail with [`SignalError::UninitializedUse`] unless the node is ready.
    pub fn ensure_ready(&self, name: &str) -> Result<(), SignalError> {
        match self.phase() {
            Phase::Ready => Ok(()),
            Phase::Unreset => {
                warn!(target: "tally::lifecycle", node = name, "obtain before reset");
                Err(SignalError::UninitializedUse { name: name.into() })
            }
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("phase", &self.phase())
            .field("last_pass", &self.last_pass())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unreset() {
        let lc = Lifecycle::new();
        assert_eq!(lc.phase(), Phase::Unreset);
        assert_eq!(lc.last_pass(), None);
        assert!(matches!(
            lc.ensure_ready("node"),
            Err(SignalError::UninitializedUse { name }) if name == "node"
        ));
    }

    #[test]
    fn run_marks_ready() {
        let lc = Lifecycle::new();
        let pass = ResetPass::next();
        lc.run("node", pass, || Ok(())).unwrap();
        assert_eq!(lc.phase(), Phase::Ready);
        assert_eq!(lc.last_pass(), Some(pass));
        assert!(lc.ensure_ready("node").is_ok());
    }

    #[test]
    fn same_pass_runs_once() {
        let lc = Lifecycle::new();
        let pass = ResetPass::next();
        let mut calls = 0;
        lc.run("node", pass, || {
            calls += 1;
            Ok(())
        })
        .unwrap();
        lc.run("node", pass, || {
            calls += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(calls, 1);
    }

    #[test]
    fn new_pass_runs_again() {
        let lc = Lifecycle::new();
        let mut calls = 0;
        for _ in 0..3 {
            lc.run("node", ResetPass::next(), || {
                calls += 1;
                Ok(())
            })
            .unwrap();
        }
        assert_eq!(calls, 3);
        assert_eq!(lc.phase(), Phase::Ready);
    }

    #[test]
    fn failed_reset_leaves_node_unreset() {
        let lc = Lifecycle::new();
        lc.run("node", ResetPass::next(), || Ok(())).unwrap();
        assert_eq!(lc.phase(), Phase::Ready);

        let err = lc
            .run("node", ResetPass::next(), || {
                Err(SignalError::provider_failed("child", "boom"))
            })
            .unwrap_err();
        assert_eq!(err, SignalError::provider_failed("child", "boom"));
        assert_eq!(lc.phase(), Phase::Unreset);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn resets_once_per_change_of_pass(script in prop::collection::vec(0usize..4, 1..32)) {
                let passes: Vec<ResetPass> = (0..4).map(|_| ResetPass::next()).collect();
                let lc = Lifecycle::new();
                let mut calls = 0;
                let mut expected = 0;
                let mut last = None;
                for &i in &script {
                    lc.run("node", passes[i], || {
                        calls += 1;
                        Ok(())
                    })
                    .unwrap();
                    if last != Some(i) {
                        expected += 1;
                    }
                    last = Some(i);
                }
                prop_assert_eq!(calls, expected);
                prop_assert_eq!(lc.last_pass(), last.map(|i| passes[i]));
            }
        }
    }
}
