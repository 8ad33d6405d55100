//! Reset pass identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`ResetPass`] allocation. Zero is reserved for
/// "never reset".
static RESET_PASS_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identifies one reset of a signal tree.
///
/// A root `reset()` allocates a fresh pass with [`ResetPass::next`] and
/// hands the same pass to every descendant. A node reachable through
/// several parents sees the pass more than once and resets only on the
/// first visit, so every node is reset exactly once per root reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResetPass(u64);

impl ResetPass {
    /// Allocate a fresh, unique pass.
    ///
    /// Each call returns a new pass that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(RESET_PASS_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw pass number. Never zero.
    pub fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn from_raw(raw: u64) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }
}

impl fmt::Display for ResetPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
