//! Focus node observation.

use std::marker::PhantomData;

use tracing::trace;

use tally_core::{FocusNodeObs, FocusNodeView, Lifecycle, ResetPass, Signal, SignalError, StepFlags};

/// Observes the branch-and-bound node the solver is focused on.
///
/// Returns `None` when the solver has no focus node, e.g. before the
/// first node is selected or once the solve is over. The observation is a
/// plain readout: reset only arms the node.
///
/// # Examples
///
/// ```
/// use tally_core::{FocusNodeObs, FocusNodeView, Signal, StepFlags};
/// use tally_obs::FocusNode;
///
/// struct Idle;
///
/// impl FocusNodeView for Idle {
///     fn focus_node(&self) -> Option<FocusNodeObs> {
///         None
///     }
/// }
///
/// let obs = FocusNode::<Idle>::new();
/// obs.reset(&Idle).unwrap();
/// assert_eq!(obs.obtain(&Idle, StepFlags::NONE).unwrap(), None);
/// ```
pub struct FocusNode<S: ?Sized> {
    lifecycle: Lifecycle,
    _state: PhantomData<fn(&S)>,
}

impl<S: ?Sized> FocusNode<S> {
    /// Create an unreset `FocusNode`.
    pub fn new() -> Self {
        Self {
            lifecycle: Lifecycle::new(),
            _state: PhantomData,
        }
    }
}

impl<S: ?Sized> Default for FocusNode<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: FocusNodeView + ?Sized> Signal<S> for FocusNode<S> {
    type Output = Option<FocusNodeObs>;

    fn name(&self) -> &str {
        "FocusNode"
    }

    fn reset_pass(&self, _state: &S, pass: ResetPass) -> Result<(), SignalError> {
        self.lifecycle.run("FocusNode", pass, || Ok(()))
    }

    fn obtain(&self, state: &S, _flags: StepFlags) -> Result<Option<FocusNodeObs>, SignalError> {
        self.lifecycle.ensure_ready("FocusNode")?;
        let node = state.focus_node();
        trace!(
            target: "tally::obs",
            node = "FocusNode",
            number = node.map(|n| n.number),
            "obtained"
        );
        Ok(node)
    }
}
