//! Read-only views of the solver state.
//!
//! The solver is an external collaborator. Built-in primitives only see it
//! through these traits, so any state type can drive them by implementing
//! the views it supports.

/// Read-only solver statistics used by the built-in reward primitives.
///
/// Counters are cumulative over the life of the solver and must not
/// decrease within an episode.
pub trait SolverStats {
    /// Total LP iterations performed so far.
    fn lp_iterations(&self) -> u64;

    /// Total branch-and-bound nodes processed so far.
    fn n_nodes(&self) -> u64;
}

impl<T: SolverStats + ?Sized> SolverStats for &T {
    fn lp_iterations(&self) -> u64 {
        (**self).lp_iterations()
    }

    fn n_nodes(&self) -> u64 {
        (**self).n_nodes()
    }
}

/// Snapshot of the branch-and-bound node the solver is focused on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusNodeObs {
    /// Node number, unique within a solve.
    pub number: u64,
    /// Depth in the tree; the root is `0`.
    pub depth: u32,
    /// Dual bound of the node.
    pub lowerbound: f64,
    /// Estimated value of the best feasible solution in the subtree.
    pub estimate: f64,
    /// Constraints added at this node.
    pub n_added_conss: u32,
    /// Number of the parent node; `None` at the root.
    pub parent_number: Option<u64>,
    /// Dual bound of the parent node; `None` at the root.
    pub parent_lowerbound: Option<f64>,
}

/// Access to the current focus node.
pub trait FocusNodeView {
    /// The node being processed, or `None` when there is none (before
    /// solving starts or after it ends).
    fn focus_node(&self) -> Option<FocusNodeObs>;
}

impl<T: FocusNodeView + ?Sized> FocusNodeView for &T {
    fn focus_node(&self) -> Option<FocusNodeObs> {
        (**self).focus_node()
    }
}
