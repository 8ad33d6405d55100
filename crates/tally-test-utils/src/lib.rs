//! Test utilities and mock types for Tally development.
//!
//! Provides a mock solver state implementing [`SolverStats`] and
//! [`FocusNodeView`], an
//! [`EventLog`] for asserting reset/obtain order, and the signal fixtures
//! in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::{Arc, Mutex, PoisonError};

use tally_core::{FocusNodeObs, FocusNodeView, SolverStats};

pub use fixtures::{CountingSignal, FailOn, FailingSignal, RecordingSignal};

/// Mock solver state with settable counters.
///
/// Counters only move forward through [`advance`](MockSolver::advance),
/// like a real solver between steps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MockSolver {
    lp_iterations: u64,
    n_nodes: u64,
    focus: Option<FocusNodeObs>,
}

impl MockSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A solver that has already done some work.
    pub fn with_counts(lp_iterations: u64, n_nodes: u64) -> Self {
        Self {
            lp_iterations,
            n_nodes,
            focus: None,
        }
    }

    /// Move the focus to `node`, or clear it.
    pub fn set_focus_node(&mut self, node: Option<FocusNodeObs>) {
        self.focus = node;
    }

    /// Simulate one solver step's worth of work.
    pub fn advance(&mut self, lp_iterations: u64, n_nodes: u64) {
        self.lp_iterations += lp_iterations;
        self.n_nodes += n_nodes;
    }
}

impl SolverStats for MockSolver {
    fn lp_iterations(&self) -> u64 {
        self.lp_iterations
    }

    fn n_nodes(&self) -> u64 {
        self.n_nodes
    }
}

impl FocusNodeView for MockSolver {
    fn focus_node(&self) -> Option<FocusNodeObs> {
        self.focus
    }
}

/// A root focus node with the given number and bound.
pub fn root_node(number: u64, lowerbound: f64) -> FocusNodeObs {
    FocusNodeObs {
        number,
        depth: 0,
        lowerbound,
        estimate: lowerbound,
        n_added_conss: 0,
        parent_number: None,
        parent_lowerbound: None,
    }
}

/// Shared, append-only log of `"reset:<name>"` / `"obtain:<name>"` events.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    pub fn push(&self, event: String) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    /// Drain and return every event recorded so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// A fresh, empty [`EventLog`].
pub fn event_log() -> EventLog {
    EventLog::default()
}
