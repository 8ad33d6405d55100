//! Combinator nodes of the reward expression tree.
//!
//! Nodes are built by the operator impls in [`ops`](crate::ops) and by
//! [`Reward::abs`]; they are not constructed directly. Each node owns
//! shared handles to its children and a [`Lifecycle`] of its own.
//!
//! A node's name is a fixed tag (`"Add"`, `"Neg"`, ...). The full
//! expression is only rendered on demand by `Display for Reward`, so a
//! subtree shared by many parents costs one node, never one copy of its
//! text per parent.

use std::fmt;

use tracing::trace;

use tally_core::{Lifecycle, ResetPass, Shared, Signal, SignalError, StepFlags};

use crate::reward::Reward;

/// Single-child operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-x`.
    Neg,
    /// `|x|`.
    Abs,
}

impl UnaryOp {
    /// Apply the operation to an already-obtained child value.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Neg => -x,
            Self::Abs => x.abs(),
        }
    }

    /// Node name used in errors and logs.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Neg => "Neg",
            Self::Abs => "Abs",
        }
    }
}

/// Two-child operation.
///
/// Subtraction is not an operation of its own: `a - b` is built as
/// `a + (-b)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    /// `a + b`.
    Add,
    /// `a * b`.
    Mul,
    /// `a / b`, IEEE-754 semantics (a zero divisor yields an infinity or NaN).
    Div,
}

impl BinaryOp {
    /// Apply the operation to already-obtained child values.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Mul => a * b,
            Self::Div => a / b,
        }
    }

    /// Node name used in errors and logs.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Mul => "Mul",
            Self::Div => "Div",
        }
    }

    pub(crate) fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

/// One node of a reward tree.
pub(crate) enum Node<S: ?Sized> {
    /// A primitive, or any signal wrapped as a leaf.
    Leaf(Shared<S, f64>),
    Unary(Unary<S>),
    Binary(Binary<S>),
}

impl<S: ?Sized> Node<S> {
    /// Write the expression rooted here.
    pub(crate) fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(leaf) => f.write_str(leaf.name()),
            Self::Unary(u) => match u.op {
                UnaryOp::Neg => {
                    f.write_str("-")?;
                    u.child.node().render(f)
                }
                UnaryOp::Abs => {
                    f.write_str("abs(")?;
                    u.child.node().render(f)?;
                    f.write_str(")")
                }
            },
            Self::Binary(b) => {
                f.write_str("(")?;
                b.lhs.node().render(f)?;
                match b.subtracted() {
                    Some(rhs) => {
                        f.write_str(" - ")?;
                        rhs.node().render(f)?;
                    }
                    None => {
                        write!(f, " {} ", b.op.symbol())?;
                        b.rhs.node().render(f)?;
                    }
                }
                f.write_str(")")
            }
        }
    }
}

impl<S: ?Sized> Signal<S> for Node<S> {
    type Output = f64;

    fn name(&self) -> &str {
        match self {
            Self::Leaf(leaf) => leaf.name(),
            Self::Unary(u) => u.op.tag(),
            Self::Binary(b) => b.tag(),
        }
    }

    fn reset_pass(&self, state: &S, pass: ResetPass) -> Result<(), SignalError> {
        match self {
            Self::Leaf(leaf) => leaf.reset_pass(state, pass),
            Self::Unary(u) => u.reset_pass(state, pass),
            Self::Binary(b) => b.reset_pass(state, pass),
        }
    }

    fn obtain(&self, state: &S, flags: StepFlags) -> Result<f64, SignalError> {
        match self {
            Self::Leaf(leaf) => leaf.obtain(state, flags),
            Self::Unary(u) => u.obtain(state, flags),
            Self::Binary(b) => b.obtain(state, flags),
        }
    }
}

pub(crate) struct Unary<S: ?Sized> {
    op: UnaryOp,
    child: Reward<S>,
    lifecycle: Lifecycle,
}

impl<S: ?Sized> Unary<S> {
    pub(crate) fn new(op: UnaryOp, child: Reward<S>) -> Self {
        Self {
            op,
            child,
            lifecycle: Lifecycle::new(),
        }
    }

    fn reset_pass(&self, state: &S, pass: ResetPass) -> Result<(), SignalError> {
        self.lifecycle
            .run(self.op.tag(), pass, || self.child.reset_pass(state, pass))
    }

    fn obtain(&self, state: &S, flags: StepFlags) -> Result<f64, SignalError> {
        self.lifecycle.ensure_ready(self.op.tag())?;
        let x = self.child.obtain(state, flags)?;
        let value = self.op.apply(x);
        trace!(target: "tally::reward", node = self.op.tag(), value, "obtained");
        Ok(value)
    }
}

pub(crate) struct Binary<S: ?Sized> {
    op: BinaryOp,
    lhs: Reward<S>,
    rhs: Reward<S>,
    // Built by `a - b`; `rhs` is then `-b`.
    sub: bool,
    lifecycle: Lifecycle,
}

impl<S: ?Sized> Binary<S> {
    pub(crate) fn new(op: BinaryOp, lhs: Reward<S>, rhs: Reward<S>) -> Self {
        Self {
            op,
            lhs,
            rhs,
            sub: false,
            lifecycle: Lifecycle::new(),
        }
    }

    /// `lhs + neg_rhs`, rendered as `lhs - rhs`.
    pub(crate) fn sub(lhs: Reward<S>, neg_rhs: Reward<S>) -> Self {
        Self {
            sub: true,
            ..Self::new(BinaryOp::Add, lhs, neg_rhs)
        }
    }

    fn tag(&self) -> &'static str {
        if self.sub {
            "Sub"
        } else {
            self.op.tag()
        }
    }

    /// The subtrahend of a node built by `a - b`.
    fn subtracted(&self) -> Option<&Reward<S>> {
        match (self.sub, self.rhs.node()) {
            (true, Node::Unary(u)) if u.op == UnaryOp::Neg => Some(&u.child),
            _ => None,
        }
    }

    fn reset_pass(&self, state: &S, pass: ResetPass) -> Result<(), SignalError> {
        self.lifecycle.run(self.tag(), pass, || {
            self.lhs.reset_pass(state, pass)?;
            self.rhs.reset_pass(state, pass)
        })
    }

    fn obtain(&self, state: &S, flags: StepFlags) -> Result<f64, SignalError> {
        self.lifecycle.ensure_ready(self.tag())?;
        let a = self.lhs.obtain(state, flags)?;
        let b = self.rhs.obtain(state, flags)?;
        let value = self.op.apply(a, b);
        trace!(target: "tally::reward", node = self.tag(), value, "obtained");
        Ok(value)
    }
}
