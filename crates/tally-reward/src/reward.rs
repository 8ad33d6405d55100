//! The [`Reward`] handle.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use tally_core::{ResetPass, Shared, Signal, SignalError, StepFlags};

use crate::constant::Constant;
use crate::expr::{Binary, BinaryOp, Node, Unary, UnaryOp};

/// Shared handle to a scalar reward function.
///
/// Cloning a `Reward` shares the underlying node; it never copies it. A
/// reward used as an operand in two different expressions is the same
/// node in both, so resetting it through one expression is visible through
/// the other.
///
/// # Examples
///
/// ```
/// use tally_core::{Signal, StepFlags};
/// use tally_reward::Reward;
///
/// let r: Reward<()> = (-Reward::constant(2.0)).abs() + 2.0;
/// assert_eq!(r.depth(), 3);
/// assert_eq!(r.to_string(), "(abs(-2) + 2)");
///
/// r.reset(&()).unwrap();
/// assert_eq!(r.obtain(&(), StepFlags::NONE).unwrap(), 4.0);
/// ```
pub struct Reward<S: ?Sized> {
    node: Arc<Node<S>>,
    depth: usize,
}

impl<S: ?Sized + 'static> Reward<S> {
    /// Wrap a primitive reward function.
    ///
    /// Wrapping a `Reward` returns that same handle, so its depth and
    /// rendering are kept.
    pub fn new<T>(signal: T) -> Self
    where
        T: Signal<S, Output = f64> + 'static,
    {
        if let Some(reward) = (&signal as &dyn Any).downcast_ref::<Self>() {
            return reward.clone();
        }
        Self::from_shared(Arc::new(signal))
    }

    /// Wrap an existing shared handle without copying it.
    ///
    /// The handle is opaque here, so it becomes a leaf of depth 0 even if
    /// it was built from a `Reward`; use [`Reward::new`] to keep the
    /// structure of a reward.
    pub fn from_shared(node: Shared<S, f64>) -> Self {
        Self {
            node: Arc::new(Node::Leaf(node)),
            depth: 0,
        }
    }

    /// A [`Constant`] reward.
    ///
    /// Any `f64` is accepted, NaN and infinities included; see
    /// [`Reward::try_constant`].
    pub fn constant(value: f64) -> Self {
        Self::new(Constant::new(value))
    }

    /// A [`Constant`] reward, rejecting NaN and infinities with
    /// [`SignalError::NonFiniteLiteral`].
    pub fn try_constant(value: f64) -> Result<Self, SignalError> {
        Constant::try_new(value).map(Self::new)
    }

    /// `|self|`.
    pub fn abs(self) -> Self {
        self.unary(UnaryOp::Abs)
    }

    /// This reward as a type-erased [`Shared`] handle to the same node.
    pub fn to_shared(&self) -> Shared<S, f64> {
        self.node.clone()
    }

    pub(crate) fn unary(self, op: UnaryOp) -> Self {
        let depth = self.depth + 1;
        Self {
            node: Arc::new(Node::Unary(Unary::new(op, self))),
            depth,
        }
    }

    pub(crate) fn binary(op: BinaryOp, lhs: Self, rhs: Self) -> Self {
        let depth = lhs.depth.max(rhs.depth) + 1;
        Self {
            node: Arc::new(Node::Binary(Binary::new(op, lhs, rhs))),
            depth,
        }
    }

    /// `lhs + (-rhs)`, rendered as `(lhs - rhs)`.
    pub(crate) fn difference(lhs: Self, rhs: Self) -> Self {
        let rhs = rhs.unary(UnaryOp::Neg);
        let depth = lhs.depth.max(rhs.depth) + 1;
        Self {
            node: Arc::new(Node::Binary(Binary::sub(lhs, rhs))),
            depth,
        }
    }
}

impl<S: ?Sized> Reward<S> {
    /// Number of combinator levels above the deepest leaf. Primitives,
    /// and handles wrapped with [`Reward::from_shared`], have depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether two handles refer to the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&*self.node, &*other.node) {
            (Node::Leaf(a), Node::Leaf(b)) => Arc::ptr_eq(a, b),
            _ => Arc::ptr_eq(&self.node, &other.node),
        }
    }

    pub(crate) fn node(&self) -> &Node<S> {
        &self.node
    }
}

impl<S: ?Sized> Clone for Reward<S> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
            depth: self.depth,
        }
    }
}

impl<S: ?Sized> Signal<S> for Reward<S> {
    type Output = f64;

    fn name(&self) -> &str {
        self.node.name()
    }

    fn reset_pass(&self, state: &S, pass: ResetPass) -> Result<(), SignalError> {
        self.node.reset_pass(state, pass)
    }

    fn obtain(&self, state: &S, flags: StepFlags) -> Result<f64, SignalError> {
        self.node.obtain(state, flags)
    }
}

impl<S: ?Sized + 'static> From<Constant> for Reward<S> {
    fn from(c: Constant) -> Self {
        Self::new(c)
    }
}

/// Renders the whole expression, e.g. `(abs(-2) + 2)`.
///
/// The text is built on each call by walking the tree, so a shared
/// subtree is printed once per occurrence.
impl<S: ?Sized> fmt::Display for Reward<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.render(f)
    }
}

impl<S: ?Sized> fmt::Debug for Reward<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reward")
            .field("expr", &self.to_string())
            .field("depth", &self.depth)
            .finish()
    }
}
