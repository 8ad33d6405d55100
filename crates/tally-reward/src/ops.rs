//! Operator overloads for [`Reward`].
//!
//! Operators build combinator nodes; nothing is evaluated. A numeric
//! operand is lifted to a [`Constant`](crate::Constant) through
//! [`IntoReward`]. Lifting accepts any `f64`, NaN and infinities included,
//! matching the IEEE semantics of evaluation; build operands with
//! [`Reward::try_constant`] to reject them up front. Only types that
//! convert to `f64` exactly are lifted. Reflected forms (`4.0 - reward`)
//! lift the left operand and keep operand order, so `k - x` evaluates as
//! `k - x.obtain()`.
//!
//! Only `Reward`s and numbers are accepted as operands; anything else is
//! rejected at compile time.

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::expr::{BinaryOp, UnaryOp};
use crate::reward::Reward;

/// Conversion into a [`Reward`] operand.
pub trait IntoReward<S: ?Sized> {
    /// Lift `self` into a reward.
    fn into_reward(self) -> Reward<S>;
}

impl<S: ?Sized> IntoReward<S> for Reward<S> {
    fn into_reward(self) -> Reward<S> {
        self
    }
}

impl<S: ?Sized> IntoReward<S> for &Reward<S> {
    fn into_reward(self) -> Reward<S> {
        self.clone()
    }
}

macro_rules! lift_literal {
    ($($t:ty),*) => {
        $(
            impl<S: ?Sized + 'static> IntoReward<S> for $t {
                fn into_reward(self) -> Reward<S> {
                    Reward::constant(f64::from(self))
                }
            }
        )*
    };
}

lift_literal!(f64, f32, i32, u32);

impl<S: ?Sized + 'static> Neg for Reward<S> {
    type Output = Reward<S>;

    fn neg(self) -> Reward<S> {
        self.unary(UnaryOp::Neg)
    }
}

impl<S: ?Sized + 'static, R: IntoReward<S>> Add<R> for Reward<S> {
    type Output = Reward<S>;

    fn add(self, rhs: R) -> Reward<S> {
        Reward::binary(BinaryOp::Add, self, rhs.into_reward())
    }
}

/// `a - b` is `a + (-b)`.
impl<S: ?Sized + 'static, R: IntoReward<S>> Sub<R> for Reward<S> {
    type Output = Reward<S>;

    fn sub(self, rhs: R) -> Reward<S> {
        Reward::difference(self, rhs.into_reward())
    }
}

impl<S: ?Sized + 'static, R: IntoReward<S>> Mul<R> for Reward<S> {
    type Output = Reward<S>;

    fn mul(self, rhs: R) -> Reward<S> {
        Reward::binary(BinaryOp::Mul, self, rhs.into_reward())
    }
}

impl<S: ?Sized + 'static, R: IntoReward<S>> Div<R> for Reward<S> {
    type Output = Reward<S>;

    fn div(self, rhs: R) -> Reward<S> {
        Reward::binary(BinaryOp::Div, self, rhs.into_reward())
    }
}

// Reflected operators. Only the literal fallback types get these so that
// an unsuffixed literal on the left resolves without annotations.
macro_rules! reflected {
    ($($t:ty),*) => {
        $(
            #[allow(clippy::unnecessary_cast)]
            impl<S: ?Sized + 'static> Add<Reward<S>> for $t {
                type Output = Reward<S>;

                fn add(self, rhs: Reward<S>) -> Reward<S> {
                    Reward::<S>::constant(self as f64) + rhs
                }
            }

            #[allow(clippy::unnecessary_cast)]
            impl<S: ?Sized + 'static> Sub<Reward<S>> for $t {
                type Output = Reward<S>;

                fn sub(self, rhs: Reward<S>) -> Reward<S> {
                    Reward::<S>::constant(self as f64) - rhs
                }
            }

            #[allow(clippy::unnecessary_cast)]
            impl<S: ?Sized + 'static> Mul<Reward<S>> for $t {
                type Output = Reward<S>;

                fn mul(self, rhs: Reward<S>) -> Reward<S> {
                    Reward::<S>::constant(self as f64) * rhs
                }
            }

            #[allow(clippy::unnecessary_cast)]
            impl<S: ?Sized + 'static> Div<Reward<S>> for $t {
                type Output = Reward<S>;

                fn div(self, rhs: Reward<S>) -> Reward<S> {
                    Reward::<S>::constant(self as f64) / rhs
                }
            }
        )*
    };
}

reflected!(f64, i32);
