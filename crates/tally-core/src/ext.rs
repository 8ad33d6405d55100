//! Adapters available on every [`Signal`].

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::SignalError;
use crate::id::ResetPass;
use crate::lifecycle::Lifecycle;
use crate::traits::{Shared, Signal, StepFlags};
use crate::value::Value;

/// Extension methods for [`Signal`] implementors.
pub trait SignalExt<S: ?Sized>: Signal<S> + Sized {
    /// Move the signal behind a [`Shared`] handle.
    fn shared(self) -> Shared<S, Self::Output>
    where
        Self: 'static,
    {
        Arc::new(self)
    }

    /// Transform every obtained value with `f`.
    ///
    /// The adapter is a node of its own: it has its own lifecycle and
    /// forwards resets to the wrapped signal.
    fn map<F, U>(self, f: F) -> Map<S, Self, F, U>
    where
        F: Fn(Self::Output) -> U + Send + Sync,
    {
        Map::new(self, f)
    }

    /// Convert the output into a structured [`Value`], so signals with
    /// different output types can be packed together.
    #[allow(clippy::type_complexity)]
    fn into_value(self) -> Map<S, Self, fn(Self::Output) -> Value, Value>
    where
        Self::Output: Into<Value>,
    {
        Map::new(self, Into::into as fn(Self::Output) -> Value)
    }
}

impl<S: ?Sized, T: Signal<S>> SignalExt<S> for T {}

/// Signal adapter returned by [`SignalExt::map`] and
/// [`SignalExt::into_value`].
pub struct Map<S: ?Sized, T, F, U> {
    inner: T,
    f: F,
    lifecycle: Lifecycle,
    _types: PhantomData<fn(&S) -> U>,
}

impl<S: ?Sized, T, F, U> Map<S, T, F, U> {
    fn new(inner: T, f: F) -> Self {
        Self {
            inner,
            f,
            lifecycle: Lifecycle::new(),
            _types: PhantomData,
        }
    }

    /// The wrapped signal.
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<S, T, F, U> Signal<S> for Map<S, T, F, U>
where
    S: ?Sized,
    T: Signal<S>,
    F: Fn(T::Output) -> U + Send + Sync,
{
    type Output = U;

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn reset_pass(&self, state: &S, pass: ResetPass) -> Result<(), SignalError> {
        self.lifecycle
            .run(self.name(), pass, || self.inner.reset_pass(state, pass))
    }

    fn obtain(&self, state: &S, flags: StepFlags) -> Result<U, SignalError> {
        self.lifecycle.ensure_ready(self.name())?;
        let raw = self.inner.obtain(state, flags)?;
        Ok((self.f)(raw))
    }
}

impl<S: ?Sized, T: fmt::Debug, F, U> fmt::Debug for Map<S, T, F, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("inner", &self.inner)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Phase;

    struct Echo {
        lifecycle: Lifecycle,
    }

    impl Signal<f64> for Echo {
        type Output = f64;

        fn name(&self) -> &str {
            "Echo"
        }

        fn reset_pass(&self, _state: &f64, pass: ResetPass) -> Result<(), SignalError> {
            self.lifecycle.run(self.name(), pass, || Ok(()))
        }

        fn obtain(&self, state: &f64, _flags: StepFlags) -> Result<f64, SignalError> {
            self.lifecycle.ensure_ready(self.name())?;
            Ok(*state)
        }
    }

    fn echo() -> Echo {
        Echo {
            lifecycle: Lifecycle::new(),
        }
    }

    #[test]
    fn map_applies_function_after_reset() {
        let doubled = echo().map(|v| v * 2.0);
        assert!(doubled.obtain(&1.0, StepFlags::NONE).is_err());
        doubled.reset(&0.0).unwrap();
        assert_eq!(doubled.obtain(&1.5, StepFlags::NONE).unwrap(), 3.0);
        assert_eq!(doubled.name(), "Echo");
    }

    #[test]
    fn map_forwards_reset_to_inner() {
        let mapped = echo().map(|v| v > 0.0);
        mapped.reset(&0.0).unwrap();
        assert_eq!(mapped.inner().lifecycle.phase(), Phase::Ready);
        assert!(mapped.obtain(&2.0, StepFlags::NONE).unwrap());
    }

    #[test]
    fn into_value_wraps_scalars() {
        let v = echo().into_value();
        v.reset(&0.0).unwrap();
        assert_eq!(v.obtain(&4.0, StepFlags::NONE).unwrap(), Value::Scalar(4.0));
    }

    #[test]
    fn shared_handle_is_a_signal() {
        let handle: Shared<f64, f64> = echo().shared();
        let other = Arc::clone(&handle);
        handle.reset(&0.0).unwrap();
        assert_eq!(other.obtain(&9.0, StepFlags::NONE).unwrap(), 9.0);
    }
}
