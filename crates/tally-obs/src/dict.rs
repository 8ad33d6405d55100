//! Name-keyed packing of observation functions.

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::trace;

use tally_core::{Lifecycle, ResetPass, Shared, Signal, SignalError, StepFlags};

const NAME: &str = "DictFunction";

/// Packs named observation functions and returns their observations keyed
/// by name.
///
/// Keys are unique and kept in insertion order, which is also the reset
/// and evaluation order. Every observation has exactly the construction
/// time key set.
///
/// # Examples
///
/// ```
/// use tally_core::{Signal, SignalExt, StepFlags};
/// use tally_obs::DictFunction;
/// use tally_reward::{Constant, IsDone};
///
/// let obs = DictFunction::builder()
///     .with("bias", Constant::new(1.0).shared())
///     .with("done", IsDone::new().shared())
///     .build()
///     .unwrap();
///
/// obs.reset(&()).unwrap();
/// let o = obs.obtain(&(), StepFlags::NONE).unwrap();
/// assert_eq!(o["bias"], 1.0);
/// assert_eq!(o["done"], 0.0);
/// assert_eq!(o.len(), 2);
/// ```
pub struct DictFunction<S: ?Sized, O> {
    functions: IndexMap<String, Shared<S, O>>,
    lifecycle: Lifecycle,
}

impl<S: ?Sized, O> DictFunction<S, O> {
    /// Pack `(name, function)` pairs.
    ///
    /// Returns [`SignalError::ArityMismatch`] if there are no pairs or a
    /// name appears twice.
    pub fn new<I, K>(functions: I) -> Result<Self, SignalError>
    where
        I: IntoIterator<Item = (K, Shared<S, O>)>,
        K: Into<String>,
    {
        let mut map = IndexMap::new();
        for (key, function) in functions {
            match map.entry(key.into()) {
                Entry::Occupied(e) => {
                    return Err(SignalError::ArityMismatch {
                        reason: format!("duplicate observation name '{}'", e.key()),
                    });
                }
                Entry::Vacant(e) => {
                    e.insert(function);
                }
            }
        }
        if map.is_empty() {
            return Err(SignalError::ArityMismatch {
                reason: "DictFunction needs at least one observation function".into(),
            });
        }
        Ok(Self {
            functions: map,
            lifecycle: Lifecycle::new(),
        })
    }

    /// Start an empty [`DictFunctionBuilder`].
    pub fn builder() -> DictFunctionBuilder<S, O> {
        DictFunctionBuilder::new()
    }

    /// Number of packed functions; the size of every observation.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Always `false`: construction rejects empty packers.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Names of the packed functions, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// The function packed under `name`.
    pub fn get(&self, name: &str) -> Option<&Shared<S, O>> {
        self.functions.get(name)
    }
}

impl<S: ?Sized, O> Signal<S> for DictFunction<S, O> {
    type Output = IndexMap<String, O>;

    fn name(&self) -> &str {
        NAME
    }

    fn reset_pass(&self, state: &S, pass: ResetPass) -> Result<(), SignalError> {
        self.lifecycle.run(NAME, pass, || {
            self.functions
                .values()
                .try_for_each(|f| f.reset_pass(state, pass))
        })
    }

    fn obtain(&self, state: &S, flags: StepFlags) -> Result<IndexMap<String, O>, SignalError> {
        self.lifecycle.ensure_ready(NAME)?;
        let obs = self
            .functions
            .iter()
            .map(|(k, f)| f.obtain(state, flags).map(|o| (k.clone(), o)))
            .collect::<Result<IndexMap<_, _>, SignalError>>()?;
        trace!(target: "tally::obs", node = NAME, len = obs.len(), "obtained");
        Ok(obs)
    }
}

/// Incremental construction of a [`DictFunction`].
///
/// Names are checked when [`build`](DictFunctionBuilder::build) runs, so a
/// duplicate is still rejected before the packer exists.
pub struct DictFunctionBuilder<S: ?Sized, O> {
    entries: Vec<(String, Shared<S, O>)>,
}

impl<S: ?Sized, O> DictFunctionBuilder<S, O> {
    /// An empty builder.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add `function` under `name`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, function: Shared<S, O>) -> Self {
        self.entries.push((name.into(), function));
        self
    }

    /// Validate the names and build the packer.
    pub fn build(self) -> Result<DictFunction<S, O>, SignalError> {
        DictFunction::new(self.entries)
    }
}

impl<S: ?Sized, O> Default for DictFunctionBuilder<S, O> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::SignalExt;
    use tally_reward::Constant;
    use tally_test_utils::{event_log, CountingSignal, MockSolver, RecordingSignal};

    fn constant(v: f64) -> Shared<MockSolver, f64> {
        Constant::new(v).shared()
    }

    #[test]
    fn exact_key_set() {
        let d = DictFunction::new([("a", constant(1.0)), ("b", constant(2.0))]).unwrap();
        let state = MockSolver::new();
        d.reset(&state).unwrap();
        let o = d.obtain(&state, StepFlags::NONE).unwrap();
        assert_eq!(o.len(), 2);
        assert_eq!(o.get("a"), Some(&1.0));
        assert_eq!(o.get("b"), Some(&2.0));
        assert_eq!(d.keys().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let err = DictFunction::new([("a", constant(1.0)), ("a", constant(2.0))])
            .err()
            .unwrap();
        assert!(matches!(
            err,
            SignalError::ArityMismatch { reason } if reason.contains("'a'")
        ));
    }

    #[test]
    fn empty_is_rejected() {
        let err = DictFunction::<MockSolver, f64>::builder().build().err().unwrap();
        assert!(matches!(err, SignalError::ArityMismatch { .. }));
    }

    #[test]
    fn insertion_order_drives_reset_and_output() {
        let log = event_log();
        let d: DictFunction<MockSolver, f64> = DictFunction::builder()
            .with("z", RecordingSignal::new("z", 1.0, log.clone()).shared())
            .with("a", RecordingSignal::new("a", 2.0, log.clone()).shared())
            .build()
            .unwrap();
        let state = MockSolver::new();
        d.reset(&state).unwrap();
        let o = d.obtain(&state, StepFlags::NONE).unwrap();
        assert_eq!(o.keys().map(String::as_str).collect::<Vec<_>>(), ["z", "a"]);
        assert_eq!(log.take(), ["reset:z", "reset:a", "obtain:z", "obtain:a"]);
    }

    #[test]
    fn name_is_a_fixed_tag() {
        let d = DictFunction::new([("x", constant(1.5))]).unwrap();
        assert_eq!(d.name(), "DictFunction");
    }

    #[test]
    fn obtain_before_reset_fails() {
        let d = DictFunction::new([("c", CountingSignal::new("c").shared())]).unwrap();
        assert!(matches!(
            d.obtain(&MockSolver::new(), StepFlags::NONE),
            Err(SignalError::UninitializedUse { .. })
        ));
        assert!(d.get("c").is_some());
        assert!(d.get("missing").is_none());
    }
}
