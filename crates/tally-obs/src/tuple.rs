//! Ordered packing of observation functions.

use smallvec::SmallVec;
use tracing::trace;

use tally_core::{Lifecycle, ResetPass, Shared, Signal, SignalError, StepFlags};

const NAME: &str = "TupleFunction";

/// Packs observation functions and returns their observations in order.
///
/// Element `i` of every observation is the `i`-th child's observation.
/// The number and order of children are fixed at construction.
///
/// # Examples
///
/// ```
/// use tally_core::{Signal, SignalExt, StepFlags};
/// use tally_obs::TupleFunction;
/// use tally_reward::{Constant, IsDone};
///
/// let obs = TupleFunction::new(vec![
///     Constant::new(1.0).shared(),
///     IsDone::new().shared(),
/// ])
/// .unwrap();
///
/// obs.reset(&()).unwrap();
/// assert_eq!(obs.obtain(&(), StepFlags::DONE).unwrap(), vec![1.0, 1.0]);
/// ```
pub struct TupleFunction<S: ?Sized, O> {
    functions: SmallVec<[Shared<S, O>; 4]>,
    lifecycle: Lifecycle,
}

impl<S: ?Sized, O> TupleFunction<S, O> {
    /// Pack `functions` in the given order.
    ///
    /// Returns [`SignalError::ArityMismatch`] if `functions` is empty.
    pub fn new(functions: Vec<Shared<S, O>>) -> Result<Self, SignalError> {
        if functions.is_empty() {
            return Err(SignalError::ArityMismatch {
                reason: "TupleFunction needs at least one observation function".into(),
            });
        }
        Ok(Self {
            functions: functions.into_iter().collect(),
            lifecycle: Lifecycle::new(),
        })
    }

    /// Number of packed functions; the length of every observation.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Always `false`: construction rejects empty packers.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// The packed functions, in order.
    pub fn functions(&self) -> &[Shared<S, O>] {
        &self.functions
    }
}

impl<S: ?Sized, O> Signal<S> for TupleFunction<S, O> {
    type Output = Vec<O>;

    fn name(&self) -> &str {
        NAME
    }

    fn reset_pass(&self, state: &S, pass: ResetPass) -> Result<(), SignalError> {
        self.lifecycle.run(NAME, pass, || {
            self.functions
                .iter()
                .try_for_each(|f| f.reset_pass(state, pass))
        })
    }

    fn obtain(&self, state: &S, flags: StepFlags) -> Result<Vec<O>, SignalError> {
        self.lifecycle.ensure_ready(NAME)?;
        let obs = self
            .functions
            .iter()
            .map(|f| f.obtain(state, flags))
            .collect::<Result<Vec<_>, _>>()?;
        trace!(target: "tally::obs", node = NAME, len = obs.len(), "obtained");
        Ok(obs)
    }
}
