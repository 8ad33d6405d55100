//! Error types for Tally signal functions.
//!
//! Every failure at this layer is a programming or configuration error:
//! nothing is transient and nothing is retried. Errors raised by a child
//! are returned unchanged by every ancestor.

use std::error::Error;
use std::fmt;

/// Errors from constructing or evaluating a signal function.
#[derive(Clone, Debug, PartialEq)]
pub enum SignalError {
    /// `obtain()` was called on a node that has not been reset for the
    /// current episode.
    UninitializedUse {
        /// Name of the node that was never reset.
        name: String,
    },
    /// A packer was given an unusable set of children: no children at
    /// all, or a duplicated name.
    ArityMismatch {
        /// Description of the arity problem.
        reason: String,
    },
    /// A structured value did not have the expected shape.
    TypeMismatch {
        /// The kind of value that was expected.
        expected: &'static str,
        /// The kind of value that was found.
        found: &'static str,
    },
    /// A literal lifted into a constant was NaN or infinite.
    NonFiniteLiteral {
        /// The rejected literal.
        value: f64,
    },
    /// A primitive could not read what it needs from the solver state.
    ProviderFailed {
        /// Name of the failing primitive.
        name: String,
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl SignalError {
    /// Shorthand for [`SignalError::ProviderFailed`].
    pub fn provider_failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ProviderFailed {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UninitializedUse { name } => {
                write!(f, "'{name}' was obtained before being reset")
            }
            Self::ArityMismatch { reason } => write!(f, "arity mismatch: {reason}"),
            Self::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {expected}, found {found}")
            }
            Self::NonFiniteLiteral { value } => {
                write!(f, "literal {value} is not a finite number")
            }
            Self::ProviderFailed { name, reason } => {
                write!(f, "provider '{name}' failed: {reason}")
            }
        }
    }
}

impl Error for SignalError {}
