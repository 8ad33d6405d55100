//! Structured observation values.

use indexmap::IndexMap;

use crate::error::SignalError;
use crate::solver::FocusNodeObs;

/// A structured observation.
///
/// Packers over signals with a common output type return plain `Vec`s and
/// `IndexMap`s. `Value` is the common currency when the children produce
/// different types: wrap each with
/// [`SignalExt::into_value`](crate::SignalExt::into_value) and pack
/// `Value`s instead.
///
/// # Examples
///
/// ```
/// use indexmap::IndexMap;
/// use tally_core::Value;
///
/// let mut dict = IndexMap::new();
/// dict.insert("reward".to_string(), 1.5);
/// let value = Value::from(vec![Value::from(2.0), Value::from(dict)]);
///
/// let items = value.as_tuple().unwrap();
/// assert_eq!(items[0].as_scalar().unwrap(), 2.0);
/// assert_eq!(items[1].as_dict().unwrap()["reward"], Value::Scalar(1.5));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// No observation.
    Unit,
    /// A single number.
    Scalar(f64),
    /// An ordered sequence of values.
    Tuple(Vec<Value>),
    /// Name-keyed values in insertion order.
    Dict(IndexMap<String, Value>),
}

impl Value {
    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Scalar(_) => "scalar",
            Self::Tuple(_) => "tuple",
            Self::Dict(_) => "dict",
        }
    }

    /// The number held by a [`Value::Scalar`].
    pub fn as_scalar(&self) -> Result<f64, SignalError> {
        match self {
            Self::Scalar(v) => Ok(*v),
            other => Err(other.mismatch("scalar")),
        }
    }

    /// The items of a [`Value::Tuple`].
    pub fn as_tuple(&self) -> Result<&[Value], SignalError> {
        match self {
            Self::Tuple(items) => Ok(items),
            other => Err(other.mismatch("tuple")),
        }
    }

    /// The entries of a [`Value::Dict`].
    pub fn as_dict(&self) -> Result<&IndexMap<String, Value>, SignalError> {
        match self {
            Self::Dict(entries) => Ok(entries),
            other => Err(other.mismatch("dict")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> SignalError {
        SignalError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::Unit
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Scalar(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Scalar(if v { 1.0 } else { 0.0 })
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Scalar(v as f64)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<IndexMap<String, T>> for Value {
    fn from(entries: IndexMap<String, T>) -> Self {
        Self::Dict(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Unit, Into::into)
    }
}

/// A dict keyed by field name; a missing parent is [`Value::Unit`].
impl From<FocusNodeObs> for Value {
    fn from(node: FocusNodeObs) -> Self {
        let mut entries = IndexMap::with_capacity(7);
        entries.insert("number".to_string(), Value::from(node.number));
        entries.insert("depth".to_string(), Value::Scalar(f64::from(node.depth)));
        entries.insert("lowerbound".to_string(), Value::from(node.lowerbound));
        entries.insert("estimate".to_string(), Value::from(node.estimate));
        entries.insert(
            "n_added_conss".to_string(),
            Value::Scalar(f64::from(node.n_added_conss)),
        );
        entries.insert("parent_number".to_string(), Value::from(node.parent_number));
        entries.insert(
            "parent_lowerbound".to_string(),
            Value::from(node.parent_lowerbound),
        );
        Self::Dict(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_from_numbers() {
        assert_eq!(Value::from(2.5), Value::Scalar(2.5));
        assert_eq!(Value::from(true), Value::Scalar(1.0));
        assert_eq!(Value::from(7u64), Value::Scalar(7.0));
        assert_eq!(Value::from(()), Value::Unit);
        assert_eq!(Value::from(None::<f64>), Value::Unit);
    }

    #[test]
    fn vec_becomes_tuple() {
        let v = Value::from(vec![1.0, 2.0]);
        assert_eq!(v, Value::Tuple(vec![Value::Scalar(1.0), Value::Scalar(2.0)]));
        assert_eq!(v.kind(), "tuple");
    }

    #[test]
    fn dict_keeps_insertion_order() {
        let mut m = IndexMap::new();
        m.insert("z".to_string(), 1.0);
        m.insert("a".to_string(), 2.0);
        let v = Value::from(m);
        let keys: Vec<&str> = v.as_dict().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a"]);
    }

    #[test]
    fn accessor_reports_type_mismatch() {
        let err = Value::Unit.as_scalar().unwrap_err();
        assert_eq!(
            err,
            SignalError::TypeMismatch {
                expected: "scalar",
                found: "unit",
            }
        );
        assert!(Value::Scalar(1.0).as_dict().is_err());
    }

    #[test]
    fn focus_node_becomes_dict() {
        let node = FocusNodeObs {
            number: 3,
            depth: 1,
            lowerbound: 2.5,
            estimate: 4.0,
            n_added_conss: 0,
            parent_number: Some(1),
            parent_lowerbound: None,
        };
        let v = Value::from(Some(node));
        let d = v.as_dict().unwrap();
        assert_eq!(d.len(), 7);
        assert_eq!(d["number"], Value::Scalar(3.0));
        assert_eq!(d["parent_number"], Value::Scalar(1.0));
        assert_eq!(d["parent_lowerbound"], Value::Unit);
        assert_eq!(Value::from(None::<FocusNodeObs>), Value::Unit);
    }
}
