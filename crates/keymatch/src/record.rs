//! Field access for records.
//!
//! The matcher never looks inside a record directly; it asks for one field at
//! a time through the [`Record`] trait. Absence (`None`) and a present null
//! (`Some(&Value::Null)`) are different answers: the first excludes the record.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;

use crate::value::Value;

/// A field map in insertion order, the record type produced by [`crate::json`].
pub type Fields = IndexMap<String, Value>;

/// Trait for types that can be matched against conditions.
///
/// Implemented for `IndexMap<String, Value>`, `HashMap<String, Value>`,
/// `BTreeMap<String, Value>` and `Vec<(String, Value)>`. Implement it for your own types to match them
/// without converting to a map first.
///
/// # Manual Implementation
///
/// ```
/// use keymatch::{Record, Value};
///
/// struct Phone {
///     mfr: Value,
///     cost: Value,
/// }
///
/// impl Record for Phone {
///     fn field(&self, name: &str) -> Option<&Value> {
///         match name {
///             "mfr" => Some(&self.mfr),
///             "cost" => Some(&self.cost),
///             _ => None,
///         }
///     }
/// }
///
/// let phone = Phone { mfr: "Apple".into(), cost: 100000.into() };
/// assert!(phone.has_field("mfr"));
/// assert!(!phone.has_field("model"));
/// ```
pub trait Record {
    /// Returns the value of a field, or `None` if the record lacks it.
    fn field(&self, name: &str) -> Option<&Value>;

    /// Returns `true` if the record has the field, even when it holds null.
    fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

impl<S: BuildHasher> Record for HashMap<String, Value, S> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<S: BuildHasher> Record for IndexMap<String, Value, S> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl Record for BTreeMap<String, Value> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl Record for Vec<(String, Value)> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<&Value> {
        (**self).field(name)
    }
}
