//! Coercion rules for comparing two [`Value`]s.
//!
//! Three functions define every comparison an operator can make:
//!
//! - [`loose_eq`]: equality with cross-type coercion (`equals`, `in`)
//! - [`strict_eq`]: equality of value and type (`identical`, `strict-in`)
//! - [`loose_cmp`]: ordering with cross-type coercion (`greater-than`, ...)
//!
//! # Coercion table
//!
//! A *numeric string* is a string that [`Number::parse`] accepts.
//!
//! | left / right | `loose_eq` | `loose_cmp` |
//! |--------------|------------|-------------|
//! | bool, any | truthiness equal | truthiness, `false < true` |
//! | null, null | `true` | `Equal` |
//! | null, string | string is `""` | `""` vs string, bytewise |
//! | null, number | number is zero | truthiness |
//! | null, list | list is empty | truthiness |
//! | number, number | numeric | numeric, NaN unordered |
//! | number, numeric string | numeric | numeric |
//! | number, other string | display form equals string | display form vs string, bytewise |
//! | string, string | numeric if both numeric, else bytes | same |
//! | list, list | same length, pairwise `loose_eq` | length first, then pairwise |
//! | list, scalar | `false` | list is greater |
//!
//! [`strict_eq`] requires the same variant. Integers (`I64`, `U64`) are one
//! type and compare by value; `F64` never strictly equals an integer.

use std::cmp::Ordering;

use crate::value::{Number, Value};

/// Loose equality with cross-type coercion.
///
/// ```
/// use keymatch::{loose_eq, Value};
///
/// assert!(loose_eq(&Value::from("120000"), &Value::from(120000)));
/// assert!(loose_eq(&Value::Null, &Value::from(false)));
/// assert!(!loose_eq(&Value::from("abc"), &Value::from(0)));
/// ```
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(flag), other) | (other, Value::Bool(flag)) => *flag == other.truthy(),
        (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
        (Value::Null, Value::Number(n)) | (Value::Number(n), Value::Null) => n.is_zero(),
        (Value::Null, Value::List(items)) | (Value::List(items), Value::Null) => items.is_empty(),
        (Value::Number(x), Value::Number(y)) => x.compare(*y) == Some(Ordering::Equal),
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            match Number::parse(s) {
                Some(parsed) => n.compare(parsed) == Some(Ordering::Equal),
                None => n.to_string() == *s,
            }
        }
        (Value::String(x), Value::String(y)) => match (Number::parse(x), Number::parse(y)) {
            (Some(m), Some(n)) => m.compare(n) == Some(Ordering::Equal),
            _ => x == y,
        },
        (Value::List(x), Value::List(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| loose_eq(a, b))
        }
        // List against a non-null scalar
        _ => false,
    }
}

/// Strict equality: same type and same value.
///
/// ```
/// use keymatch::{strict_eq, Value};
///
/// assert!(strict_eq(&Value::from(5), &Value::from(5u8)));
/// assert!(!strict_eq(&Value::from(5), &Value::from(5.0)));
/// assert!(!strict_eq(&Value::from("5"), &Value::from(5)));
/// ```
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => {
            x.is_integer() == y.is_integer() && x.compare(*y) == Some(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x == y,
        (Value::List(x), Value::List(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| strict_eq(a, b))
        }
        _ => false,
    }
}

/// Ordering with cross-type coercion.
///
/// Returns `None` when the values have no ordering (NaN involved), in which
/// case every relational operator evaluates to `false`.
///
/// ```
/// use std::cmp::Ordering;
/// use keymatch::{loose_cmp, Value};
///
/// assert_eq!(loose_cmp(&Value::from("10"), &Value::from(9)), Some(Ordering::Greater));
/// assert_eq!(loose_cmp(&Value::from("10"), &Value::from("9")), Some(Ordering::Greater));
/// assert_eq!(loose_cmp(&Value::from("b"), &Value::from("a")), Some(Ordering::Greater));
/// ```
pub fn loose_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Bool(_), _) | (_, Value::Bool(_)) => Some(a.truthy().cmp(&b.truthy())),
        (Value::Null, Value::String(s)) => Some("".cmp(s.as_str())),
        (Value::String(s), Value::Null) => Some(s.as_str().cmp("")),
        (Value::Null, _) | (_, Value::Null) => Some(a.truthy().cmp(&b.truthy())),
        (Value::Number(x), Value::Number(y)) => x.compare(*y),
        (Value::Number(n), Value::String(s)) => compare_number_string(*n, s),
        (Value::String(s), Value::Number(n)) => {
            compare_number_string(*n, s).map(Ordering::reverse)
        }
        (Value::String(x), Value::String(y)) => match (Number::parse(x), Number::parse(y)) {
            (Some(m), Some(n)) => m.compare(n),
            _ => Some(x.as_str().cmp(y.as_str())),
        },
        (Value::List(x), Value::List(y)) => compare_lists(x, y),
        (Value::List(_), _) => Some(Ordering::Greater),
        (_, Value::List(_)) => Some(Ordering::Less),
    }
}

fn compare_number_string(n: Number, s: &str) -> Option<Ordering> {
    match Number::parse(s) {
        Some(parsed) => n.compare(parsed),
        None => Some(n.to_string().as_str().cmp(s)),
    }
}

fn compare_lists(x: &[Value], y: &[Value]) -> Option<Ordering> {
    if x.len() != y.len() {
        return Some(x.len().cmp(&y.len()));
    }
    for (a, b) in x.iter().zip(y) {
        match loose_cmp(a, b)? {
            Ordering::Equal => continue,
            decided => return Some(decided),
        }
    }
    Some(Ordering::Equal)
}
