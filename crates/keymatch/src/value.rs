//! Runtime value types for field comparison.
//!
//! The [`Value`] enum is the closed set of things a record field or a
//! condition can hold: null, booleans, numbers, strings and lists of scalars.
//! How two values compare is defined by [`loose_eq`](crate::loose_eq),
//! [`strict_eq`](crate::strict_eq) and [`loose_cmp`](crate::loose_cmp).

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// A field or comparison value.
///
/// The derived `PartialEq` is structural (`Number::I64(1)` differs from
/// `Number::F64(1.0)`). Conditions never use it; they go through
/// [`loose_eq`](crate::loose_eq) and [`strict_eq`](crate::strict_eq).
///
/// # Example
///
/// ```
/// use keymatch::{Number, Value};
///
/// let cost = Value::from(120000);
/// assert_eq!(cost, Value::Number(Number::I64(120000)));
///
/// let makers = Value::from(vec!["Apple", "Samsung"]);
/// assert_eq!(makers.as_list().map(|l| l.len()), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicit null. A field holding `Null` is still present.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value.
    String(String),
    /// Ordered sequence of scalars.
    List(Vec<Value>),
}

impl Value {
    /// Returns `true` if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this is a `List`.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Returns `true` for every variant except `List`.
    pub fn is_scalar(&self) -> bool {
        !self.is_list()
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the list items, if present.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
        }
    }

    /// Boolean interpretation used when a comparison involves a bool or null.
    ///
    /// `Null`, `false`, zero, `""`, `"0"` and the empty list are falsy;
    /// everything else is truthy.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => !n.is_zero(),
            Value::String(s) => !(s.is_empty() || s == "0"),
            Value::List(items) => !items.is_empty(),
        }
    }

    /// The text a pattern is matched against.
    ///
    /// Numbers use their display form, `true` becomes `"1"`, `false` and
    /// `Null` become `""`. Lists have no subject text.
    pub fn pattern_subject(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(true) => Some(Cow::Borrowed("1")),
            Value::Bool(false) | Value::Null => Some(Cow::Borrowed("")),
            Value::List(_) => None,
        }
    }
}

/// Numeric value.
///
/// Integers keep their exact representation (`I64` for signed, `U64` for
/// values above `i64::MAX`); `F64` holds floats. Mixed comparisons between
/// the two integer variants are exact, anything involving `F64` goes
/// through `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns `true` for the integer variants.
    pub fn is_integer(self) -> bool {
        !matches!(self, Number::F64(_))
    }

    /// Returns `true` if the number equals zero.
    pub fn is_zero(self) -> bool {
        match self {
            Number::I64(n) => n == 0,
            Number::U64(n) => n == 0,
            Number::F64(n) => n == 0.0,
        }
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::I64(a), Number::U64(b)) => Some(compare_signed_unsigned(a, b)),
            (Number::U64(a), Number::I64(b)) => Some(compare_signed_unsigned(b, a).reverse()),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    /// Parses a numeric string.
    ///
    /// Leading and trailing ASCII whitespace is ignored. Accepted: an
    /// optional sign, digits with an optional fraction (at least one digit
    /// overall) and an optional exponent. `inf`, `nan` and empty strings are
    /// not numeric.
    ///
    /// ```
    /// use keymatch::Number;
    ///
    /// assert_eq!(Number::parse(" 42 "), Some(Number::I64(42)));
    /// assert_eq!(Number::parse("1e3"), Some(Number::F64(1000.0)));
    /// assert_eq!(Number::parse("12abc"), None);
    /// ```
    pub fn parse(text: &str) -> Option<Number> {
        let text = text.trim_matches(|c: char| c.is_ascii_whitespace());
        if !is_numeric_literal(text) {
            return None;
        }
        let integral = !text.contains(['.', 'e', 'E']);
        if integral {
            if let Ok(n) = text.parse::<i64>() {
                return Some(Number::I64(n));
            }
            if let Ok(n) = text.trim_start_matches('+').parse::<u64>() {
                return Some(Number::U64(n));
            }
        }
        text.parse::<f64>().ok().map(Number::F64)
    }
}

fn compare_signed_unsigned(a: i64, b: u64) -> Ordering {
    if a < 0 {
        Ordering::Less
    } else {
        (a as u64).cmp(&b)
    }
}

fn is_numeric_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    if digits == 0 {
        return false;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) if n.is_nan() => f.write_str("NAN"),
            Number::F64(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "INF" } else { "-INF" })
            }
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }

            impl From<$source> for Value {
                fn from(n: $source) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_type_checks() {
        assert!(Value::Null.is_null());
        assert!(Value::from(vec![1, 2]).is_list());
        assert!(Value::from("x").is_scalar());
        assert!(!Value::from(vec!["x"]).is_scalar());
    }

    #[test]
    fn value_extractors() {
        assert_eq!(Value::from("hello").as_str(), Some("hello"));
        assert_eq!(Value::from(42).as_number(), Some(Number::I64(42)));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(vec![1]).as_list(), Some(&[Value::from(1)][..]));

        // Wrong type returns None
        assert_eq!(Value::from("test").as_number(), None);
        assert_eq!(Value::from(1).as_str(), None);
        assert_eq!(Value::Null.as_bool(), None);
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Null.truthy());
        assert!(!Value::from(0).truthy());
        assert!(!Value::from(0.0).truthy());
        assert!(!Value::from("").truthy());
        assert!(!Value::from("0").truthy());
        assert!(!Value::List(vec![]).truthy());

        assert!(Value::from(-1).truthy());
        assert!(Value::from("0.0").truthy());
        assert!(Value::from("false").truthy());
        assert!(Value::from(vec![0]).truthy());
    }

    #[test]
    fn pattern_subjects() {
        assert_eq!(Value::from("abc").pattern_subject().as_deref(), Some("abc"));
        assert_eq!(Value::from(15).pattern_subject().as_deref(), Some("15"));
        assert_eq!(Value::from(1.5).pattern_subject().as_deref(), Some("1.5"));
        assert_eq!(Value::from(true).pattern_subject().as_deref(), Some("1"));
        assert_eq!(Value::from(false).pattern_subject().as_deref(), Some(""));
        assert_eq!(Value::Null.pattern_subject().as_deref(), Some(""));
        assert_eq!(Value::from(vec!["a"]).pattern_subject(), None);
    }

    #[test]
    fn number_comparisons_same_type() {
        assert_eq!(
            Number::I64(5).compare(Number::I64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::U64(10).compare(Number::U64(5)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Number::F64(5.0).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(
            Number::I64(5).compare(Number::U64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(-1).compare(Number::U64(u64::MAX)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::U64(u64::MAX).compare(Number::I64(i64::MAX)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn number_nan_comparison() {
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
        assert_eq!(Number::I64(1).compare(Number::F64(f64::NAN)), None);
    }

    #[test]
    fn number_parse() {
        assert_eq!(Number::parse("42"), Some(Number::I64(42)));
        assert_eq!(Number::parse("-7"), Some(Number::I64(-7)));
        assert_eq!(Number::parse("+7"), Some(Number::I64(7)));
        assert_eq!(Number::parse("\t3 \n"), Some(Number::I64(3)));
        assert_eq!(
            Number::parse("18446744073709551615"),
            Some(Number::U64(u64::MAX))
        );
        assert_eq!(Number::parse("1.5"), Some(Number::F64(1.5)));
        assert_eq!(Number::parse("-.5"), Some(Number::F64(-0.5)));
        assert_eq!(Number::parse("5."), Some(Number::F64(5.0)));
        assert_eq!(Number::parse("2E-2"), Some(Number::F64(0.02)));

        assert_eq!(Number::parse(""), None);
        assert_eq!(Number::parse("   "), None);
        assert_eq!(Number::parse("."), None);
        assert_eq!(Number::parse("1e"), None);
        assert_eq!(Number::parse("inf"), None);
        assert_eq!(Number::parse("NaN"), None);
        assert_eq!(Number::parse("0x1A"), None);
        assert_eq!(Number::parse("1 2"), None);
    }

    #[test]
    fn number_display() {
        assert_eq!(Number::I64(-3).to_string(), "-3");
        assert_eq!(Number::F64(1.0).to_string(), "1");
        assert_eq!(Number::F64(0.25).to_string(), "0.25");
        assert_eq!(Number::F64(f64::NAN).to_string(), "NAN");
        assert_eq!(Number::F64(f64::NEG_INFINITY).to_string(), "-INF");
    }

    #[test]
    fn conversions() {
        assert_eq!(Value::from(42i32), Value::Number(Number::I64(42)));
        assert_eq!(Value::from(42u8), Value::Number(Number::U64(42)));
        assert_eq!(Value::from(2.5f32), Value::Number(Number::F64(2.5)));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".into()));
        assert_eq!(
            Value::from(vec![1, 2]),
            Value::List(vec![Value::from(1), Value::from(2)])
        );
    }
}
