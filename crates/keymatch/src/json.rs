//! JSON input for values, records, collections and condition sets.
//!
//! The condition set accepts the two caller-facing shapes:
//!
//! ```text
//! simple:   { "mfr": "Motorola", "cost": 120000 }
//! explicit: [ ["==", "mfr", "Motorola"], [">", "cost", 130000] ]
//! ```
//!
//! Simple-form objects and record fields keep document order. A collection
//! is either an array of record objects (keys are the array indices) or an
//! object of record objects (keys are the member names).

use std::fmt;

use serde::Serialize;
use serde_json::Value as Json;

use crate::conditions::Conditions;
use crate::error::{MatchError, Result};
use crate::record::Fields;
use crate::value::{Number, Value};

/// Key of a record in a JSON collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Key {
    /// Position in a JSON array.
    Index(usize),
    /// Member name in a JSON object.
    Name(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{index}"),
            Key::Name(name) => f.write_str(name),
        }
    }
}

/// Converts a JSON value into a [`Value`].
///
/// Objects are rejected; arrays may only contain scalars.
pub fn value_from_json(json: &Json) -> Result<Value> {
    match json {
        Json::Array(items) => items
            .iter()
            .map(|item| match item {
                Json::Array(_) | Json::Object(_) => Err(MatchError::invalid_argument(
                    "lists may only contain scalar values",
                )),
                scalar => scalar_from_json(scalar),
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::List),
        other => scalar_from_json(other),
    }
}

fn scalar_from_json(json: &Json) -> Result<Value> {
    match json {
        Json::Null => Ok(Value::Null),
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Number(n) => number_from_json(n).map(Value::Number),
        Json::String(s) => Ok(Value::String(s.clone())),
        Json::Array(_) | Json::Object(_) => Err(MatchError::invalid_argument(
            "expected a scalar value",
        )),
    }
}

fn number_from_json(n: &serde_json::Number) -> Result<Number> {
    if let Some(i) = n.as_i64() {
        Ok(Number::I64(i))
    } else if let Some(u) = n.as_u64() {
        Ok(Number::U64(u))
    } else {
        n.as_f64()
            .map(Number::F64)
            .ok_or_else(|| MatchError::invalid_argument(format!("unsupported number {n}")))
    }
}

impl TryFrom<&Json> for Value {
    type Error = MatchError;

    fn try_from(json: &Json) -> Result<Self> {
        value_from_json(json)
    }
}

/// Converts a JSON object into a record.
pub fn record_from_json(json: &Json) -> Result<Fields> {
    let Json::Object(members) = json else {
        return Err(MatchError::invalid_argument(format!(
            "a record must be a JSON object, got {}",
            json_type(json)
        )));
    };

    members
        .iter()
        .map(|(field, value)| {
            value_from_json(value)
                .map(|value| (field.clone(), value))
                .map_err(|err| MatchError::invalid_argument(format!("field '{field}': {err}")))
        })
        .collect()
}

/// Converts a JSON array or object of records into keyed records.
pub fn collection_from_json(json: &Json) -> Result<Vec<(Key, Fields)>> {
    let keyed_record = |key: Key, record: &Json| {
        record_from_json(record)
            .map(|fields| (key.clone(), fields))
            .map_err(|err| MatchError::invalid_argument(format!("record {key}: {err}")))
    };

    match json {
        Json::Array(records) => records
            .iter()
            .enumerate()
            .map(|(index, record)| keyed_record(Key::Index(index), record))
            .collect(),
        Json::Object(records) => records
            .iter()
            .map(|(name, record)| keyed_record(Key::Name(name.clone()), record))
            .collect(),
        other => Err(MatchError::invalid_argument(format!(
            "a collection must be a JSON array or object, got {}",
            json_type(other)
        ))),
    }
}

/// Parses a condition set in either caller-facing shape.
///
/// ```
/// use keymatch::json::conditions_from_json;
/// use keymatch::Op;
/// use serde_json::json;
///
/// let simple = conditions_from_json(&json!({"mfr": "Motorola", "cost": 120000})).unwrap();
/// assert_eq!(simple.fields(), vec!["mfr", "cost"]);
///
/// let explicit = conditions_from_json(&json!([["in", "mfr", ["Apple", "Samsung"]]])).unwrap();
/// assert_eq!(explicit.clauses()[0].op(), Op::In);
/// ```
///
/// # Errors
///
/// - [`MatchError::InvalidArgument`] for a container that is neither an
///   object nor an array, a triple of the wrong arity, or an operator or
///   field that is not a string
/// - [`MatchError::InvalidPattern`] for a `pattern-match` triple whose
///   pattern does not compile
pub fn conditions_from_json(json: &Json) -> Result<Conditions> {
    match json {
        Json::Object(pairs) => pairs.iter().try_fold(
            Conditions::new(),
            |set, (field, value)| -> Result<Conditions> {
                let value = value_from_json(value)
                    .map_err(|err| MatchError::invalid_argument(format!("field '{field}': {err}")))?;
                Ok(set.simple(field.as_str(), value))
            },
        ),
        Json::Array(triples) => triples
            .iter()
            .enumerate()
            .try_fold(Conditions::new(), |set, (position, triple)| -> Result<Conditions> {
                let (op, field, value) = parse_triple(triple).map_err(|err| {
                    MatchError::invalid_argument(format!("condition {position}: {err}"))
                })?;
                set.explicit(op, field, value)
            }),
        other => Err(MatchError::invalid_argument(format!(
            "conditions must be a JSON object or array, got {}",
            json_type(other)
        ))),
    }
}

fn parse_triple(triple: &Json) -> Result<(&str, &str, Value)> {
    let Json::Array(parts) = triple else {
        return Err(MatchError::invalid_argument(format!(
            "expected an [operator, field, value] array, got {}",
            json_type(triple)
        )));
    };
    let [op, field, value] = parts.as_slice() else {
        return Err(MatchError::invalid_argument(format!(
            "expected 3 elements, got {}",
            parts.len()
        )));
    };
    let op = op
        .as_str()
        .ok_or_else(|| MatchError::invalid_argument("operator must be a string"))?;
    let field = field
        .as_str()
        .ok_or_else(|| MatchError::invalid_argument("field name must be a string"))?;
    Ok((op, field, value_from_json(value)?))
}

fn json_type(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::Op;
    use serde_json::json;

    #[test]
    fn values_from_json() {
        assert_eq!(value_from_json(&json!(null)).unwrap(), Value::Null);
        assert_eq!(value_from_json(&json!(true)).unwrap(), Value::Bool(true));
        assert_eq!(value_from_json(&json!(-3)).unwrap(), Value::from(-3));
        assert_eq!(
            value_from_json(&json!(u64::MAX)).unwrap(),
            Value::Number(Number::U64(u64::MAX))
        );
        assert_eq!(value_from_json(&json!(1.5)).unwrap(), Value::from(1.5));
        assert_eq!(value_from_json(&json!("x")).unwrap(), Value::from("x"));
        assert_eq!(
            value_from_json(&json!(["a", 1])).unwrap(),
            Value::List(vec![Value::from("a"), Value::from(1)])
        );
        assert_eq!(Value::try_from(&json!("y")).unwrap(), Value::from("y"));
    }

    #[test]
    fn nested_values_are_rejected() {
        assert!(value_from_json(&json!({"a": 1})).is_err());
        assert!(value_from_json(&json!([[1]])).is_err());
        assert!(value_from_json(&json!([{"a": 1}])).is_err());
    }

    #[test]
    fn records_from_json() {
        let record = record_from_json(&json!({"mfr": "Apple", "cost": 100000})).unwrap();
        assert_eq!(record.get("mfr"), Some(&Value::from("Apple")));
        assert_eq!(record.get("cost"), Some(&Value::from(100000)));
        let fields: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["mfr", "cost"]);

        let err = record_from_json(&json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("array"));

        let err = record_from_json(&json!({"specs": {"ram": 8}})).unwrap_err();
        assert!(err.to_string().contains("specs"));
    }

    #[test]
    fn collections_from_json() {
        let indexed = collection_from_json(&json!([{"a": 1}, {"a": 2}])).unwrap();
        let keys: Vec<&Key> = indexed.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![&Key::Index(0), &Key::Index(1)]);

        let named = collection_from_json(&json!({"x2": {"a": 1}, "x100": {"a": 2}})).unwrap();
        let keys: Vec<String> = named.iter().map(|(key, _)| key.to_string()).collect();
        assert_eq!(keys, vec!["x2", "x100"]);

        assert!(collection_from_json(&json!("nope")).is_err());
        let err = collection_from_json(&json!([{"a": 1}, 7])).unwrap_err();
        assert!(err.to_string().contains("record 1"));
    }

    #[test]
    fn simple_conditions_keep_document_order() {
        let conditions = conditions_from_json(&json!({"zeta": 1, "alpha": 2})).unwrap();
        assert_eq!(conditions.fields(), vec!["zeta", "alpha"]);
        assert!(conditions.iter().all(|c| c.op() == Op::Equals));
    }

    #[test]
    fn explicit_conditions() {
        let conditions = conditions_from_json(&json!([
            ["==", "mfr", "Motorola"],
            [">", "cost", 130000],
            ["preg", "model", "/^droid/i"],
            ["whatever", "carrier", "Verizon"],
        ]))
        .unwrap();

        let ops: Vec<Op> = conditions.iter().map(|c| c.op()).collect();
        assert_eq!(
            ops,
            vec![Op::Equals, Op::GreaterThan, Op::PatternMatch, Op::Equals]
        );
    }

    #[test]
    fn malformed_conditions_are_invalid_arguments() {
        let cases = [
            json!("mfr"),
            json!(42),
            json!([["==", "mfr"]]),
            json!([["==", "mfr", "a", "b"]]),
            json!([[1, "mfr", "a"]]),
            json!([["==", 7, "a"]]),
            json!(["==", "mfr", "a"]),
            json!({"mfr": {"nested": true}}),
        ];
        for case in cases {
            let err = conditions_from_json(&case).unwrap_err();
            assert!(
                matches!(err, MatchError::InvalidArgument(_)),
                "{case} gave {err:?}"
            );
        }
    }

    #[test]
    fn bad_pattern_is_invalid_pattern() {
        let err = conditions_from_json(&json!([["pattern-match", "model", "(("]])).unwrap_err();
        assert!(matches!(err, MatchError::InvalidPattern { .. }));
    }

    #[test]
    fn empty_containers_are_empty_sets() {
        assert!(conditions_from_json(&json!({})).unwrap().is_empty());
        assert!(conditions_from_json(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn key_serializes_untagged() {
        assert_eq!(serde_json::to_string(&Key::Index(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&Key::Name("x2".into())).unwrap(),
            "\"x2\""
        );
    }
}
