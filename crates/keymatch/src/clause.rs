//! Condition and clause types.
//!
//! A [`Condition`] is what callers write: either a `(field, value)` pair or an
//! `(operator, field, value)` triple. Before evaluation every condition is
//! normalized into a [`Clause`], which carries a resolved operator and, for
//! `pattern-match`, a compiled regular expression.

use regex::Regex;

use crate::compare::{loose_cmp, loose_eq, strict_eq};
use crate::error::{MatchError, PatternError, Result};
use crate::op::{Comparison, Op};
use crate::value::Value;

/// A condition as supplied by the caller.
///
/// # Example
///
/// ```
/// use keymatch::{Condition, Op};
///
/// let simple = Condition::simple("mfr", "Motorola");
/// let explicit = Condition::explicit(Op::GreaterThan, "cost", 130000);
///
/// assert_eq!(simple.field(), "mfr");
/// assert_eq!(explicit.op(), Op::GreaterThan);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `field == value`.
    Simple { field: String, value: Value },
    /// `field <op> value`.
    Explicit {
        op: Op,
        field: String,
        value: Value,
    },
}

impl Condition {
    /// Creates a simple (implicit `equals`) condition.
    pub fn simple(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::Simple {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates an explicit condition.
    pub fn explicit(op: Op, field: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::Explicit {
            op,
            field: field.into(),
            value: value.into(),
        }
    }

    /// The field this condition reads.
    pub fn field(&self) -> &str {
        match self {
            Condition::Simple { field, .. } | Condition::Explicit { field, .. } => field,
        }
    }

    /// The operator, `Equals` for the simple form.
    pub fn op(&self) -> Op {
        match self {
            Condition::Simple { .. } => Op::Equals,
            Condition::Explicit { op, .. } => *op,
        }
    }

    /// Normalizes this condition into an evaluable clause.
    ///
    /// Fails with [`MatchError::InvalidPattern`] if a `pattern-match`
    /// pattern does not compile.
    pub fn into_clause(self) -> Result<Clause> {
        match self {
            Condition::Simple { field, value } => Clause::new(field, Op::Equals, value),
            Condition::Explicit { op, field, value } => Clause::new(field, op, value),
        }
    }
}

/// A normalized, ready-to-evaluate condition.
///
/// A clause consists of:
/// - A field name (the field to compare)
/// - An operator (how to compare)
/// - A value (what to compare against)
#[derive(Debug, Clone)]
pub struct Clause {
    pub(crate) field: String,
    pub(crate) op: Op,
    pub(crate) value: Value,
    pub(crate) pattern: Option<Regex>,
}

impl Clause {
    /// Creates a new clause, compiling the pattern for `pattern-match`.
    ///
    /// # Errors
    ///
    /// - [`MatchError::InvalidArgument`] if a `pattern-match` value is not a string
    /// - [`MatchError::InvalidPattern`] if the pattern does not compile or
    ///   carries an unsupported modifier
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        if let Some(comparison) = Comparison::from_op(op) {
            return Ok(Clause::comparison(field, comparison, value));
        }

        let Value::String(source) = &value else {
            return Err(MatchError::invalid_argument(format!(
                "pattern-match expects a string pattern, got {}",
                value.type_name()
            )));
        };
        let pattern = compile_pattern(source)?;
        Ok(Clause {
            field: field.into(),
            op,
            value,
            pattern: Some(pattern),
        })
    }

    /// Builds a clause for an operator that needs no compilation.
    pub(crate) fn comparison(
        field: impl Into<String>,
        comparison: Comparison,
        value: impl Into<Value>,
    ) -> Self {
        Clause {
            field: field.into(),
            op: comparison.into(),
            value: value.into(),
            pattern: None,
        }
    }

    /// The field name to compare.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The comparison operator.
    pub fn op(&self) -> Op {
        self.op
    }

    /// The value to compare against.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Evaluates this clause against a field value.
    ///
    /// The caller has already established that the field is present;
    /// `Value::Null` here is a present null, not a missing field.
    pub fn matches(&self, field_value: &Value) -> bool {
        match self.op {
            Op::Equals => loose_eq(field_value, &self.value),
            Op::NotEquals => !loose_eq(field_value, &self.value),
            Op::Identical => strict_eq(field_value, &self.value),
            Op::NotIdentical => !strict_eq(field_value, &self.value),
            Op::GreaterThan | Op::LessThan | Op::GreaterOrEqual | Op::LessOrEqual => {
                loose_cmp(field_value, &self.value)
                    .is_some_and(|ordering| self.op.eval_ordering(ordering))
            }
            Op::In => self.contains(field_value, loose_eq),
            Op::StrictIn => self.contains(field_value, strict_eq),
            Op::NotIn => !self.contains(field_value, loose_eq),
            Op::StrictNotIn => !self.contains(field_value, strict_eq),
            Op::PatternMatch => self.match_pattern(field_value),
        }
    }

    fn contains(&self, field_value: &Value, eq: fn(&Value, &Value) -> bool) -> bool {
        match &self.value {
            Value::List(items) => items.iter().any(|item| eq(field_value, item)),
            scalar => eq(field_value, scalar),
        }
    }

    fn match_pattern(&self, field_value: &Value) -> bool {
        match (&self.pattern, field_value.pattern_subject()) {
            (Some(regex), Some(subject)) => regex.is_match(&subject),
            _ => false,
        }
    }
}

/// Compiles a pattern in `regex` syntax.
///
/// A delimited pattern, `/body/modifiers`, is also accepted when every
/// trailing character is a PCRE modifier. `i m s x U` become an inline flag
/// group; `u` and `D` already describe how `regex` behaves and are dropped.
/// Any other modifier is rejected.
fn compile_pattern(source: &str) -> Result<Regex> {
    let invalid = |reason: PatternError| MatchError::InvalidPattern {
        pattern: source.to_string(),
        source: reason,
    };

    let expression = match split_delimited(source) {
        Some((body, modifiers)) => {
            let flags = inline_flags(modifiers)
                .map_err(|modifier| invalid(PatternError::UnsupportedModifier(modifier)))?;
            if flags.is_empty() {
                body.to_string()
            } else {
                format!("(?{flags}){body}")
            }
        }
        None => source.to_string(),
    };
    Regex::new(&expression).map_err(|err| invalid(err.into()))
}

fn split_delimited(source: &str) -> Option<(&str, &str)> {
    let rest = source.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    let (body, modifiers) = (&rest[..close], &rest[close + 1..]);
    modifiers
        .chars()
        .all(|c| matches!(c, 'i' | 'm' | 's' | 'x' | 'U' | 'u' | 'D' | 'A' | 'S' | 'X' | 'J' | 'n'))
        .then_some((body, modifiers))
}

fn inline_flags(modifiers: &str) -> std::result::Result<String, char> {
    let mut flags = String::new();
    for modifier in modifiers.chars() {
        match modifier {
            'i' | 'm' | 's' | 'x' | 'U' => {
                if !flags.contains(modifier) {
                    flags.push(modifier);
                }
            }
            'u' | 'D' => {}
            unsupported => return Err(unsupported),
        }
    }
    Ok(flags)
}
