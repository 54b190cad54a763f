//! Comparison operators for conditions.
//!
//! The [`Op`] enum defines every supported operator. Operators are usually
//! given by name (`"greater-than"`, `">"`, `"not_in"`); [`Op::parse`] resolves
//! a name and falls back to [`Op::Equals`] for anything it does not know.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::str::FromStr;

use tracing::warn;

/// Comparison operator for a condition.
///
/// Equality and ordering use the coercion rules in [`crate::compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Op {
    /// Loose equality. The default operator.
    #[default]
    Equals,
    /// Strict equality (value and type).
    Identical,
    /// Negation of `Identical`.
    NotIdentical,
    /// Negation of `Equals`.
    NotEquals,
    /// Greater than.
    GreaterThan,
    /// Less than.
    LessThan,
    /// Greater than or equal.
    GreaterOrEqual,
    /// Less than or equal.
    LessOrEqual,
    /// Member of a list (loose equality), or loosely equal to a scalar.
    In,
    /// Member of a list (strict equality), or identical to a scalar.
    StrictIn,
    /// Negation of `In`.
    NotIn,
    /// Negation of `StrictIn`.
    StrictNotIn,
    /// Field text matches a regular expression.
    PatternMatch,
}

impl Op {
    /// All operators, in declaration order.
    pub const ALL: [Op; 13] = [
        Op::Equals,
        Op::Identical,
        Op::NotIdentical,
        Op::NotEquals,
        Op::GreaterThan,
        Op::LessThan,
        Op::GreaterOrEqual,
        Op::LessOrEqual,
        Op::In,
        Op::StrictIn,
        Op::NotIn,
        Op::StrictNotIn,
        Op::PatternMatch,
    ];

    /// Looks up an operator by name or symbol.
    ///
    /// Names are case-insensitive, and `_` or spaces may stand in for `-`.
    /// Returns `None` for unknown names.
    ///
    /// ```
    /// use keymatch::Op;
    ///
    /// assert_eq!(Op::lookup(">="), Some(Op::GreaterOrEqual));
    /// assert_eq!(Op::lookup("Not_In"), Some(Op::NotIn));
    /// assert_eq!(Op::lookup("between"), None);
    /// ```
    pub fn lookup(name: &str) -> Option<Op> {
        let normalized: String = name
            .trim()
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        let op = match normalized.as_str() {
            "equals" | "eq" | "==" | "=" => Op::Equals,
            "identical" | "===" => Op::Identical,
            "not-identical" | "!==" => Op::NotIdentical,
            "not-equals" | "ne" | "!=" | "<>" => Op::NotEquals,
            "greater-than" | "gt" | ">" => Op::GreaterThan,
            "less-than" | "lt" | "<" => Op::LessThan,
            "greater-or-equal" | "gte" | ">=" => Op::GreaterOrEqual,
            "less-or-equal" | "lte" | "<=" => Op::LessOrEqual,
            "in" => Op::In,
            "strict-in" => Op::StrictIn,
            "not-in" => Op::NotIn,
            "strict-not-in" => Op::StrictNotIn,
            "pattern-match" | "preg" | "regex" | "~" => Op::PatternMatch,
            _ => return None,
        };
        Some(op)
    }

    /// Resolves an operator name, falling back to [`Op::Equals`].
    ///
    /// ```
    /// use keymatch::Op;
    ///
    /// assert_eq!(Op::parse("LESS-THAN"), Op::LessThan);
    /// assert_eq!(Op::parse("like"), Op::Equals);
    /// ```
    pub fn parse(name: &str) -> Op {
        Op::lookup(name).unwrap_or_else(|| {
            warn!(operator = name, "unknown operator, using equals");
            Op::Equals
        })
    }

    /// Returns `true` for the four ordering operators.
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            Op::GreaterThan | Op::LessThan | Op::GreaterOrEqual | Op::LessOrEqual
        )
    }

    /// Returns `true` for the four list-membership operators.
    pub fn is_membership(self) -> bool {
        matches!(self, Op::In | Op::StrictIn | Op::NotIn | Op::StrictNotIn)
    }

    /// Returns `true` if the operator compares with strict equality.
    pub fn is_strict(self) -> bool {
        matches!(
            self,
            Op::Identical | Op::NotIdentical | Op::StrictIn | Op::StrictNotIn
        )
    }

    /// Returns `true` if the operator negates its positive counterpart.
    pub fn is_negated(self) -> bool {
        matches!(
            self,
            Op::NotIdentical | Op::NotEquals | Op::NotIn | Op::StrictNotIn
        )
    }

    /// Evaluates an ordering operator given an ordering result.
    ///
    /// Returns `false` for operators that are not relational.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::GreaterThan => ordering == Ordering::Greater,
            Op::GreaterOrEqual => ordering != Ordering::Less,
            Op::LessThan => ordering == Ordering::Less,
            Op::LessOrEqual => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// Returns the canonical name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Equals => "equals",
            Op::Identical => "identical",
            Op::NotIdentical => "not-identical",
            Op::NotEquals => "not-equals",
            Op::GreaterThan => "greater-than",
            Op::LessThan => "less-than",
            Op::GreaterOrEqual => "greater-or-equal",
            Op::LessOrEqual => "less-or-equal",
            Op::In => "in",
            Op::StrictIn => "strict-in",
            Op::NotIn => "not-in",
            Op::StrictNotIn => "strict-not-in",
            Op::PatternMatch => "pattern-match",
        }
    }
}

/// The operators that compare two values directly.
///
/// Everything except [`Op::PatternMatch`], which needs a compiled pattern
/// and so can only be built through [`Clause::new`](crate::Clause::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Comparison {
    Equals,
    Identical,
    NotIdentical,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    In,
    StrictIn,
    NotIn,
    StrictNotIn,
}

impl Comparison {
    /// Returns the comparison for `op`, or `None` for `PatternMatch`.
    pub(crate) fn from_op(op: Op) -> Option<Self> {
        let comparison = match op {
            Op::Equals => Comparison::Equals,
            Op::Identical => Comparison::Identical,
            Op::NotIdentical => Comparison::NotIdentical,
            Op::NotEquals => Comparison::NotEquals,
            Op::GreaterThan => Comparison::GreaterThan,
            Op::LessThan => Comparison::LessThan,
            Op::GreaterOrEqual => Comparison::GreaterOrEqual,
            Op::LessOrEqual => Comparison::LessOrEqual,
            Op::In => Comparison::In,
            Op::StrictIn => Comparison::StrictIn,
            Op::NotIn => Comparison::NotIn,
            Op::StrictNotIn => Comparison::StrictNotIn,
            Op::PatternMatch => return None,
        };
        Some(comparison)
    }
}

impl From<Comparison> for Op {
    fn from(comparison: Comparison) -> Self {
        match comparison {
            Comparison::Equals => Op::Equals,
            Comparison::Identical => Op::Identical,
            Comparison::NotIdentical => Op::NotIdentical,
            Comparison::NotEquals => Op::NotEquals,
            Comparison::GreaterThan => Op::GreaterThan,
            Comparison::LessThan => Op::LessThan,
            Comparison::GreaterOrEqual => Op::GreaterOrEqual,
            Comparison::LessOrEqual => Op::LessOrEqual,
            Comparison::In => Op::In,
            Comparison::StrictIn => Op::StrictIn,
            Comparison::NotIn => Op::NotIn,
            Comparison::StrictNotIn => Op::StrictNotIn,
        }
    }
}

impl FromStr for Op {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Op::parse(s))
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
