//! Ordered condition sets.
//!
//! [`Conditions`] provides a fluent builder API for constructing the set of
//! clauses a [`Matcher`](crate::Matcher) evaluates. Order matters for OR
//! short-circuiting and is preserved exactly as built.

use crate::clause::{Clause, Condition};
use crate::error::Result;
use crate::op::{Comparison, Op};
use crate::value::Value;

/// An ordered set of clauses.
///
/// # Example
///
/// ```
/// use keymatch::Conditions;
///
/// let conditions = Conditions::new()
///     .eq("mfr", "Motorola")         // mfr == "Motorola"
///     .gt("cost", 130000)            // cost > 130000
///     .not_in_set("carrier", vec!["AT&T", "Sprint"])
///     .pattern("model", r"^Droid")
///     .unwrap();
///
/// assert_eq!(conditions.len(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    clauses: Vec<Clause>,
}

impl Conditions {
    /// Creates an empty condition set.
    ///
    /// An empty set matches every record in both logic modes.
    pub fn new() -> Self {
        Conditions::default()
    }

    /// Builds a set of simple (`equals`) conditions from field/value pairs.
    ///
    /// ```
    /// use keymatch::{Conditions, Op};
    ///
    /// let conditions = Conditions::from_pairs([("mfr", "Motorola"), ("carrier", "Verizon")]);
    /// assert!(conditions.iter().all(|c| c.op() == Op::Equals));
    /// ```
    pub fn from_pairs<I, F, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, V)>,
        F: Into<String>,
        V: Into<Value>,
    {
        pairs
            .into_iter()
            .fold(Conditions::new(), |set, (field, value)| set.eq(field, value))
    }

    /// Builds a set from `(operator name, field, value)` triples.
    ///
    /// Unknown operator names fall back to `equals`.
    ///
    /// # Errors
    ///
    /// Fails if a `pattern-match` triple carries an invalid pattern.
    pub fn from_triples<I, O, F, V>(triples: I) -> Result<Self>
    where
        I: IntoIterator<Item = (O, F, V)>,
        O: AsRef<str>,
        F: Into<String>,
        V: Into<Value>,
    {
        triples
            .into_iter()
            .try_fold(Conditions::new(), |set, (op, field, value)| {
                set.explicit(op.as_ref(), field, value)
            })
    }

    /// Builds a set from caller-supplied conditions, normalizing each.
    pub fn from_conditions<I>(conditions: I) -> Result<Self>
    where
        I: IntoIterator<Item = Condition>,
    {
        let clauses = conditions
            .into_iter()
            .map(Condition::into_clause)
            .collect::<Result<Vec<_>>>()?;
        Ok(Conditions { clauses })
    }

    // ========================================================================
    // Generic builders
    // ========================================================================

    /// Appends a normalized condition.
    pub fn push(mut self, condition: Condition) -> Result<Self> {
        self.clauses.push(condition.into_clause()?);
        Ok(self)
    }

    /// Appends a clause with a resolved operator.
    pub fn clause(
        mut self,
        field: impl Into<String>,
        op: Op,
        value: impl Into<Value>,
    ) -> Result<Self> {
        self.clauses.push(Clause::new(field, op, value)?);
        Ok(self)
    }

    /// Appends a clause with an operator given by name.
    ///
    /// Unknown names fall back to `equals`.
    pub fn explicit(
        self,
        op: &str,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self> {
        self.clause(field, Op::parse(op), value)
    }

    fn with(
        mut self,
        field: impl Into<String>,
        comparison: Comparison,
        value: impl Into<Value>,
    ) -> Self {
        self.clauses.push(Clause::comparison(field, comparison, value));
        self
    }

    // ========================================================================
    // Shorthand methods
    // ========================================================================

    /// Adds a simple condition (loose equality).
    pub fn simple(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.eq(field, value)
    }

    /// Adds an `equals` clause.
    pub fn eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(field, Comparison::Equals, value)
    }

    /// Adds a `not-equals` clause.
    pub fn ne(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(field, Comparison::NotEquals, value)
    }

    /// Adds an `identical` clause.
    pub fn identical(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(field, Comparison::Identical, value)
    }

    /// Adds a `not-identical` clause.
    pub fn not_identical(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(field, Comparison::NotIdentical, value)
    }

    /// Adds a `greater-than` clause.
    pub fn gt(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(field, Comparison::GreaterThan, value)
    }

    /// Adds a `greater-or-equal` clause.
    pub fn gte(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(field, Comparison::GreaterOrEqual, value)
    }

    /// Adds a `less-than` clause.
    pub fn lt(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(field, Comparison::LessThan, value)
    }

    /// Adds a `less-or-equal` clause.
    pub fn lte(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(field, Comparison::LessOrEqual, value)
    }

    /// Adds an `in` clause. A scalar value degrades to equality.
    pub fn in_set(self, field: impl Into<String>, values: impl Into<Value>) -> Self {
        self.with(field, Comparison::In, values)
    }

    /// Adds a `strict-in` clause.
    pub fn strict_in_set(self, field: impl Into<String>, values: impl Into<Value>) -> Self {
        self.with(field, Comparison::StrictIn, values)
    }

    /// Adds a `not-in` clause.
    pub fn not_in_set(self, field: impl Into<String>, values: impl Into<Value>) -> Self {
        self.with(field, Comparison::NotIn, values)
    }

    /// Adds a `strict-not-in` clause.
    pub fn strict_not_in_set(self, field: impl Into<String>, values: impl Into<Value>) -> Self {
        self.with(field, Comparison::StrictNotIn, values)
    }

    /// Adds a `pattern-match` clause.
    ///
    /// Returns an error if the pattern is invalid.
    pub fn pattern(self, field: impl Into<String>, pattern: &str) -> Result<Self> {
        self.clause(field, Op::PatternMatch, pattern)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the clauses in evaluation order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Iterates the clauses in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Clause> {
        self.clauses.iter()
    }

    /// Returns the number of clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns `true` if there are no clauses (matches everything).
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns the referenced field names, first occurrence order, no duplicates.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::with_capacity(self.clauses.len());
        for clause in &self.clauses {
            if !fields.contains(&clause.field()) {
                fields.push(clause.field());
            }
        }
        fields
    }
}

impl<'a> IntoIterator for &'a Conditions {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

impl TryFrom<Vec<Condition>> for Conditions {
    type Error = crate::error::MatchError;

    fn try_from(conditions: Vec<Condition>) -> Result<Self> {
        Conditions::from_conditions(conditions)
    }
}

impl From<Vec<Clause>> for Conditions {
    fn from(clauses: Vec<Clause>) -> Self {
        Conditions { clauses }
    }
}
