//! Matcher: evaluates a condition set against a collection.
//!
//! A collection is any iterator of `(key, &record)` pairs. Keys are opaque:
//! the matcher hands back exactly the keys it was given, in iteration order.
//!
//! # Evaluation
//!
//! For each record, clauses run in order:
//!
//! ```text
//! field missing           -> record rejected (either mode)
//! AND: clause false       -> record rejected
//! OR:  clause true        -> record accepted
//! OR:  last clause false  -> record rejected
//! all clauses consumed    -> record accepted
//! ```
//!
//! The last line is reached when every clause held under AND, or when the
//! set is empty; an empty set accepts every record in both modes.

use tracing::{debug, trace};

use crate::conditions::Conditions;
use crate::mode::LogicMode;
use crate::projector::Projection;
use crate::record::Record;

/// A condition set bound to a logic mode.
///
/// # Example
///
/// ```
/// use keymatch::{Conditions, LogicMode, Matcher, Value};
/// use std::collections::BTreeMap;
///
/// fn phone(mfr: &str, cost: i64) -> BTreeMap<String, Value> {
///     BTreeMap::from([("mfr".to_string(), mfr.into()), ("cost".to_string(), cost.into())])
/// }
///
/// let phones = vec![
///     phone("Apple", 100000),
///     phone("Motorola", 120000),
///     phone("Motorola", 150000),
/// ];
///
/// let matcher = Matcher::new(Conditions::new().eq("mfr", "Apple").gt("cost", 140000))
///     .mode(LogicMode::Or);
///
/// let keys = matcher.keys(phones.iter().enumerate());
/// assert_eq!(keys, vec![0, 2]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    conditions: Conditions,
    mode: LogicMode,
}

impl Matcher {
    /// Creates a matcher in `And` mode.
    pub fn new(conditions: Conditions) -> Self {
        Matcher {
            conditions,
            mode: LogicMode::And,
        }
    }

    /// Sets the logic mode.
    pub fn mode(mut self, mode: LogicMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the condition set.
    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    /// Returns the logic mode.
    pub fn logic_mode(&self) -> LogicMode {
        self.mode
    }

    /// Tests if a single record matches.
    pub fn is_match<R: Record + ?Sized>(&self, record: &R) -> bool {
        record_matches(&self.conditions, self.mode, record)
    }

    /// Lazily yields the keys of matching records.
    pub fn iter<'m, I>(&'m self, collection: I) -> Matches<'m, I::IntoIter>
    where
        I: IntoIterator,
    {
        Matches {
            matcher: self,
            inner: collection.into_iter(),
        }
    }

    /// Collects the keys of matching records, in collection order.
    pub fn keys<'r, K, R, I>(&self, collection: I) -> Vec<K>
    where
        I: IntoIterator<Item = (K, &'r R)>,
        R: Record + ?Sized + 'r,
    {
        match_keys(collection, &self.conditions, self.mode)
    }

    /// Matches and projects in one pass.
    ///
    /// Equivalent to [`project`](crate::project)ing the collection onto
    /// [`keys`](Matcher::keys), without walking the collection twice.
    pub fn filter_and_project<'r, K, R, I>(
        &self,
        collection: I,
        reindex: bool,
    ) -> Projection<K, &'r R>
    where
        I: IntoIterator<Item = (K, &'r R)>,
        R: Record + ?Sized + 'r,
    {
        filter_and_project(collection, &self.conditions, self.mode, reindex)
    }
}

/// Iterator over the keys of matching records.
///
/// Created by [`Matcher::iter`].
#[derive(Debug, Clone)]
pub struct Matches<'m, I> {
    matcher: &'m Matcher,
    inner: I,
}

impl<'m, 'r, K, R, I> Iterator for Matches<'m, I>
where
    I: Iterator<Item = (K, &'r R)>,
    R: Record + ?Sized + 'r,
{
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let matcher = self.matcher;
        self.inner
            .by_ref()
            .find_map(|(key, record)| matcher.is_match(record).then_some(key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Returns the keys of the records matching `conditions` under `mode`.
///
/// ```
/// use keymatch::{match_keys, Conditions, LogicMode, Value};
/// use std::collections::HashMap;
///
/// let mut record = HashMap::new();
/// record.insert("mfr".to_string(), Value::from("Motorola"));
/// let records = vec![record];
///
/// let conditions = Conditions::new().eq("mfr", "Motorola");
/// assert_eq!(match_keys(records.iter().enumerate(), &conditions, LogicMode::And), vec![0]);
/// ```
pub fn match_keys<'r, K, R, I>(collection: I, conditions: &Conditions, mode: LogicMode) -> Vec<K>
where
    I: IntoIterator<Item = (K, &'r R)>,
    R: Record + ?Sized + 'r,
{
    let mut scanned = 0usize;
    let keys: Vec<K> = collection
        .into_iter()
        .filter_map(|(key, record)| {
            scanned += 1;
            record_matches(conditions, mode, record).then_some(key)
        })
        .collect();

    debug!(
        mode = %mode,
        clauses = conditions.len(),
        scanned,
        matched = keys.len(),
        "match run complete"
    );
    keys
}

/// Matches `collection` and returns the matching records.
///
/// With `reindex`, the result is a plain sequence of records; without it the
/// original keys are kept alongside. Keys of the keyed result equal
/// [`match_keys`] for the same inputs.
pub fn filter_and_project<'r, K, R, I>(
    collection: I,
    conditions: &Conditions,
    mode: LogicMode,
    reindex: bool,
) -> Projection<K, &'r R>
where
    I: IntoIterator<Item = (K, &'r R)>,
    R: Record + ?Sized + 'r,
{
    let kept = collection
        .into_iter()
        .filter(|(_, record)| record_matches(conditions, mode, *record));
    if reindex {
        Projection::Reindexed(kept.map(|(_, record)| record).collect())
    } else {
        Projection::Keyed(kept.collect())
    }
}

fn record_matches<R>(conditions: &Conditions, mode: LogicMode, record: &R) -> bool
where
    R: Record + ?Sized,
{
    let last = conditions.len().saturating_sub(1);

    for (position, clause) in conditions.iter().enumerate() {
        let Some(value) = record.field(clause.field()) else {
            trace!(field = clause.field(), "field missing, record rejected");
            return false;
        };

        match (mode, clause.matches(value)) {
            (LogicMode::Or, true) => return true,
            (LogicMode::And, false) => return false,
            (LogicMode::Or, false) if position == last => return false,
            _ => {}
        }
    }

    true
}
