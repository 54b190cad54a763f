//! Projection of a collection onto a set of keys.

use std::collections::HashSet;
use std::hash::Hash;

/// Records selected from a collection.
///
/// `Reindexed` drops the original keys; `Keyed` keeps each record next to its
/// key. Both preserve the collection's order.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection<K, R> {
    /// Records only, as a plain sequence.
    Reindexed(Vec<R>),
    /// `(key, record)` pairs.
    Keyed(Vec<(K, R)>),
}

impl<K, R> Projection<K, R> {
    /// Returns the number of records.
    pub fn len(&self) -> usize {
        match self {
            Projection::Reindexed(records) => records.len(),
            Projection::Keyed(pairs) => pairs.len(),
        }
    }

    /// Returns `true` if no record was selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` for the `Reindexed` form.
    pub fn is_reindexed(&self) -> bool {
        matches!(self, Projection::Reindexed(_))
    }

    /// Iterates the records in order.
    pub fn records(&self) -> Box<dyn Iterator<Item = &R> + '_> {
        match self {
            Projection::Reindexed(records) => Box::new(records.iter()),
            Projection::Keyed(pairs) => Box::new(pairs.iter().map(|(_, record)| record)),
        }
    }

    /// Iterates the kept keys in order. Empty for `Reindexed`.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        let pairs: &[(K, R)] = match self {
            Projection::Reindexed(_) => Default::default(),
            Projection::Keyed(pairs) => pairs,
        };
        pairs.iter().map(|(key, _)| key)
    }

    /// Consumes the projection, returning the records.
    pub fn into_records(self) -> Vec<R> {
        match self {
            Projection::Reindexed(records) => records,
            Projection::Keyed(pairs) => pairs.into_iter().map(|(_, record)| record).collect(),
        }
    }

    /// Consumes the projection, returning the `(key, record)` pairs.
    ///
    /// Returns `None` for the `Reindexed` form, which has no keys left.
    pub fn into_keyed(self) -> Option<Vec<(K, R)>> {
        match self {
            Projection::Reindexed(_) => None,
            Projection::Keyed(pairs) => Some(pairs),
        }
    }
}

/// Keeps the `(key, record)` pairs whose key is in `keys`.
///
/// The collection's order is preserved, not the order of `keys`. Keys absent
/// from the collection are ignored.
///
/// ```
/// use keymatch::{project, Projection};
///
/// let records = vec!["apple", "motorola-x2", "motorola-x100"];
/// let projection = project(records.iter().enumerate(), &[2, 1], true);
/// assert_eq!(projection, Projection::Reindexed(vec![&"motorola-x2", &"motorola-x100"]));
/// ```
pub fn project<K, R, I>(collection: I, keys: &[K], reindex: bool) -> Projection<K, R>
where
    I: IntoIterator<Item = (K, R)>,
    K: Eq + Hash,
{
    let wanted: HashSet<&K> = keys.iter().collect();
    let kept = collection
        .into_iter()
        .filter(|(key, _)| wanted.contains(key));
    if reindex {
        Projection::Reindexed(kept.map(|(_, record)| record).collect())
    } else {
        Projection::Keyed(kept.collect())
    }
}
