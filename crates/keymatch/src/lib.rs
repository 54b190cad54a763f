//! Keymatch - select records from an in-memory collection by field conditions.
//!
//! A collection is a keyed set of records (maps from field name to value).
//! Keymatch evaluates an ordered set of conditions against every record and
//! reports which keys matched, optionally projecting the collection onto
//! those keys.
//!
//! # Quick Start
//!
//! ```rust
//! use keymatch::{Conditions, LogicMode, Matcher, Value};
//! use std::collections::BTreeMap;
//!
//! fn phone(mfr: &str, cost: i64) -> BTreeMap<String, Value> {
//!     BTreeMap::from([("mfr".to_string(), mfr.into()), ("cost".to_string(), cost.into())])
//! }
//!
//! let phones = vec![
//!     phone("Apple", 100000),
//!     phone("Motorola", 120000),
//!     phone("Motorola", 150000),
//! ];
//!
//! // Simple conditions: loose equality, AND by default.
//! let motorola = Matcher::new(Conditions::from_pairs([("mfr", "Motorola")]));
//! assert_eq!(motorola.keys(phones.iter().enumerate()), vec![1, 2]);
//!
//! // Explicit conditions with OR.
//! let conditions = Conditions::new().eq("mfr", "Apple").gt("cost", 140000);
//! let either = Matcher::new(conditions).mode(LogicMode::Or);
//! let selected = either.filter_and_project(phones.iter().enumerate(), true);
//! assert_eq!(selected.len(), 2);
//! ```
//!
//! # Matching Semantics
//!
//! Clauses are evaluated in order. A record lacking a referenced field is
//! rejected outright. Under AND the first false clause rejects; under OR the
//! first true clause accepts. An empty condition set accepts every record.
//!
//! # Operators
//!
//! | Operator | Aliases | Meaning |
//! |----------|---------|---------|
//! | `equals` | `==`, `=`, `eq` | loose equality |
//! | `identical` | `===` | same type and value |
//! | `not-identical` | `!==` | negation of `identical` |
//! | `not-equals` | `!=`, `<>`, `ne` | negation of `equals` |
//! | `greater-than` | `>`, `gt` | loose ordering |
//! | `less-than` | `<`, `lt` | loose ordering |
//! | `greater-or-equal` | `>=`, `gte` | loose ordering |
//! | `less-or-equal` | `<=`, `lte` | loose ordering |
//! | `in` | | loose membership |
//! | `strict-in` | | identical membership |
//! | `not-in` | | negation of `in` |
//! | `strict-not-in` | | negation of `strict-in` |
//! | `pattern-match` | `preg`, `regex`, `~` | regular expression search |
//!
//! Unknown operator names fall back to `equals`. Loose equality and ordering
//! follow the coercion rules documented on [`loose_eq`] and [`loose_cmp`].
//!
//! # JSON Input
//!
//! The [`json`] module reads collections and condition sets from
//! `serde_json` values, accepting both the simple (`{"field": value}`) and
//! explicit (`[[op, field, value], ...]`) condition forms.

mod clause;
mod compare;
mod conditions;
mod error;
pub mod json;
mod matcher;
mod mode;
mod op;
mod projector;
mod record;
mod value;

// Re-export public API
pub use clause::{Clause, Condition};
pub use compare::{loose_cmp, loose_eq, strict_eq};
pub use conditions::Conditions;
pub use error::{MatchError, PatternError, Result};
pub use matcher::{filter_and_project, match_keys, Matcher, Matches};
pub use mode::LogicMode;
pub use op::Op;
pub use projector::{project, Projection};
pub use record::{Fields, Record};
pub use value::{Number, Value};
