//! Purpose: Model ordered row collections keyed by associative identifiers.
//! Exports: `RowId`, `Record`, `RecordSet`.
//! Role: The data model the search and sort operations work over.
//! Invariants: Iteration order is insertion order; identifiers are unique per set.
//! Invariants: A textual identifier in canonical integer form is the same
//! identifier as the numeric one (`"7"` and `7` name one row).

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// One row of a [`RecordSet`]: a mapping of field name to value.
pub type Record = Map<String, Value>;

/// Row identifier: either a name or a numeric index.
///
/// Construction through the `From` impls canonicalizes: a string that is a
/// canonical base-10 integer (no sign, no leading zeros) becomes an
/// [`RowId::Index`]. `"007"` stays a name.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum RowId {
    Index(u64),
    Name(String),
}

fn canonical_index(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if value.len() > 1 && value.starts_with('0') {
        return None;
    }
    value.parse().ok()
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<u64> for RowId {
    fn from(value: u64) -> Self {
        Self::Index(value)
    }
}

impl From<usize> for RowId {
    fn from(value: usize) -> Self {
        Self::Index(value as u64)
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        match canonical_index(value) {
            Some(index) => Self::Index(index),
            None => Self::Name(value.to_string()),
        }
    }
}

impl From<String> for RowId {
    fn from(value: String) -> Self {
        match canonical_index(&value) {
            Some(index) => Self::Index(index),
            None => Self::Name(value),
        }
    }
}

impl Serialize for RowId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RowId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowIdVisitor;

        impl Visitor<'_> for RowIdVisitor {
            type Value = RowId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a row identifier (string or unsigned integer)")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<RowId, E> {
                Ok(RowId::from(value))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<RowId, E> {
                Ok(RowId::from(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<RowId, E> {
                Ok(RowId::Index(value))
            }
        }

        deserializer.deserialize_any(RowIdVisitor)
    }
}

/// Insertion-ordered mapping of [`RowId`] to row value.
///
/// Values are arbitrary [`serde_json::Value`]s; entries whose value is not an
/// object are tolerated (search skips them, sort rejects them). Serializes as
/// a JSON object whose key order is the iteration order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    pub(crate) rows: IndexMap<RowId, Value>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self {
            rows: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Inserts a row, returning the previous value for the identifier if any.
    /// An existing identifier keeps its position; new ones append.
    pub fn insert(&mut self, id: impl Into<RowId>, value: impl Into<Value>) -> Option<Value> {
        self.rows.insert(id.into(), value.into())
    }

    pub fn get(&self, id: impl Into<RowId>) -> Option<&Value> {
        self.rows.get(&id.into())
    }

    pub fn contains(&self, id: impl Into<RowId>) -> bool {
        self.rows.contains_key(&id.into())
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, RowId, Value> {
        self.rows.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &RowId> {
        self.rows.keys()
    }

    /// Iterates only the entries whose value is a record.
    pub fn records(&self) -> impl Iterator<Item = (&RowId, &Record)> {
        self.rows
            .iter()
            .filter_map(|(id, value)| value.as_object().map(|record| (id, record)))
    }
}

impl<I: Into<RowId>, V: Into<Value>> FromIterator<(I, V)> for RecordSet {
    fn from_iter<T: IntoIterator<Item = (I, V)>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<I: Into<RowId>, V: Into<Value>> Extend<(I, V)> for RecordSet {
    fn extend<T: IntoIterator<Item = (I, V)>>(&mut self, iter: T) {
        for (id, value) in iter {
            self.insert(id, value);
        }
    }
}

impl IntoIterator for RecordSet {
    type Item = (RowId, Value);
    type IntoIter = indexmap::map::IntoIter<RowId, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = (&'a RowId, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, RowId, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
