// Row search over a record set by sub-key/value criterion.
// Match parameters travel through the call; nothing is shared across invocations.

use serde_json::Value;

use crate::core::criterion::Criterion;
use crate::core::error::Error;
use crate::core::record::{RecordSet, RowId};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SearchOptions {
    /// Keep original identifiers in the result. When false, matches are
    /// renumbered as a contiguous zero-based sequence in match order.
    pub preserve_ids: bool,
    /// Compare literals with strict (type-and-value) equality instead of the
    /// loose coercion policy. Ignored for pattern criteria.
    pub strict: bool,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self {
            preserve_ids: true,
            strict: false,
        }
    }

    pub fn with_renumbered_ids(mut self) -> Self {
        self.preserve_ids = false;
        self
    }

    pub fn with_strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the entries whose record contains `key` with a value matching
/// `criterion`, in input order. Entries that are not records, or whose record
/// lacks `key`, are skipped. An empty result is not an error.
pub fn search_rows(
    set: &RecordSet,
    key: &str,
    criterion: &Criterion,
    options: &SearchOptions,
) -> RecordSet {
    let row_matches = |value: &Value| {
        value
            .as_object()
            .and_then(|record| record.get(key))
            .is_some_and(|field| criterion.matches(field, options.strict))
    };

    let mut result = RecordSet::new();
    for (id, value) in set.iter() {
        if !row_matches(value) {
            continue;
        }
        if options.preserve_ids {
            result.insert(id.clone(), value.clone());
        } else {
            result.insert(RowId::Index(result.len() as u64), value.clone());
        }
    }
    tracing::debug!(
        key,
        matched = result.len(),
        scanned = set.len(),
        "row search complete"
    );
    result
}

/// [`search_rows`] with the sigil convention applied to `value` first: a
/// string starting with `/` is compiled as a `/body/flags` pattern. The only
/// error is an invalid pattern.
pub fn search_rows_by_value(
    set: &RecordSet,
    key: &str,
    value: &Value,
    options: &SearchOptions,
) -> Result<RecordSet, Error> {
    let criterion = Criterion::from_value(value)?;
    Ok(search_rows(set, key, &criterion, options))
}
