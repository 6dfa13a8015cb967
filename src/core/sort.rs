//! Purpose: Stable in-place sort of a record set by a chosen column.
//! Exports: `sort_by_column`, `Direction`, `SortMode`.
//! Role: Reorders entries only; identifiers and record contents never change.
//! Invariants: Sort keys are extracted and validated before anything moves,
//! so the set is untouched when a row is missing the column.
//! Invariants: Equal keys keep input order in both directions.

use std::cmp::Ordering;

use serde_json::Value;
use unicase::UniCase;

use crate::core::coerce;
use crate::core::error::{Error, ErrorKind};
use crate::core::record::{RecordSet, RowId};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortMode {
    /// Compare the values' text forms byte-wise.
    #[default]
    AsString,
    /// Compare numeric forms; values with none coerce to 0.
    AsNumber,
    /// Alphanumeric comparison: digit runs compare as numbers.
    Natural,
    /// Unicode case-folded comparison; case-folded equals are ties.
    Locale,
}

enum SortKey {
    Text(String),
    Number(f64),
    Natural(String),
    Folded(UniCase<String>),
}

impl SortKey {
    fn extract(value: &Value, mode: SortMode) -> Self {
        match mode {
            SortMode::AsString => Self::Text(coerce::sort_text(value)),
            SortMode::AsNumber => Self::Number(coerce::numeric_form(value).unwrap_or(0.0)),
            SortMode::Natural => Self::Natural(coerce::sort_text(value)),
            SortMode::Locale => Self::Folded(UniCase::new(coerce::sort_text(value))),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Natural(a), Self::Natural(b)) => natural_cmp(a, b),
            (Self::Folded(a), Self::Folded(b)) => a.cmp(b),
            // Keys from one call share a single mode.
            _ => Ordering::Equal,
        }
    }
}

/// Sorts `set` in place by the value at `column` in each record.
///
/// Every entry must be a record containing `column`; otherwise the call
/// fails with [`ErrorKind::MissingColumn`] naming the offending row and the
/// set stays as it was. Sorting an already-sorted set is a no-op.
pub fn sort_by_column(
    set: &mut RecordSet,
    column: &str,
    direction: Direction,
    mode: SortMode,
) -> Result<(), Error> {
    if set.is_empty() {
        return Ok(());
    }

    let mut keys = Vec::with_capacity(set.len());
    for (id, value) in set.iter() {
        let field = match value.as_object() {
            Some(record) => record.get(column),
            None => {
                return Err(Error::new(ErrorKind::MissingColumn)
                    .with_message("row is not a record")
                    .with_row(id.clone())
                    .with_column(column));
            }
        };
        let Some(field) = field else {
            return Err(Error::new(ErrorKind::MissingColumn)
                .with_message("row has no value for the sort column")
                .with_row(id.clone())
                .with_column(column));
        };
        keys.push(SortKey::extract(field, mode));
    }

    let rows = std::mem::take(&mut set.rows);
    let mut entries: Vec<((RowId, Value), SortKey)> = rows.into_iter().zip(keys).collect();
    // Vec::sort_by is stable; ties keep input order in both directions.
    entries.sort_by(|(_, a), (_, b)| match direction {
        Direction::Ascending => a.compare(b),
        Direction::Descending => b.compare(a),
    });
    set.rows = entries.into_iter().map(|(entry, _)| entry).collect();

    tracing::debug!(
        column,
        rows = set.len(),
        direction = ?direction,
        mode = ?mode,
        "column sort complete"
    );
    Ok(())
}

fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let (run_a, run_b) = (digit_run(a, i), digit_run(b, j));
            let da = strip_zeros(&a[i..run_a]);
            let db = strip_zeros(&b[j..run_b]);
            let ord = da.len().cmp(&db.len()).then_with(|| da.cmp(db));
            if ord != Ordering::Equal {
                return ord;
            }
            i = run_a;
            j = run_b;
        } else {
            let ord = a[i].cmp(&b[j]);
            if ord != Ordering::Equal {
                return ord;
            }
            i += 1;
            j += 1;
        }
    }
    match (i < a.len(), j < b.len()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        // Runs compared equal; zero-padding differences decide.
        _ => a.cmp(b),
    }
}

fn digit_run(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    end
}

fn strip_zeros(digits: &[u8]) -> &[u8] {
    let mut start = 0;
    while start + 1 < digits.len() && digits[start] == b'0' {
        start += 1;
    }
    &digits[start..]
}

#[cfg(test)]
mod tests {
    use super::{natural_cmp, sort_by_column, Direction, SortMode};
    use crate::core::error::ErrorKind;
    use crate::core::record::{RecordSet, RowId};
    use serde_json::json;
    use std::cmp::Ordering;

    fn ids(set: &RecordSet) -> Vec<String> {
        set.keys().map(|id| id.to_string()).collect()
    }

    #[test]
    fn ascending_sort_is_stable_for_equal_values() {
        let mut set: RecordSet = [
            ("x", json!({"v": 3})),
            ("y", json!({"v": 1})),
            ("z", json!({"v": 1})),
        ]
        .into_iter()
        .collect();

        sort_by_column(&mut set, "v", Direction::Ascending, SortMode::AsNumber).expect("sort");
        assert_eq!(ids(&set), ["y", "z", "x"]);
    }

    #[test]
    fn descending_inverts_order_but_not_ties() {
        let mut set: RecordSet = [
            ("x", json!({"v": 3})),
            ("y", json!({"v": 1})),
            ("z", json!({"v": 1})),
        ]
        .into_iter()
        .collect();

        sort_by_column(&mut set, "v", Direction::Descending, SortMode::AsNumber).expect("sort");
        assert_eq!(ids(&set), ["x", "y", "z"]);
    }

    #[test]
    fn sorting_a_sorted_set_changes_nothing() {
        let mut set: RecordSet = [
            ("y", json!({"v": 1})),
            ("z", json!({"v": 1})),
            ("x", json!({"v": 3})),
        ]
        .into_iter()
        .collect();
        let before = ids(&set);

        sort_by_column(&mut set, "v", Direction::Ascending, SortMode::AsNumber).expect("sort");
        assert_eq!(ids(&set), before);
    }

    #[test]
    fn numeric_mode_coerces_numeric_strings() {
        let mut set: RecordSet = [
            ("a", json!({"v": "10"})),
            ("b", json!({"v": 2})),
            ("c", json!({"v": "not numeric"})),
        ]
        .into_iter()
        .collect();

        sort_by_column(&mut set, "v", Direction::Ascending, SortMode::AsNumber).expect("sort");
        // "not numeric" coerces to 0 and sorts first.
        assert_eq!(ids(&set), ["c", "b", "a"]);
    }

    #[test]
    fn string_mode_compares_text_forms() {
        let mut set: RecordSet = [
            ("a", json!({"v": 10})),
            ("b", json!({"v": 2})),
        ]
        .into_iter()
        .collect();

        sort_by_column(&mut set, "v", Direction::Ascending, SortMode::AsString).expect("sort");
        // "10" sorts before "2" byte-wise.
        assert_eq!(ids(&set), ["a", "b"]);
    }

    #[test]
    fn natural_mode_orders_digit_runs_numerically() {
        let mut set: RecordSet = [
            ("a", json!({"v": "img10"})),
            ("b", json!({"v": "img2"})),
            ("c", json!({"v": "img1"})),
        ]
        .into_iter()
        .collect();

        sort_by_column(&mut set, "v", Direction::Ascending, SortMode::Natural).expect("sort");
        assert_eq!(ids(&set), ["c", "b", "a"]);
    }

    #[test]
    fn locale_mode_folds_case_and_keeps_tie_order() {
        let mut set: RecordSet = [
            ("a", json!({"v": "delta"})),
            ("b", json!({"v": "ALPHA"})),
            ("c", json!({"v": "alpha"})),
        ]
        .into_iter()
        .collect();

        sort_by_column(&mut set, "v", Direction::Ascending, SortMode::Locale).expect("sort");
        assert_eq!(ids(&set), ["b", "c", "a"]);
    }

    #[test]
    fn missing_column_fails_and_leaves_the_set_untouched() {
        let mut set: RecordSet = [
            ("first", json!({"v": 2, "w": 1})),
            ("second", json!({"v": 1})),
        ]
        .into_iter()
        .collect();
        let before = set.clone();

        let err = sort_by_column(&mut set, "w", Direction::Ascending, SortMode::AsString)
            .expect_err("missing column");
        assert_eq!(err.kind(), ErrorKind::MissingColumn);
        assert_eq!(err.row(), Some(&RowId::Name("second".to_string())));
        assert_eq!(err.column(), Some("w"));
        assert_eq!(ids(&set), ids(&before));
        assert_eq!(set, before);
    }

    #[test]
    fn non_record_entry_fails_the_sort() {
        let mut set = RecordSet::new();
        set.insert("a", json!({"v": 1}));
        set.insert("b", "not a record");

        let err = sort_by_column(&mut set, "v", Direction::Ascending, SortMode::AsString)
            .expect_err("non-record");
        assert_eq!(err.kind(), ErrorKind::MissingColumn);
        assert_eq!(err.row(), Some(&RowId::Name("b".to_string())));
    }

    #[test]
    fn empty_set_is_a_no_op() {
        let mut set = RecordSet::new();
        sort_by_column(&mut set, "v", Direction::Ascending, SortMode::AsString).expect("sort");
        assert!(set.is_empty());
    }

    #[test]
    fn identifier_set_and_contents_survive_sorting() {
        let mut set: RecordSet = [
            ("x", json!({"v": "b", "extra": [1, 2]})),
            ("y", json!({"v": "a"})),
        ]
        .into_iter()
        .collect();

        sort_by_column(&mut set, "v", Direction::Ascending, SortMode::AsString).expect("sort");
        assert_eq!(ids(&set), ["y", "x"]);
        assert_eq!(set.get("x"), Some(&json!({"v": "b", "extra": [1, 2]})));
        assert_eq!(set.get("y"), Some(&json!({"v": "a"})));
    }

    #[test]
    fn natural_compare_handles_runs_prefixes_and_zero_padding() {
        assert_eq!(natural_cmp("img2", "img10"), Ordering::Less);
        assert_eq!(natural_cmp("img10", "img10a"), Ordering::Less);
        assert_eq!(natural_cmp("a2b4", "a2b10"), Ordering::Less);
        assert_eq!(natural_cmp("007", "7"), Ordering::Less);
        assert_eq!(natural_cmp("same", "same"), Ordering::Equal);
    }
}
