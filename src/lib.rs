//! Purpose: Row search and stable column sort over ordered collections of JSON records.
//! Exports: `core` (record model, coercion, criteria, search, sort, errors) plus flat re-exports.
//! Role: Standalone utility library; callers own subscriber wiring and all data I/O.
//! Invariants: Operations take every parameter explicitly; no shared or global state.
//! Invariants: Absence of a match is an empty result, never an error.
pub mod core;

pub use crate::core::criterion::{Criterion, PATTERN_SIGIL};
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::record::{Record, RecordSet, RowId};
pub use crate::core::search::{search_rows, search_rows_by_value, SearchOptions};
pub use crate::core::sort::{sort_by_column, Direction, SortMode};
