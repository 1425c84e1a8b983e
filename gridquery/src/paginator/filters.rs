//! Predicate builder
//!
//! Turns the global filter and per-column filters into predicate groups on
//! a (cloned) query.

use crate::data::predicate::{Predicate, PredicateGroup};
use crate::data::traits::TableQuery;
use crate::utils::numbers::parse_numeric;
use crate::utils::time::parse_filter_date;

use super::columns::{ColumnDescriptor, ColumnRegistry, ColumnType};
use super::request::ColumnFilter;

/// OR group matching `text` against every eligible column.
///
/// String columns match by substring. Number columns only take part when
/// `text` is numeric, date columns only when it is a `d/m/Y` date.
pub fn global_filter_group(text: &str, columns: &ColumnRegistry) -> PredicateGroup {
    let number = parse_numeric(text);
    let date = parse_filter_date(text).ok();

    let mut group = PredicateGroup::new();
    for column in columns.iter() {
        let predicate = match column.kind {
            ColumnType::String { .. } => Some(Predicate::contains(&column.id, text)),
            ColumnType::Number => number.map(|n| Predicate::number_eq(&column.id, n)),
            ColumnType::Date => date.map(|d| Predicate::date_eq(&column.id, d)),
        };
        if let Some(predicate) = predicate {
            group.push(predicate);
        }
    }
    group
}

/// Predicate for one column filter value, `None` when the value does not
/// fit the column type
pub fn column_filter_predicate(column: &ColumnDescriptor, value: &str) -> Option<Predicate> {
    match column.kind {
        ColumnType::String { exact: true } => Some(Predicate::text_eq(&column.id, value)),
        ColumnType::String { exact: false } => Some(Predicate::starts_with(&column.id, value)),
        ColumnType::Number => parse_numeric(value).map(|n| Predicate::number_eq(&column.id, n)),
        ColumnType::Date => match parse_filter_date(value) {
            Ok(date) => Some(Predicate::date_eq(&column.id, date)),
            Err(err) => {
                tracing::trace!(column = %column.id, error = %err, "Skipping date filter");
                None
            }
        },
    }
}

/// Add the global filter group. Empty text and texts that match no column
/// leave the query untouched.
pub fn apply_global_filter<Q: TableQuery>(query: &mut Q, text: &str, columns: &ColumnRegistry) {
    if text.is_empty() {
        return;
    }

    let group = global_filter_group(text, columns);
    if group.is_empty() {
        tracing::trace!(text, "Global filter matches no column type");
        return;
    }
    query.filter(group);
}

/// Add one group per column filter.
///
/// Each entry uses the first registry column with a matching id. Unknown
/// ids and values that do not fit the column type add nothing.
pub fn apply_column_filters<Q: TableQuery>(
    query: &mut Q,
    filters: &[ColumnFilter],
    columns: &ColumnRegistry,
) {
    for filter in filters {
        let Some(column) = columns.find(&filter.id) else {
            tracing::trace!(id = %filter.id, "Ignoring filter on unknown column");
            continue;
        };

        match column_filter_predicate(column, &filter.value) {
            Some(predicate) => query.filter(PredicateGroup::single(predicate)),
            None => {
                tracing::trace!(id = %filter.id, value = %filter.value, "Ignoring filter value")
            }
        }
    }
}
