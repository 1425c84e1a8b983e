//! Sort applier

use crate::data::predicate::SortDirection;
use crate::data::traits::TableQuery;

use super::request::SortColumn;

/// Add the requested ordering clauses, then the primary key tiebreak.
///
/// The tiebreak is always appended, so pages are deterministic even when
/// the request sorts on nothing or on columns with duplicate values.
pub fn apply_sorting<Q: TableQuery>(
    query: &mut Q,
    sorting: &[SortColumn],
    primary_key: &str,
    default_direction: SortDirection,
) {
    for column in sorting {
        query.order_by(&column.id, SortDirection::from_descending(column.descending));
    }
    query.order_by(primary_key, default_direction);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::MemoryTable;

    fn sort(id: &str, descending: bool) -> SortColumn {
        SortColumn {
            id: id.to_string(),
            descending,
        }
    }

    #[test]
    fn test_tiebreak_without_requested_sort() {
        let mut query = MemoryTable::default().query();
        apply_sorting(&mut query, &[], "id", SortDirection::Asc);
        assert_eq!(query.state().order, vec![("id".to_string(), SortDirection::Asc)]);
    }

    #[test]
    fn test_requested_order_then_tiebreak() {
        let mut query = MemoryTable::default().query();
        apply_sorting(
            &mut query,
            &[sort("value", true), sort("name", false)],
            "uuid",
            SortDirection::Desc,
        );
        assert_eq!(
            query.state().order,
            vec![
                ("value".to_string(), SortDirection::Desc),
                ("name".to_string(), SortDirection::Asc),
                ("uuid".to_string(), SortDirection::Desc),
            ]
        );
    }
}
