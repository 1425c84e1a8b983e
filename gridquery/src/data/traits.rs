//! Query backend trait
//!
//! The paginator only talks to storage through `TableQuery`. Each backend
//! (in-memory rows, DuckDB) implements it with its own execution logic.

use crate::data::error::DataError;
use crate::data::predicate::{PredicateGroup, SortDirection};

/// A composable, cloneable query over one logical table.
///
/// `Clone` must produce a fully independent builder: filters, ordering and
/// the page window added to a clone never show up on the original.
pub trait TableQuery: Clone {
    /// Raw row type returned by `fetch`
    type Row;

    /// Add a predicate group (OR inside, AND with everything already added)
    fn filter(&mut self, group: PredicateGroup);

    /// Append an ordering clause after the ones already present
    fn order_by(&mut self, field: &str, direction: SortDirection);

    /// Skip `n` rows. Negative values are clamped to zero.
    fn skip(&mut self, n: i64);

    /// Return at most `n` rows. Negative values leave the query unlimited.
    fn limit(&mut self, n: i64);

    /// Count matching rows, ignoring ordering and the page window
    fn count(&self) -> Result<u64, DataError>;

    /// Sum a field over matching rows, ignoring ordering and the page window
    fn sum(&self, field: &str) -> Result<f64, DataError>;

    /// Execute the query
    fn fetch(&self) -> Result<Vec<Self::Row>, DataError>;
}

/// Builder state shared by the bundled backends
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    pub groups: Vec<PredicateGroup>,
    pub order: Vec<(String, SortDirection)>,
    pub offset: u64,
    pub limit: Option<u64>,
}

impl QueryState {
    pub fn filter(&mut self, group: PredicateGroup) {
        if !group.is_empty() {
            self.groups.push(group);
        }
    }

    pub fn order_by(&mut self, field: &str, direction: SortDirection) {
        self.order.push((field.to_string(), direction));
    }

    pub fn skip(&mut self, n: i64) {
        self.offset = n.max(0) as u64;
    }

    pub fn limit(&mut self, n: i64) {
        if n >= 0 {
            self.limit = Some(n as u64);
        }
    }
}
