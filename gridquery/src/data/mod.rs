//! Data layer
//!
//! Backend-neutral predicates and the `TableQuery` contract, plus the
//! bundled backends: in-memory JSON rows and DuckDB (feature `duckdb`).

#[cfg(feature = "duckdb")]
pub mod duckdb;
pub mod error;
pub mod memory;
pub mod predicate;
pub mod sql;
pub mod traits;

#[cfg(feature = "duckdb")]
pub use self::duckdb::{DuckdbDatabase, DuckdbQuery};
pub use error::DataError;
pub use memory::{JsonRow, MemoryQuery, MemoryTable};
pub use predicate::{Predicate, PredicateGroup, SortDirection};
pub use traits::{QueryState, TableQuery};
