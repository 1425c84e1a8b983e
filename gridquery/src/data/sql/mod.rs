//! SQL rendering
//!
//! Renders paginator queries as parameterised SQL. DuckDB is the only
//! engine that executes them today; dialect differences stay behind
//! `SqlDialect`.

mod dialect;
mod duckdb_dialect;
mod query;

pub use dialect::SqlDialect;
pub use duckdb_dialect::DuckdbDialect;
pub use query::{SqlParams, SqlQuery, SqlStatement, SqlValue};

/// SQL engine a query is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Duckdb,
}

impl Backend {
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Backend::Duckdb => &DuckdbDialect,
        }
    }

    pub fn name(&self) -> &'static str {
        self.dialect().name()
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
