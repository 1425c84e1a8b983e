//! DuckDB SQL dialect implementation

use super::SqlDialect;

/// DuckDB SQL dialect
pub struct DuckdbDialect;

impl SqlDialect for DuckdbDialect {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn like_operator(&self) -> &'static str {
        "ILIKE"
    }

    fn cast_to_double(&self, expr: &str) -> String {
        format!("CAST({} AS DOUBLE)", expr)
    }

    fn order_by_with_nulls(&self, col: &str, desc: bool, nulls_last: bool) -> String {
        let dir = if desc { "DESC" } else { "ASC" };
        let nulls = if nulls_last {
            "NULLS LAST"
        } else {
            "NULLS FIRST"
        };
        format!("{} {} {}", col, dir, nulls)
    }
}
