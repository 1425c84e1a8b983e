//! SQL dialect trait
//!
//! Database-specific syntax used when rendering `SqlQuery` statements.

/// SQL dialect trait for generating database-specific SQL
///
/// Dialects differ in:
/// - Parameter placeholders (? vs $1)
/// - Case-insensitive pattern matching
/// - Date comparison and type casting
/// - NULL placement in ORDER BY
/// - Limit/offset clauses
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Generate a parameter placeholder for the given index (1-based)
    fn placeholder(&self, index: usize) -> String;

    /// Quote an identifier, treating `.` as a qualifier separator
    fn quote_identifier(&self, ident: &str) -> String {
        ident
            .split('.')
            .map(|part| format!("\"{}\"", part.replace('"', "\"\"")))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Case-insensitive LIKE operator
    fn like_operator(&self) -> &'static str;

    /// Compare the date part of a column against a `YYYY-MM-DD` parameter
    fn date_equals(&self, col: &str, placeholder: &str) -> String {
        format!("CAST({} AS DATE) = CAST({} AS DATE)", col, placeholder)
    }

    /// Cast an expression to a double-precision float
    fn cast_to_double(&self, expr: &str) -> String;

    /// Generate ORDER BY clause with NULL handling
    ///
    /// - DuckDB: `col DESC NULLS LAST`
    fn order_by_with_nulls(&self, col: &str, desc: bool, nulls_last: bool) -> String;

    /// Generate LIMIT/OFFSET clause
    fn limit_offset(&self, limit: Option<u64>, offset: u64) -> String {
        match (limit, offset) {
            (Some(limit), 0) => format!("LIMIT {}", limit),
            (Some(limit), offset) => format!("LIMIT {} OFFSET {}", limit, offset),
            (None, 0) => String::new(),
            (None, offset) => format!("OFFSET {}", offset),
        }
    }
}
