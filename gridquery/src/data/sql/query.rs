//! SQL query builder
//!
//! Accumulates predicate groups, ordering and the page window, and renders
//! them as SELECT / COUNT / SUM statements with bind parameters.

use chrono::NaiveDate;

use super::Backend;
use crate::data::predicate::{Predicate, PredicateGroup, SortDirection};
use crate::data::traits::QueryState;

/// A bind parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Number(f64),
    /// Bound as `YYYY-MM-DD` text
    Date(NaiveDate),
}

/// Collects SQL parameters during query building (maintains insertion order)
#[derive(Debug, Default)]
pub struct SqlParams {
    pub values: Vec<SqlValue>,
}

impl SqlParams {
    /// Push a value and return its placeholder
    fn bind(&mut self, backend: Backend, value: SqlValue) -> String {
        self.values.push(value);
        backend.dialect().placeholder(self.values.len())
    }
}

/// Rendered SQL with its parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Query over a single table or view
#[derive(Debug, Clone)]
pub struct SqlQuery {
    backend: Backend,
    table: String,
    select: Vec<String>,
    state: QueryState,
}

impl SqlQuery {
    pub fn table(backend: Backend, table: impl Into<String>) -> Self {
        Self {
            backend,
            table: table.into(),
            select: Vec::new(),
            state: QueryState::default(),
        }
    }

    /// Restrict the selected columns (all columns when empty)
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn selected_columns(&self) -> &[String] {
        &self.select
    }

    pub fn filter(&mut self, group: PredicateGroup) {
        self.state.filter(group);
    }

    pub fn order_by(&mut self, field: &str, direction: SortDirection) {
        self.state.order_by(field, direction);
    }

    pub fn skip(&mut self, n: i64) {
        self.state.skip(n);
    }

    pub fn limit(&mut self, n: i64) {
        self.state.limit(n);
    }

    /// `SELECT ... WHERE ... ORDER BY ... LIMIT/OFFSET`
    pub fn to_select_sql(&self) -> SqlStatement {
        let dialect = self.backend.dialect();
        let mut params = SqlParams::default();

        let columns = if self.select.is_empty() {
            "*".to_string()
        } else {
            self.select
                .iter()
                .map(|c| dialect.quote_identifier(c))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut sql = format!(
            "SELECT {} FROM {}",
            columns,
            dialect.quote_identifier(&self.table)
        );
        sql.push_str(&self.where_clause(&mut params));

        if !self.state.order.is_empty() {
            let order = self
                .state
                .order
                .iter()
                .map(|(field, direction)| {
                    // NULL sorts lowest: first ascending, last descending
                    let desc = direction.is_descending();
                    dialect.order_by_with_nulls(&dialect.quote_identifier(field), desc, desc)
                })
                .collect::<Vec<_>>()
                .join(", ");
            sql.push_str(" ORDER BY ");
            sql.push_str(&order);
        }

        let window = dialect.limit_offset(self.state.limit, self.state.offset);
        if !window.is_empty() {
            sql.push(' ');
            sql.push_str(&window);
        }

        tracing::debug!(backend = %self.backend, sql = %sql, "Rendered select");
        SqlStatement {
            sql,
            params: params.values,
        }
    }

    /// `SELECT COUNT(*) ... WHERE ...`, ignoring ordering and window
    pub fn to_count_sql(&self) -> SqlStatement {
        let mut params = SqlParams::default();
        let sql = format!(
            "SELECT COUNT(*) FROM {}{}",
            self.backend.dialect().quote_identifier(&self.table),
            self.where_clause(&mut params)
        );
        SqlStatement {
            sql,
            params: params.values,
        }
    }

    /// Sum of `field` as a double, 0 when nothing matches
    pub fn to_sum_sql(&self, field: &str) -> SqlStatement {
        let dialect = self.backend.dialect();
        let mut params = SqlParams::default();
        let total = format!("COALESCE(SUM({}), 0)", dialect.quote_identifier(field));
        let sql = format!(
            "SELECT {} FROM {}{}",
            dialect.cast_to_double(&total),
            dialect.quote_identifier(&self.table),
            self.where_clause(&mut params)
        );
        SqlStatement {
            sql,
            params: params.values,
        }
    }

    fn where_clause(&self, params: &mut SqlParams) -> String {
        let conditions: Vec<String> = self
            .state
            .groups
            .iter()
            .filter(|group| !group.is_empty())
            .map(|group| {
                let parts: Vec<String> = group
                    .predicates()
                    .iter()
                    .map(|predicate| self.predicate_sql(predicate, params))
                    .collect();
                format!("({})", parts.join(" OR "))
            })
            .collect();

        if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        }
    }

    fn predicate_sql(&self, predicate: &Predicate, params: &mut SqlParams) -> String {
        let dialect = self.backend.dialect();
        let col = dialect.quote_identifier(predicate.field());

        match predicate {
            Predicate::Like { pattern, .. } => {
                let ph = params.bind(self.backend, SqlValue::Text(pattern.clone()));
                format!("{} {} {} ESCAPE '\\'", col, dialect.like_operator(), ph)
            }
            Predicate::TextEq { value, .. } => {
                let ph = params.bind(self.backend, SqlValue::Text(value.clone()));
                format!("{} = {}", col, ph)
            }
            Predicate::NumberEq { value, .. } => {
                let ph = params.bind(self.backend, SqlValue::Number(*value));
                format!("{} = {}", col, ph)
            }
            Predicate::DateEq { value, .. } => {
                let ph = params.bind(self.backend, SqlValue::Date(*value));
                dialect.date_equals(&col, &ph)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(backend: Backend) -> SqlQuery {
        SqlQuery::table(backend, "fake_models").select(["id", "name", "value"])
    }

    #[test]
    fn test_plain_select() {
        let stmt = base(Backend::Duckdb).to_select_sql();
        assert_eq!(
            stmt.sql,
            r#"SELECT "id", "name", "value" FROM "fake_models""#
        );
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn test_groups_render_as_and_of_ors() {
        let mut query = base(Backend::Duckdb);
        query.filter(
            PredicateGroup::single(Predicate::contains("name", "Bob"))
                .or(Predicate::number_eq("value", 20.0)),
        );
        query.filter(PredicateGroup::single(Predicate::text_eq("name", "Bob")));

        let stmt = query.to_count_sql();
        assert_eq!(
            stmt.sql,
            concat!(
                r#"SELECT COUNT(*) FROM "fake_models" "#,
                r#"WHERE ("name" ILIKE ? ESCAPE '\' OR "value" = ?) AND ("name" = ?)"#
            )
        );
        assert_eq!(
            stmt.params,
            vec![
                SqlValue::Text("%Bob%".to_string()),
                SqlValue::Number(20.0),
                SqlValue::Text("Bob".to_string()),
            ]
        );
    }

    #[test]
    fn test_order_and_window() {
        let mut query = base(Backend::Duckdb);
        query.order_by("value", SortDirection::Desc);
        query.order_by("id", SortDirection::Asc);
        query.skip(10);
        query.limit(10);

        assert_eq!(
            query.to_select_sql().sql,
            concat!(
                r#"SELECT "id", "name", "value" FROM "fake_models" "#,
                r#"ORDER BY "value" DESC NULLS LAST, "id" ASC NULLS FIRST LIMIT 10 OFFSET 10"#
            )
        );
    }

    #[test]
    fn test_date_predicate_binds_date() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
        let mut query = base(Backend::Duckdb);
        query.filter(PredicateGroup::single(Predicate::starts_with("name", "Al")));
        query.filter(PredicateGroup::single(Predicate::date_eq("created_at", date)));

        let stmt = query.to_select_sql();
        assert_eq!(
            stmt.sql,
            concat!(
                r#"SELECT "id", "name", "value" FROM "fake_models" "#,
                r#"WHERE ("name" ILIKE ? ESCAPE '\') "#,
                r#"AND (CAST("created_at" AS DATE) = CAST(? AS DATE))"#
            )
        );
        assert_eq!(stmt.params[1], SqlValue::Date(date));
    }

    #[test]
    fn test_sum_ignores_order_and_window() {
        let mut query = base(Backend::Duckdb);
        query.order_by("id", SortDirection::Asc);
        query.limit(5);
        query.filter(PredicateGroup::single(Predicate::number_eq("value", 30.0)));

        assert_eq!(
            query.to_sum_sql("value").sql,
            concat!(
                r#"SELECT CAST(COALESCE(SUM("value"), 0) AS DOUBLE) "#,
                r#"FROM "fake_models" WHERE ("value" = ?)"#
            )
        );
    }

    #[test]
    fn test_empty_select_means_all_columns() {
        let query = SqlQuery::table(Backend::Duckdb, "main.rows");
        assert_eq!(query.to_select_sql().sql, r#"SELECT * FROM "main"."rows""#);
        assert_eq!(query.backend(), Backend::Duckdb);
    }

    #[test]
    fn test_clones_render_independently() {
        let base = base(Backend::Duckdb);
        let mut copy = base.clone();
        copy.filter(PredicateGroup::single(Predicate::text_eq("name", "Bob")));

        assert!(!base.to_count_sql().sql.contains("WHERE"));
        assert!(copy.to_count_sql().sql.contains("WHERE"));
    }
}
