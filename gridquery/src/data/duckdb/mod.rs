//! DuckDB table backend
//!
//! Executes `SqlQuery` statements against a shared DuckDB connection.

pub mod sql_types;

use std::path::Path;
use std::sync::Arc;

use duckdb::Connection;
use parking_lot::Mutex;

use crate::data::error::DataError;
use crate::data::memory::JsonRow;
use crate::data::predicate::{PredicateGroup, SortDirection};
use crate::data::sql::{Backend, SqlQuery, SqlStatement};
use crate::data::traits::TableQuery;

use self::sql_types::value_to_json;

/// Shared DuckDB connection
#[derive(Clone)]
pub struct DuckdbDatabase {
    conn: Arc<Mutex<Connection>>,
}

impl DuckdbDatabase {
    pub fn open(path: &Path) -> Result<Self, DataError> {
        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "DuckDB database opened");
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self, DataError> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run one or more statements without parameters
    pub fn execute_batch(&self, sql: &str) -> Result<(), DataError> {
        self.conn.lock().execute_batch(sql)?;
        Ok(())
    }

    /// Query over `table` returning the given columns
    pub fn query<I, S>(&self, table: &str, columns: I) -> DuckdbQuery
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DuckdbQuery {
            conn: Arc::clone(&self.conn),
            sql: SqlQuery::table(Backend::Duckdb, table).select(columns),
        }
    }
}

/// Query bound to a DuckDB connection. Clones share the connection, never
/// the builder state.
#[derive(Clone)]
pub struct DuckdbQuery {
    conn: Arc<Mutex<Connection>>,
    sql: SqlQuery,
}

impl DuckdbQuery {
    pub fn sql(&self) -> &SqlQuery {
        &self.sql
    }

    fn query_scalar<T: duckdb::types::FromSql>(
        &self,
        statement: &SqlStatement,
    ) -> Result<T, DataError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&statement.sql)?;
        let params: Vec<&dyn duckdb::ToSql> = statement
            .params
            .iter()
            .map(|v| v as &dyn duckdb::ToSql)
            .collect();
        let value: T = stmt.query_row(params.as_slice(), |row| row.get(0))?;
        Ok(value)
    }
}

impl TableQuery for DuckdbQuery {
    type Row = JsonRow;

    fn filter(&mut self, group: PredicateGroup) {
        self.sql.filter(group);
    }

    fn order_by(&mut self, field: &str, direction: SortDirection) {
        self.sql.order_by(field, direction);
    }

    fn skip(&mut self, n: i64) {
        self.sql.skip(n);
    }

    fn limit(&mut self, n: i64) {
        self.sql.limit(n);
    }

    fn count(&self) -> Result<u64, DataError> {
        let count: i64 = self.query_scalar(&self.sql.to_count_sql())?;
        Ok(count.max(0) as u64)
    }

    fn sum(&self, field: &str) -> Result<f64, DataError> {
        self.query_scalar(&self.sql.to_sum_sql(field))
    }

    fn fetch(&self) -> Result<Vec<JsonRow>, DataError> {
        let columns = self.sql.selected_columns();
        if columns.is_empty() {
            return Err(DataError::InvalidQuery(
                "DuckDB queries need an explicit column list".to_string(),
            ));
        }

        let statement = self.sql.to_select_sql();
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&statement.sql)?;
        let params: Vec<&dyn duckdb::ToSql> = statement
            .params
            .iter()
            .map(|v| v as &dyn duckdb::ToSql)
            .collect();
        let mut query_rows = stmt.query(params.as_slice())?;
        let mut rows = vec![];

        while let Some(row) = query_rows.next()? {
            let mut record = JsonRow::new();
            for (idx, column) in columns.iter().enumerate() {
                let value: duckdb::types::Value = row.get(idx)?;
                record.insert(column.clone(), value_to_json(value));
            }
            rows.push(record);
        }

        Ok(rows)
    }
}
