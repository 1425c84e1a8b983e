//! Core application

use anyhow::{Context, Result};
use serde_json::Value;

use crate::core::cli::{self, Commands, QueryArgs};
use crate::core::config::{SourceConfig, TableConfig};
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::data::memory::{JsonRow, MemoryTable};
use crate::data::traits::TableQuery;
use crate::paginator::{Paginator, RawTableRequest, ResponsePayload};

pub struct CoreApp;

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub fn run() -> Result<()> {
        Self::init_logging();

        let cli = cli::parse();
        tracing::trace!(command = ?cli.command, "Parsed command");

        match cli.command {
            Commands::Query(args) => Self::query(&args),
        }
    }

    fn init_logging() {
        let default_filter = format!("warn,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    fn query(args: &QueryArgs) -> Result<()> {
        let config = TableConfig::load(&args.table)?;
        let raw = args.to_raw_request();

        tracing::info!(
            table = %args.table.display(),
            source = config.source.as_str(),
            "Running query"
        );

        let response = match &config.source {
            SourceConfig::Json { path } => {
                let table = MemoryTable::from_path(path)
                    .with_context(|| format!("Failed to load rows: {}", path.display()))?;
                Self::respond(&config, table.query(), &raw)?
            }
            SourceConfig::Duckdb { path, table, select } => {
                Self::query_duckdb(&config, path, table, select, &raw)?
            }
        };

        let output = if args.pretty {
            serde_json::to_string_pretty(&response)?
        } else {
            serde_json::to_string(&response)?
        };
        println!("{}", output);
        Ok(())
    }

    #[cfg(feature = "duckdb")]
    fn query_duckdb(
        config: &TableConfig,
        path: &std::path::Path,
        table: &str,
        select: &[String],
        raw: &RawTableRequest,
    ) -> Result<ResponsePayload<Value>> {
        use crate::data::duckdb::DuckdbDatabase;

        let db = DuckdbDatabase::open(path)
            .with_context(|| format!("Failed to open DuckDB database: {}", path.display()))?;
        Self::respond(config, db.query(table, select.iter().cloned()), raw)
    }

    #[cfg(not(feature = "duckdb"))]
    fn query_duckdb(
        _config: &TableConfig,
        _path: &std::path::Path,
        _table: &str,
        _select: &[String],
        _raw: &RawTableRequest,
    ) -> Result<ResponsePayload<Value>> {
        anyhow::bail!("DuckDB sources need the 'duckdb' feature")
    }

    fn respond<Q>(
        config: &TableConfig,
        base_query: Q,
        raw: &RawTableRequest,
    ) -> Result<ResponsePayload<Value>>
    where
        Q: TableQuery<Row = JsonRow>,
    {
        let paginator = Paginator::new(config.registry()?, base_query, Value::Object)
            .with_primary_key(config.primary_key.as_str())
            .with_default_direction(config.default_direction);

        let response = paginator.response_from_raw(raw)?;
        tracing::debug!(total = response.total, rows = response.data.len(), "Query finished");
        Ok(response)
    }
}
