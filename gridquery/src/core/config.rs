//! Table definition file
//!
//! A JSON file declaring the columns of a table, its ordering defaults and
//! where its rows come from.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::constants::DEFAULT_PRIMARY_KEY;
use crate::data::predicate::SortDirection;
use crate::paginator::{ColumnDescriptor, ColumnRegistry};

/// Where table rows are read from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    /// JSON array of row objects
    Json { path: PathBuf },
    /// Table in a DuckDB database file
    Duckdb {
        path: PathBuf,
        table: String,
        select: Vec<String>,
    },
}

impl SourceConfig {
    pub fn path(&self) -> &Path {
        match self {
            Self::Json { path } | Self::Duckdb { path, .. } => path,
        }
    }

    fn path_mut(&mut self) -> &mut PathBuf {
        match self {
            Self::Json { path } | Self::Duckdb { path, .. } => path,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json { .. } => "json",
            Self::Duckdb { .. } => "duckdb",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_primary_key")]
    pub primary_key: String,
    #[serde(default)]
    pub default_direction: SortDirection,
    pub columns: Vec<ColumnDescriptor>,
    pub source: SourceConfig,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

fn default_primary_key() -> String {
    DEFAULT_PRIMARY_KEY.to_string()
}

impl TableConfig {
    /// Load a table definition. Relative source paths are resolved against
    /// the directory of the definition file.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading table definition");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read table file: {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse table file: {}", path.display()))?;

        config.warn_unknown_fields();
        if let Some(base_dir) = path.parent() {
            config.resolve_paths(base_dir);
        }
        config.validate()?;

        tracing::trace!(config = ?config, "Parsed table definition");
        Ok(config)
    }

    /// Validated column registry
    pub fn registry(&self) -> Result<ColumnRegistry> {
        ColumnRegistry::new(self.columns.clone()).context("Invalid column definitions")
    }

    fn resolve_paths(&mut self, base_dir: &Path) {
        let path = self.source.path_mut();
        if path.is_relative() {
            *path = base_dir.join(&*path);
        }
    }

    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in table file (possible typos)"
            );
        }
    }

    fn validate(&self) -> Result<()> {
        if self.primary_key.trim().is_empty() {
            anyhow::bail!("Configuration error: primary_key must not be empty");
        }
        if let SourceConfig::Duckdb { table, select, .. } = &self.source {
            if table.trim().is_empty() {
                anyhow::bail!("Configuration error: source.table must not be empty");
            }
            if select.is_empty() {
                anyhow::bail!("Configuration error: source.select must list at least one column");
            }
        }
        self.registry()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paginator::{ColumnType, FooterFormat, FooterSpec};
    use serde_json::json;

    fn write_table(dir: &Path, value: serde_json::Value) -> PathBuf {
        let path = dir.join("table.json");
        fs::write(&path, value.to_string()).unwrap();
        path
    }

    #[test]
    fn test_loads_json_source_relative_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(
            dir.path(),
            json!({
                "columns": [
                    {"id": "name", "type": "string"},
                    {
                        "id": "value",
                        "type": "number",
                        "footer": {"type": "sum", "format": "float", "postfix": " pts"}
                    }
                ],
                "source": {"type": "json", "path": "rows.json"}
            }),
        );

        let config = TableConfig::load(&path).unwrap();
        assert_eq!(config.primary_key, "id");
        assert_eq!(config.default_direction, SortDirection::Asc);
        assert_eq!(config.source.path(), dir.path().join("rows.json"));
        assert_eq!(config.source.as_str(), "json");

        let registry = config.registry().unwrap();
        assert_eq!(registry.len(), 2);
        let value = registry.find("value").unwrap();
        assert_eq!(value.kind, ColumnType::Number);
        assert_eq!(
            value.footer,
            Some(FooterSpec::sum(Some(FooterFormat::Float)).with_postfix(" pts"))
        );
    }

    #[test]
    fn test_loads_duckdb_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(
            dir.path(),
            json!({
                "primary_key": "uuid",
                "default_direction": "desc",
                "columns": [{"id": "name", "type": "string", "exact": true}],
                "source": {
                    "type": "duckdb",
                    "path": "/data/app.duckdb",
                    "table": "users",
                    "select": ["uuid", "name"]
                }
            }),
        );

        let config = TableConfig::load(&path).unwrap();
        assert_eq!(config.primary_key, "uuid");
        assert_eq!(config.default_direction, SortDirection::Desc);
        assert_eq!(
            config.source,
            SourceConfig::Duckdb {
                path: PathBuf::from("/data/app.duckdb"),
                table: "users".to_string(),
                select: vec!["uuid".to_string(), "name".to_string()],
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(
            dir.path(),
            json!({
                "columns": [{"id": "name", "type": "string"}, {"id": "name", "type": "number"}],
                "source": {"type": "json", "path": "rows.json"}
            }),
        );

        let err = TableConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("declared more than once"));
    }

    #[test]
    fn test_rejects_duckdb_source_without_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(
            dir.path(),
            json!({
                "columns": [],
                "source": {"type": "duckdb", "path": "db.duckdb", "table": "t", "select": []}
            }),
        );

        let err = TableConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("source.select"));
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = TableConfig::load(Path::new("/nonexistent/table.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read table file"));
    }

    #[test]
    fn test_unknown_fields_are_kept_aside() {
        let config: TableConfig = serde_json::from_value(json!({
            "columns": [],
            "source": {"type": "json", "path": "rows.json"},
            "primary_kye": "id"
        }))
        .unwrap();
        assert_eq!(config.extra["primary_kye"], json!("id"));
    }
}
