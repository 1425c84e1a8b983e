use clap::{Args, Parser, Subcommand};

use std::path::PathBuf;

use serde_json::Value;

use super::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, ENV_TABLE};
use crate::paginator::RawTableRequest;

#[derive(Parser)]
#[command(name = "gridquery")]
#[command(version, about = "Filter, sort and paginate table data", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one paginated request and print the response as JSON
    Query(QueryArgs),
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Path to the table definition file
    #[arg(long, short = 't', env = ENV_TABLE)]
    pub table: PathBuf,

    /// Free text matched against every column
    #[arg(long, short = 'g')]
    pub global_filter: Option<String>,

    /// JSON array of {"id": ..., "value": ...}
    #[arg(long)]
    pub column_filters: Option<String>,

    /// JSON array of {"id": ..., "desc": bool}
    #[arg(long, short = 's')]
    pub sorting: Option<String>,

    /// Page number, starting at 1
    #[arg(long, default_value_t = DEFAULT_PAGE, allow_negative_numbers = true)]
    pub page: i64,

    /// Rows per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, allow_negative_numbers = true)]
    pub page_size: i64,

    /// Pretty-print the response
    #[arg(long)]
    pub pretty: bool,
}

impl QueryArgs {
    /// Request fields as a client would send them
    pub fn to_raw_request(&self) -> RawTableRequest {
        RawTableRequest {
            global_filter: self.global_filter.clone(),
            column_filters: self.column_filters.clone(),
            sorting: self.sorting.clone(),
            page: Some(Value::from(self.page)),
            page_size: Some(Value::from(self.page_size)),
        }
    }
}

/// Parse CLI arguments
pub fn parse() -> Cli {
    Cli::parse()
}
