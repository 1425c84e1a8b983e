//! Core application infrastructure

pub mod cli;
pub mod config;
pub mod constants;

pub use crate::app::CoreApp;
pub use cli::{Cli, Commands, QueryArgs};
pub use config::{SourceConfig, TableConfig};
