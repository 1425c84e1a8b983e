//! Table query engine: column-typed filtering, sorting, pagination and
//! footer aggregation over pluggable query backends.

pub mod app;
pub mod core;
pub mod data;
pub mod paginator;
pub mod utils;
