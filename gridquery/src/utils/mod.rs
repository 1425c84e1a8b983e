//! Shared helpers

pub mod numbers;
pub mod sql;
pub mod time;
