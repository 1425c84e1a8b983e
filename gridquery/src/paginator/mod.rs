//! Table paginator
//!
//! Applies a client's global filter, column filters, sorting and page
//! window to a `TableQuery`, then assembles the page rows, the total count
//! and the footer into one response.

pub mod columns;
pub mod engine;
pub mod error;
pub mod filters;
pub mod footer;
pub mod request;
pub mod response;
pub mod sorting;


pub use columns::{ColumnDescriptor, ColumnRegistry, ColumnType, FooterFormat, FooterSpec};
pub use engine::Paginator;
pub use error::{PaginatorError, RegistryError, RequestError};
pub use footer::{CurrencyFormatter, EuroFormatter, Footer};
pub use request::{
    ColumnFilter, FilterRequest, PageRequest, RawTableRequest, SortColumn, TableRequest,
};
pub use response::ResponsePayload;
