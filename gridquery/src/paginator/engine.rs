//! Query orchestration
//!
//! A `Paginator` owns the column registry, a base query and a row mapper.
//! Every entry point clones the base query before touching it, so one
//! paginator can serve any number of requests.

use crate::core::constants::DEFAULT_PRIMARY_KEY;
use crate::data::error::DataError;
use crate::data::predicate::SortDirection;
use crate::data::traits::TableQuery;

use super::columns::ColumnRegistry;
use super::error::PaginatorError;
use super::filters::{apply_column_filters, apply_global_filter};
use super::footer::{self, CurrencyFormatter, EuroFormatter, Footer};
use super::request::{FilterRequest, RawTableRequest, TableRequest};
use super::response::ResponsePayload;
use super::sorting::apply_sorting;

pub struct Paginator<Q, M> {
    columns: ColumnRegistry,
    base_query: Q,
    row_mapper: M,
    primary_key: String,
    default_direction: SortDirection,
    currency: Box<dyn CurrencyFormatter>,
}

impl<Q, M> Paginator<Q, M>
where
    Q: TableQuery,
{
    pub fn new(columns: ColumnRegistry, base_query: Q, row_mapper: M) -> Self {
        Self {
            columns,
            base_query,
            row_mapper,
            primary_key: DEFAULT_PRIMARY_KEY.to_string(),
            default_direction: SortDirection::Asc,
            currency: Box::new(EuroFormatter),
        }
    }

    /// Column used as the final ordering tiebreak
    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = primary_key.into();
        self
    }

    pub fn with_default_direction(mut self, direction: SortDirection) -> Self {
        self.default_direction = direction;
        self
    }

    pub fn with_currency_formatter(mut self, formatter: impl CurrencyFormatter + 'static) -> Self {
        self.currency = Box::new(formatter);
        self
    }

    pub fn columns(&self) -> &ColumnRegistry {
        &self.columns
    }

    /// Clone of the base query with the global and column filters applied
    pub fn build_filtered_query(&self, filters: &FilterRequest) -> Q {
        let mut query = self.base_query.clone();
        if let Some(text) = filters.global_filter.as_deref() {
            apply_global_filter(&mut query, text, &self.columns);
        }
        apply_column_filters(&mut query, &filters.column_filters, &self.columns);
        query
    }

    /// Filtered and sorted query without a page window
    pub fn build_query(&self, request: &TableRequest) -> Q {
        let mut query = self.build_filtered_query(&request.filters);
        apply_sorting(
            &mut query,
            &request.sorting,
            &self.primary_key,
            self.default_direction,
        );
        query
    }

    /// Raw rows of the requested page
    pub fn build_page(&self, request: &TableRequest) -> Result<Vec<Q::Row>, DataError> {
        let mut query = self.build_query(request);
        query.skip(request.page.offset());
        query.limit(request.page.page_size);

        tracing::debug!(
            page = request.page.page,
            page_size = request.page.page_size,
            "Fetching page"
        );
        query.fetch()
    }

    /// Number of rows matching the filters, ignoring pagination
    pub fn count_total(&self, filters: &FilterRequest) -> Result<u64, DataError> {
        self.build_filtered_query(filters).count()
    }

    pub fn build_footer(&self, filters: &FilterRequest) -> Result<Footer, DataError> {
        let filtered = self.build_filtered_query(filters);
        footer::build_footer(&filtered, &self.columns, self.currency.as_ref())
    }

    /// Mapped page rows, total, echoed page values and footer
    pub fn response<O>(&self, request: &TableRequest) -> Result<ResponsePayload<O>, DataError>
    where
        M: Fn(Q::Row) -> O,
    {
        let data = self
            .build_page(request)?
            .into_iter()
            .map(&self.row_mapper)
            .collect();
        let total = self.count_total(&request.filters)?;
        let footer = self.build_footer(&request.filters)?;

        Ok(ResponsePayload {
            data,
            total,
            page: request.page.page,
            page_size: request.page.page_size,
            footer,
        })
    }

    /// Parse transport-level fields, then build the response
    pub fn response_from_raw<O>(
        &self,
        raw: &RawTableRequest,
    ) -> Result<ResponsePayload<O>, PaginatorError>
    where
        M: Fn(Q::Row) -> O,
    {
        let request = TableRequest::parse(raw)?;
        Ok(self.response(&request)?)
    }
}
