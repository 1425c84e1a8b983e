//! Table request parsing
//!
//! Turns transport-level request fields into typed filter, sort and page
//! values. `columnFilters` and `sorting` arrive as JSON-encoded arrays.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::RequestError;

/// Request fields as received from a client
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTableRequest {
    #[serde(default)]
    pub global_filter: Option<String>,
    /// JSON array of `{ "id": ..., "value": ... }`
    #[serde(default)]
    pub column_filters: Option<String>,
    /// JSON array of `{ "id": ..., "desc": bool }`
    #[serde(default)]
    pub sorting: Option<String>,
    /// Integer or integer-like string
    #[serde(default)]
    pub page: Option<Value>,
    /// Integer or integer-like string
    #[serde(default)]
    pub page_size: Option<Value>,
}

/// Filter on a single column
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnFilter {
    pub id: String,
    #[serde(deserialize_with = "deserialize_filter_value")]
    pub value: String,
}

/// One requested ordering clause
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SortColumn {
    pub id: String,
    #[serde(default, rename = "desc")]
    pub descending: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRequest {
    pub global_filter: Option<String>,
    pub column_filters: Vec<ColumnFilter>,
}

/// Page window. Values are passed to the backend as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    /// Rows to skip: `(page - 1) * page_size`
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// Everything needed to build one response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRequest {
    pub filters: FilterRequest,
    pub sorting: Vec<SortColumn>,
    pub page: PageRequest,
}

impl TableRequest {
    pub fn new(page: PageRequest) -> Self {
        Self {
            filters: FilterRequest::default(),
            sorting: Vec::new(),
            page,
        }
    }

    pub fn with_global_filter(mut self, text: impl Into<String>) -> Self {
        self.filters.global_filter = Some(text.into());
        self
    }

    pub fn with_column_filter(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.column_filters.push(ColumnFilter {
            id: id.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_sort(mut self, id: impl Into<String>, descending: bool) -> Self {
        self.sorting.push(SortColumn {
            id: id.into(),
            descending,
        });
        self
    }

    /// Parse the raw request fields.
    ///
    /// Absent, empty or `null` filter/sort fields mean "none". Malformed
    /// JSON and missing or non-numeric page fields are errors.
    pub fn parse(raw: &RawTableRequest) -> Result<Self, RequestError> {
        let column_filters = parse_json_list("columnFilters", raw.column_filters.as_deref())?;
        let sorting = parse_json_list("sorting", raw.sorting.as_deref())?;
        let page = parse_integer("page", raw.page.as_ref())?;
        let page_size = parse_integer("pageSize", raw.page_size.as_ref())?;

        Ok(Self {
            filters: FilterRequest {
                global_filter: raw.global_filter.clone(),
                column_filters,
            },
            sorting,
            page: PageRequest::new(page, page_size),
        })
    }
}

impl TryFrom<&RawTableRequest> for TableRequest {
    type Error = RequestError;

    fn try_from(raw: &RawTableRequest) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

/// Filter values may be sent as strings, numbers or booleans
fn deserialize_filter_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

fn parse_json_list<T: DeserializeOwned>(
    param: &'static str,
    raw: Option<&str>,
) -> Result<Vec<T>, RequestError> {
    let Some(json) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(Vec::new());
    };

    let list: Option<Vec<T>> = serde_json::from_str(json)
        .map_err(|source| RequestError::InvalidJson { param, source })?;
    Ok(list.unwrap_or_default())
}

/// Integer or integer-like string; fractions are truncated
fn parse_integer(param: &'static str, value: Option<&Value>) -> Result<i64, RequestError> {
    let invalid = |message: String| RequestError::InvalidParam { param, message };

    match value {
        None | Some(Value::Null) => Err(invalid("is required".to_string())),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| invalid(format!("{} is not an integer", n))),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.trunc() as i64)
                })
                .ok_or_else(|| invalid(format!("'{}' is not an integer", s)))
        }
        Some(other) => Err(invalid(format!("{} is not an integer", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawTableRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parses_full_request() {
        let request = TableRequest::parse(&raw(json!({
            "globalFilter": "Bob",
            "columnFilters": r#"[{"id": "value", "value": 30}, {"id": "name", "value": "Al"}]"#,
            "sorting": r#"[{"id": "value", "desc": true}, {"id": "name"}]"#,
            "page": "2",
            "pageSize": 10,
        })))
        .unwrap();

        assert_eq!(request.filters.global_filter.as_deref(), Some("Bob"));
        assert_eq!(
            request.filters.column_filters,
            vec![
                ColumnFilter { id: "value".into(), value: "30".into() },
                ColumnFilter { id: "name".into(), value: "Al".into() },
            ]
        );
        assert_eq!(
            request.sorting,
            vec![
                SortColumn { id: "value".into(), descending: true },
                SortColumn { id: "name".into(), descending: false },
            ]
        );
        assert_eq!(request.page, PageRequest::new(2, 10));
        assert_eq!(request.page.offset(), 10);
    }

    #[test]
    fn test_absent_and_empty_lists_mean_none() {
        for lists in [
            json!({}),
            json!({"columnFilters": "", "sorting": "  "}),
            json!({"columnFilters": "null", "sorting": "[]"}),
        ] {
            let mut value = lists;
            value["page"] = json!(1);
            value["pageSize"] = json!(10);
            let request = TableRequest::parse(&raw(value)).unwrap();
            assert!(request.filters.column_filters.is_empty());
            assert!(request.sorting.is_empty());
        }
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = TableRequest::parse(&raw(json!({
            "sorting": "[{\"id\": ",
            "page": 1,
            "pageSize": 10,
        })))
        .unwrap_err();
        assert!(matches!(err, RequestError::InvalidJson { param: "sorting", .. }));
        assert_eq!(err.code(), "INVALID_REQUEST_JSON");
    }

    #[test]
    fn test_page_fields_are_integer_like() {
        let request = TableRequest::parse(&raw(json!({"page": "3.9", "pageSize": 2.5}))).unwrap();
        assert_eq!(request.page, PageRequest::new(3, 2));

        let request = TableRequest::parse(&raw(json!({"page": 0, "pageSize": "-5"}))).unwrap();
        assert_eq!(request.page, PageRequest::new(0, -5));
        assert_eq!(request.page.offset(), 5);
    }

    #[test]
    fn test_page_fields_are_required() {
        let err = TableRequest::parse(&raw(json!({"pageSize": 10}))).unwrap_err();
        assert!(matches!(err, RequestError::InvalidParam { param: "page", .. }));

        let err = TableRequest::try_from(&raw(json!({"page": 1, "pageSize": "ten"}))).unwrap_err();
        assert!(matches!(err, RequestError::InvalidParam { param: "pageSize", .. }));
    }

    #[test]
    fn test_builder_helpers() {
        let request = TableRequest::new(PageRequest::new(1, 25))
            .with_global_filter("x")
            .with_column_filter("name", "A")
            .with_sort("name", false);
        assert_eq!(request.filters.column_filters.len(), 1);
        assert_eq!(request.sorting[0].id, "name");
        assert_eq!(request.page.offset(), 0);
    }
}
