//! In-memory table backend
//!
//! Evaluates predicate groups over JSON object rows. Used for file-backed
//! tables and as the reference backend in tests.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;

use crate::data::error::DataError;
use crate::data::predicate::{Predicate, PredicateGroup, SortDirection};
use crate::data::traits::{QueryState, TableQuery};
use crate::utils::numbers::parse_numeric;

/// A row as stored by the in-memory backend
pub type JsonRow = serde_json::Map<String, Value>;

/// Immutable row set shared by every query built from it
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    rows: Arc<Vec<JsonRow>>,
}

impl MemoryTable {
    pub fn new(rows: Vec<JsonRow>) -> Self {
        Self {
            rows: Arc::new(rows),
        }
    }

    /// Parse a JSON array of objects
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let values: Vec<Value> = serde_json::from_str(json)?;
        let rows = values
            .into_iter()
            .enumerate()
            .map(|(position, value)| match value {
                Value::Object(row) => Ok(row),
                _ => Err(DataError::InvalidRow { position }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rows))
    }

    pub fn from_path(path: &Path) -> Result<Self, DataError> {
        let content = fs::read_to_string(path)?;
        let table = Self::from_json_str(&content)?;
        tracing::debug!(path = %path.display(), rows = table.len(), "Loaded rows");
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Unfiltered query over all rows
    pub fn query(&self) -> MemoryQuery {
        MemoryQuery {
            rows: Arc::clone(&self.rows),
            state: QueryState::default(),
        }
    }
}

/// Query over a `MemoryTable`. Cloning copies the builder state and shares
/// the (read-only) rows.
#[derive(Debug, Clone)]
pub struct MemoryQuery {
    rows: Arc<Vec<JsonRow>>,
    state: QueryState,
}

impl MemoryQuery {
    /// Builder state accumulated so far
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    fn matching(&self) -> impl Iterator<Item = &JsonRow> {
        self.rows
            .iter()
            .filter(|row| self.state.groups.iter().all(|group| group_matches(group, row)))
    }
}

impl TableQuery for MemoryQuery {
    type Row = JsonRow;

    fn filter(&mut self, group: PredicateGroup) {
        self.state.filter(group);
    }

    fn order_by(&mut self, field: &str, direction: SortDirection) {
        self.state.order_by(field, direction);
    }

    fn skip(&mut self, n: i64) {
        self.state.skip(n);
    }

    fn limit(&mut self, n: i64) {
        self.state.limit(n);
    }

    fn count(&self) -> Result<u64, DataError> {
        Ok(self.matching().count() as u64)
    }

    fn sum(&self, field: &str) -> Result<f64, DataError> {
        Ok(self
            .matching()
            .filter_map(|row| row.get(field).and_then(numeric_value))
            .sum())
    }

    fn fetch(&self) -> Result<Vec<JsonRow>, DataError> {
        let mut rows: Vec<&JsonRow> = self.matching().collect();

        // Stable sort keeps insertion order for rows equal on every key
        rows.sort_by(|a, b| {
            self.state
                .order
                .iter()
                .map(|(field, direction)| {
                    let ordering = compare_values(a.get(field), b.get(field));
                    match direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                })
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });

        let offset = usize::try_from(self.state.offset).unwrap_or(usize::MAX);
        let limit = self
            .state
            .limit
            .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);

        Ok(rows.into_iter().skip(offset).take(limit).cloned().collect())
    }
}

fn group_matches(group: &PredicateGroup, row: &JsonRow) -> bool {
    group.is_empty()
        || group
            .predicates()
            .iter()
            .any(|predicate| predicate_matches(predicate, row))
}

fn predicate_matches(predicate: &Predicate, row: &JsonRow) -> bool {
    let Some(value) = row.get(predicate.field()) else {
        return false;
    };

    match predicate {
        Predicate::Like { pattern, .. } => {
            text_value(value).is_some_and(|text| like_matches(&text, pattern))
        }
        Predicate::TextEq { value: expected, .. } => {
            text_value(value).is_some_and(|text| text == *expected)
        }
        Predicate::NumberEq { value: expected, .. } => {
            numeric_value(value).is_some_and(|n| n == *expected)
        }
        Predicate::DateEq { value: expected, .. } => {
            date_value(value).is_some_and(|date| date == *expected)
        }
    }
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric(s),
        _ => None,
    }
}

/// Date part of a stored `YYYY-MM-DD...` value
fn date_value(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?;
    let date_part = text.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[derive(Debug, PartialEq)]
enum LikeToken {
    AnyRun,
    AnyOne,
    Literal(char),
}

fn like_tokens(pattern: &str) -> Vec<LikeToken> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => tokens.push(LikeToken::AnyRun),
            '_' => tokens.push(LikeToken::AnyOne),
            '\\' => {
                let escaped = chars.next().unwrap_or('\\');
                tokens.extend(escaped.to_lowercase().map(LikeToken::Literal));
            }
            other => tokens.extend(other.to_lowercase().map(LikeToken::Literal)),
        }
    }
    tokens
}

/// Case-insensitive SQL LIKE with `\` as escape character
fn like_matches(value: &str, pattern: &str) -> bool {
    let tokens = like_tokens(pattern);
    let chars: Vec<char> = value.chars().flat_map(char::to_lowercase).collect();

    let (mut t, mut v) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while v < chars.len() {
        match tokens.get(t) {
            Some(LikeToken::AnyOne) => {
                t += 1;
                v += 1;
            }
            Some(LikeToken::Literal(c)) if *c == chars[v] => {
                t += 1;
                v += 1;
            }
            Some(LikeToken::AnyRun) => {
                backtrack = Some((t, v));
                t += 1;
            }
            _ => match backtrack {
                Some((run_t, run_v)) => {
                    t = run_t + 1;
                    v = run_v + 1;
                    backtrack = Some((run_t, run_v + 1));
                }
                None => return false,
            },
        }
    }

    tokens[t.min(tokens.len())..]
        .iter()
        .all(|token| *token == LikeToken::AnyRun)
}

/// Ordering rules: missing = null < bool < number < string
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.unwrap_or(&Value::Null);
    let b = b.unwrap_or(&Value::Null);

    let type_order = |v: &Value| -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    };

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => type_order(a).cmp(&type_order(b)),
    }
}
