//! Predicate definitions
//!
//! Backend-neutral comparisons produced by the paginator and consumed by
//! every `TableQuery` implementation.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::sql::escape_like_pattern;

/// Direction of an ordering clause
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_descending(descending: bool) -> Self {
        if descending { Self::Desc } else { Self::Asc }
    }

    pub fn is_descending(&self) -> bool {
        matches!(self, Self::Desc)
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// A single field comparison
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `field LIKE pattern`. `%` and `_` are wildcards, `\` escapes them.
    Like { field: String, pattern: String },
    /// Exact text equality
    TextEq { field: String, value: String },
    /// Numeric equality
    NumberEq { field: String, value: f64 },
    /// Equality on the date part of the field
    DateEq { field: String, value: NaiveDate },
}

impl Predicate {
    /// `field LIKE %text%` with `text` matched literally
    pub fn contains(field: impl Into<String>, text: &str) -> Self {
        Self::Like {
            field: field.into(),
            pattern: format!("%{}%", escape_like_pattern(text)),
        }
    }

    /// `field LIKE text%` with `text` matched literally
    pub fn starts_with(field: impl Into<String>, text: &str) -> Self {
        Self::Like {
            field: field.into(),
            pattern: format!("{}%", escape_like_pattern(text)),
        }
    }

    pub fn text_eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::TextEq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn number_eq(field: impl Into<String>, value: f64) -> Self {
        Self::NumberEq {
            field: field.into(),
            value,
        }
    }

    pub fn date_eq(field: impl Into<String>, value: NaiveDate) -> Self {
        Self::DateEq {
            field: field.into(),
            value,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Self::Like { field, .. } => field,
            Self::TextEq { field, .. } => field,
            Self::NumberEq { field, .. } => field,
            Self::DateEq { field, .. } => field,
        }
    }
}

/// Predicates joined with OR.
///
/// Groups added to the same query are joined with AND. An empty group does
/// not constrain the query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateGroup {
    predicates: Vec<Predicate>,
}

impl PredicateGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(predicate: Predicate) -> Self {
        Self {
            predicates: vec![predicate],
        }
    }

    pub fn or(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_escapes_wildcards() {
        let predicate = Predicate::contains("name", "50%_off");
        assert_eq!(
            predicate,
            Predicate::Like {
                field: "name".to_string(),
                pattern: r"%50\%\_off%".to_string(),
            }
        );
    }

    #[test]
    fn test_starts_with_appends_trailing_wildcard() {
        let predicate = Predicate::starts_with("code", "AB");
        assert_eq!(
            predicate,
            Predicate::Like {
                field: "code".to_string(),
                pattern: "AB%".to_string(),
            }
        );
        assert_eq!(predicate.field(), "code");
    }

    #[test]
    fn test_group_collects_predicates_in_order() {
        let group = PredicateGroup::single(Predicate::contains("name", "x"))
            .or(Predicate::number_eq("value", 1.0));
        assert_eq!(group.len(), 2);
        assert_eq!(group.predicates()[1].field(), "value");
        assert!(PredicateGroup::new().is_empty());
    }

    #[test]
    fn test_direction_from_flag() {
        assert_eq!(SortDirection::from_descending(true), SortDirection::Desc);
        assert!(!SortDirection::from_descending(false).is_descending());
        assert_eq!(SortDirection::Desc.to_string(), "desc");
    }
}
