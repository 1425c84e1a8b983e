//! Column registry
//!
//! Declares which fields a paginator can filter and how their footers are
//! computed. The registry is validated once when it is built.

use std::collections::HashSet;

use serde::Deserialize;

use super::error::RegistryError;

/// Type-specific filtering behaviour of a column
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnType {
    /// Text column. Column filters use a prefix match unless `exact` is set.
    String {
        #[serde(default)]
        exact: bool,
    },
    Number,
    Date,
}

/// Number format applied to a summed footer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterFormat {
    Currency,
    Float,
}

/// Footer cell of a column
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FooterSpec {
    /// Static text
    Label { value: String },
    /// Sum of the column over the filtered rows
    Sum {
        #[serde(default)]
        format: Option<FooterFormat>,
        #[serde(default)]
        postfix: Option<String>,
    },
}

impl FooterSpec {
    pub fn label(value: impl Into<String>) -> Self {
        Self::Label {
            value: value.into(),
        }
    }

    pub fn sum(format: Option<FooterFormat>) -> Self {
        Self::Sum {
            format,
            postfix: None,
        }
    }

    /// Text appended to a formatted sum. Labels are left unchanged.
    pub fn with_postfix(self, postfix: impl Into<String>) -> Self {
        match self {
            Self::Sum { format, .. } => Self::Sum {
                format,
                postfix: Some(postfix.into()),
            },
            label => label,
        }
    }
}

/// One filterable column
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnDescriptor {
    pub id: String,
    #[serde(flatten)]
    pub kind: ColumnType,
    #[serde(default)]
    pub footer: Option<FooterSpec>,
}

impl ColumnDescriptor {
    fn new(id: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            id: id.into(),
            kind,
            footer: None,
        }
    }

    /// Text column filtered by prefix
    pub fn string(id: impl Into<String>) -> Self {
        Self::new(id, ColumnType::String { exact: false })
    }

    /// Text column filtered by equality
    pub fn exact_string(id: impl Into<String>) -> Self {
        Self::new(id, ColumnType::String { exact: true })
    }

    pub fn number(id: impl Into<String>) -> Self {
        Self::new(id, ColumnType::Number)
    }

    pub fn date(id: impl Into<String>) -> Self {
        Self::new(id, ColumnType::Date)
    }

    pub fn with_footer(mut self, footer: FooterSpec) -> Self {
        self.footer = Some(footer);
        self
    }
}

/// Ordered, validated set of columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRegistry {
    columns: Vec<ColumnDescriptor>,
}

impl ColumnRegistry {
    /// Build a registry, rejecting empty and duplicate ids
    pub fn new(columns: Vec<ColumnDescriptor>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for (position, column) in columns.iter().enumerate() {
            if column.id.trim().is_empty() {
                return Err(RegistryError::EmptyId { position });
            }
            if !seen.insert(column.id.as_str()) {
                return Err(RegistryError::DuplicateId(column.id.clone()));
            }
        }
        Ok(Self { columns })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter()
    }

    /// First column with the given id, in registry order
    pub fn find(&self, id: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| column.id == id)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
