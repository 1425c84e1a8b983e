//! Footer aggregation
//!
//! Computes one cell per column that declares a footer: a static label or
//! the formatted sum of the column over the filtered rows.

use std::collections::BTreeMap;

use crate::data::error::DataError;
use crate::data::traits::TableQuery;
use crate::utils::numbers::{format_float, format_number, format_plain};

use super::columns::{ColumnRegistry, FooterFormat, FooterSpec};

/// Footer cells keyed by column id
pub type Footer = BTreeMap<String, String>;

/// Formats amounts for `currency` footers
pub trait CurrencyFormatter {
    fn format(&self, amount: f64) -> String;
}

impl<F> CurrencyFormatter for F
where
    F: Fn(f64) -> String,
{
    fn format(&self, amount: f64) -> String {
        self(amount)
    }
}

/// Euro amounts in European notation: `1.234,56 €`
#[derive(Debug, Clone, Copy, Default)]
pub struct EuroFormatter;

impl CurrencyFormatter for EuroFormatter {
    fn format(&self, amount: f64) -> String {
        format!("{} €", format_number(amount, 2, ",", "."))
    }
}

/// Render a sum with the column's format and postfix
pub fn format_sum(
    sum: f64,
    format: Option<FooterFormat>,
    postfix: Option<&str>,
    currency: &dyn CurrencyFormatter,
) -> String {
    let mut cell = match format {
        Some(FooterFormat::Currency) => currency.format(sum),
        Some(FooterFormat::Float) => format_float(sum),
        None => format_plain(sum),
    };
    if let Some(postfix) = postfix {
        cell.push_str(postfix);
    }
    cell
}

/// Build the footer from a filtered, unsorted, unpaginated query.
///
/// Every sum runs on its own clone of `filtered`.
pub fn build_footer<Q: TableQuery>(
    filtered: &Q,
    columns: &ColumnRegistry,
    currency: &dyn CurrencyFormatter,
) -> Result<Footer, DataError> {
    let mut footer = Footer::new();

    for column in columns.iter() {
        let Some(spec) = &column.footer else {
            continue;
        };

        let cell = match spec {
            FooterSpec::Label { value } => value.clone(),
            FooterSpec::Sum { format, postfix } => {
                let sum = filtered.clone().sum(&column.id)?;
                tracing::debug!(column = %column.id, sum, "Computed footer sum");
                format_sum(sum, *format, postfix.as_deref(), currency)
            }
        };
        footer.insert(column.id.clone(), cell);
    }

    Ok(footer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::MemoryTable;
    use crate::paginator::columns::ColumnDescriptor;
    use serde_json::json;

    fn table() -> MemoryTable {
        MemoryTable::from_json_str(
            &json!([
                {"id": 1, "name": "Alice", "value": 1000.5, "hours": 2},
                {"id": 2, "name": "Bob", "value": 234, "hours": 3},
            ])
            .to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_euro_formatting() {
        assert_eq!(EuroFormatter.format(1234.5), "1.234,50 €");
        assert_eq!(EuroFormatter.format(-3.0), "-3,00 €");
        assert_eq!(EuroFormatter.format(1234.005), "1.234,01 €");
    }

    #[test]
    fn test_sum_formats() {
        assert_eq!(
            format_sum(60.0, Some(FooterFormat::Float), Some(" pts"), &EuroFormatter),
            "60,00 pts"
        );
        assert_eq!(format_sum(60.0, None, None, &EuroFormatter), "60");
        assert_eq!(format_sum(12.5, None, Some(" h"), &EuroFormatter), "12.5 h");
        assert_eq!(
            format_sum(7.0, Some(FooterFormat::Currency), None, &|v: f64| format!("${:.2}", v)),
            "$7.00"
        );
    }

    #[test]
    fn test_only_columns_with_footers_appear() {
        let columns = ColumnRegistry::new(vec![
            ColumnDescriptor::string("name").with_footer(FooterSpec::label("Total")),
            ColumnDescriptor::number("value")
                .with_footer(FooterSpec::sum(Some(FooterFormat::Currency))),
            ColumnDescriptor::number("hours"),
        ])
        .unwrap();

        let footer = build_footer(&table().query(), &columns, &EuroFormatter).unwrap();

        assert_eq!(footer.len(), 2);
        assert_eq!(footer["name"], "Total");
        assert_eq!(footer["value"], "1.234,50 €");
        assert!(!footer.contains_key("hours"));
    }
}
