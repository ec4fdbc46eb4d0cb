//! Export module for the expense tracker
//!
//! Writes a financial report out in one of three formats:
//! - CSV: the report's transactions, one row each (spreadsheet-compatible)
//! - JSON: the full report in a versioned envelope
//! - YAML: the same envelope, human-readable
//!
//! Exports are output only; nothing ever reads them back.

pub mod csv;
pub mod json;
pub mod yaml;

use std::io::Write;

use crate::error::ExpenseResult;
use crate::models::Category;
use crate::reports::FinancialReport;

pub use self::csv::export_transactions_csv;
pub use self::json::{export_report_json, ReportExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_report_yaml;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Full report as JSON
    Json,
    /// Transactions only
    Csv,
    /// Full report as YAML
    Yaml,
}

/// Write `report` to `writer` in `format`
pub fn export_report<W: Write>(
    report: &FinancialReport,
    categories: &[Category],
    format: ExportFormat,
    writer: &mut W,
) -> ExpenseResult<()> {
    match format {
        ExportFormat::Json => export_report_json(report, writer, true),
        ExportFormat::Csv => export_transactions_csv(report, categories, writer),
        ExportFormat::Yaml => export_report_yaml(report, writer),
    }
}
