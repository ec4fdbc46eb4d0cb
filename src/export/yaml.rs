//! YAML Export functionality

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::json::ReportExport;
use crate::reports::FinancialReport;

/// Export a report as YAML with a short header comment
pub fn export_report_yaml<W: Write>(report: &FinancialReport, writer: &mut W) -> ExpenseResult<()> {
    let export = ReportExport::new(report);

    writeln!(writer, "# Expense Tracker Report Export")
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    writeln!(writer, "# Transactions: {}", report.transaction_count())
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| ExpenseError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}
