//! JSON Export functionality
//!
//! Writes a financial report inside a small versioned envelope.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::FinancialReport;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Envelope around an exported report
#[derive(Debug, Clone, Serialize)]
pub struct ReportExport<'a> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: &'static str,

    pub report: &'a FinancialReport,
}

impl<'a> ReportExport<'a> {
    pub fn new(report: &'a FinancialReport) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            report,
        }
    }
}

/// Export a report as JSON
pub fn export_report_json<W: Write>(
    report: &FinancialReport,
    writer: &mut W,
    pretty: bool,
) -> ExpenseResult<()> {
    let export = ReportExport::new(report);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| ExpenseError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewTransaction, Transaction};
    use crate::reports::ReportFilter;
    use chrono::NaiveDate;

    #[test]
    fn test_export_json() {
        let ledger = vec![Transaction::from_new(NewTransaction::income(
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            Money::from_cents(12345),
        ))];
        let report = FinancialReport::generate(&ledger, &[], &ReportFilter::new());

        let mut output = Vec::new();
        export_report_json(&report, &mut output, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["report"]["totals"]["income"], 12345);
        assert_eq!(value["report"]["transactions"][0]["type"], "Income");
        assert_eq!(value["report"]["by_category"][0]["label"], "Uncategorized");
    }
}
