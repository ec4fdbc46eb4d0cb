//! CSV Export functionality
//!
//! One row per transaction in the report, with the category resolved to a
//! display label.

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, CategoryId, UNCATEGORIZED};
use crate::reports::FinancialReport;

#[derive(Debug, Serialize)]
struct TransactionRecord<'a> {
    id: String,
    date: String,
    #[serde(rename = "type")]
    kind: String,
    account: &'static str,
    category: &'a str,
    amount: String,
    description: &'a str,
}

/// Export the report's transactions to CSV
pub fn export_transactions_csv<W: Write>(
    report: &FinancialReport,
    categories: &[Category],
    writer: &mut W,
) -> ExpenseResult<()> {
    let names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let mut csv_writer = csv::Writer::from_writer(writer);
    for txn in &report.transactions {
        let category = txn
            .category_id
            .and_then(|id| names.get(&id).copied())
            .unwrap_or(UNCATEGORIZED);

        csv_writer.serialize(TransactionRecord {
            id: txn.id.as_uuid().to_string(),
            date: txn.date.to_string(),
            kind: txn.kind.to_string(),
            account: txn.account.label(),
            category,
            amount: txn.amount.format_with_symbol(""),
            description: &txn.description,
        })?;
    }

    // An empty report still gets its header row
    if report.transactions.is_empty() {
        csv_writer.write_record([
            "id",
            "date",
            "type",
            "account",
            "category",
            "amount",
            "description",
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(())
}
