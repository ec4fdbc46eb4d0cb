//! Date-bucketed income/expense series

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Money, Transaction, TransactionType};

/// One bucket of the series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    /// Bucket key: the transaction date rendered with the configured format
    pub label: String,
    /// Date of the first transaction seen in this bucket
    pub date: NaiveDate,
    pub income: Money,
    pub expenses: Money,
}

/// Bucket transactions by their formatted date, in first-seen order
///
/// Two dates that format to the same label (e.g. with a month-only format)
/// share a bucket.
pub fn date_series(transactions: &[Transaction], date_format: &str) -> Vec<DailyPoint> {
    let mut points: Vec<DailyPoint> = Vec::new();
    for txn in transactions {
        let label = txn.date.format(date_format).to_string();
        let idx = match points.iter().position(|p| p.label == label) {
            Some(idx) => idx,
            None => {
                points.push(DailyPoint {
                    label,
                    date: txn.date,
                    income: Money::zero(),
                    expenses: Money::zero(),
                });
                points.len() - 1
            }
        };
        let point = &mut points[idx];
        match txn.kind {
            TransactionType::Income => point.income += txn.amount,
            TransactionType::Expense => point.expenses += txn.amount,
        }
    }
    points
}
