//! Dashboard summary over the whole ledger

use serde::Serialize;

use crate::models::{Money, Transaction};

use super::series::{date_series, DailyPoint};
use super::summary::{totals, Totals};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub totals: Totals,
    pub balance: Money,
    pub series: Vec<DailyPoint>,
}

impl DashboardSummary {
    pub fn generate(transactions: &[Transaction], date_format: &str) -> Self {
        let totals = totals(transactions);
        Self {
            totals,
            balance: totals.balance(),
            series: date_series(transactions, date_format),
        }
    }

    /// Format the dashboard for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Dashboard\n");
        output.push_str(&"=".repeat(46));
        output.push('\n');
        output.push_str(&format!(
            "Total Income:   {}\n",
            self.totals.income.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Total Expenses: {}\n",
            self.totals.expenses.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Balance:        {}\n",
            self.balance.format_with_symbol(currency)
        ));

        if self.series.is_empty() {
            output.push_str("\nNo transactions yet.\n");
            return output;
        }

        output.push_str(&format!("\n{:<14} {:>14} {:>14}\n", "Date", "Income", "Expenses"));
        output.push_str(&"-".repeat(46));
        output.push('\n');
        for point in &self.series {
            output.push_str(&format!(
                "{:<14} {:>14} {:>14}\n",
                point.label,
                point.income.format_with_symbol(currency),
                point.expenses.format_with_symbol(currency)
            ));
        }

        output
    }
}
