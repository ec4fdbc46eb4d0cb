//! Financial Report
//!
//! Filtered transactions with their totals and per-category and per-account
//! breakdowns. This is the document written by `export json|yaml`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Category, Transaction};

use super::filter::ReportFilter;
use super::summary::{by_account, by_category, totals, AccountTotal, LabeledTotal, Totals};

/// Financial Report
#[derive(Debug, Clone, Serialize)]
pub struct FinancialReport {
    pub generated_at: DateTime<Utc>,
    pub filter: ReportFilter,
    pub totals: Totals,
    pub by_category: Vec<LabeledTotal>,
    pub by_account: Vec<AccountTotal>,
    pub transactions: Vec<Transaction>,
}

impl FinancialReport {
    /// Generate the report over the transactions `filter` keeps
    pub fn generate(
        transactions: &[Transaction],
        categories: &[Category],
        filter: &ReportFilter,
    ) -> Self {
        let transactions = filter.apply(transactions);
        Self {
            generated_at: Utc::now(),
            filter: *filter,
            totals: totals(&transactions),
            by_category: by_category(&transactions, categories),
            by_account: by_account(&transactions),
            transactions,
        }
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Financial Report\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        let bound = |d: Option<chrono::NaiveDate>| {
            d.map(|d| d.to_string()).unwrap_or_else(|| "any".to_string())
        };
        output.push_str(&format!(
            "Period:        {} to {}\n",
            bound(self.filter.start),
            bound(self.filter.end)
        ));
        output.push_str(&format!("Transactions:  {}\n", self.transaction_count()));
        output.push_str(&format!(
            "Total Income:  {}\n",
            self.totals.income.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Total Expense: {}\n",
            self.totals.expenses.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Net Balance:   {}\n",
            self.totals.balance().format_with_symbol(currency)
        ));

        if !self.by_category.is_empty() {
            output.push_str(&format!("\n{:<30} {:>12} {:>6}\n", "Category", "Amount", "Count"));
            output.push_str(&"-".repeat(50));
            output.push('\n');
            for row in &self.by_category {
                output.push_str(&format!(
                    "{:<30} {:>12} {:>6}\n",
                    row.label,
                    row.amount.format_with_symbol(currency),
                    row.count
                ));
            }
        }

        if !self.by_account.is_empty() {
            output.push_str(&format!("\n{:<30} {:>12} {:>6}\n", "Account", "Amount", "Count"));
            output.push_str(&"-".repeat(50));
            output.push('\n');
            for row in &self.by_account {
                output.push_str(&format!(
                    "{:<30} {:>12} {:>6}\n",
                    row.account.label(),
                    row.amount.format_with_symbol(currency),
                    row.count
                ));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewCategory, NewTransaction};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    #[test]
    fn test_generate_applies_filter() {
        let food = Category::from_new(NewCategory::new("Food"));
        let ledger: Vec<_> = [
            NewTransaction::income(day(1), Money::from_units(100)),
            NewTransaction::expense(day(5), Money::from_units(30)).with_category(food.id),
            NewTransaction::expense(day(20), Money::from_units(20)),
        ]
        .into_iter()
        .map(Transaction::from_new)
        .collect();

        let filter = ReportFilter::new().start(day(1)).end(day(5));
        let report = FinancialReport::generate(&ledger, &[food], &filter);

        assert_eq!(report.transaction_count(), 2);
        assert_eq!(report.totals.income, Money::from_units(100));
        assert_eq!(report.totals.expenses, Money::from_units(30));
        assert_eq!(report.by_category[0].label, "Uncategorized");
        assert_eq!(report.by_category[1].label, "Food");
        assert_eq!(report.by_account.len(), 1);
    }

    #[test]
    fn test_format_terminal() {
        let ledger = vec![Transaction::from_new(NewTransaction::expense(
            day(2),
            Money::from_cents(1250),
        ))];
        let report = FinancialReport::generate(&ledger, &[], &ReportFilter::new());
        let text = report.format_terminal("$");

        assert!(text.contains("Period:        any to any"));
        assert!(text.contains("Total Expense: $12.50"));
        assert!(text.contains("Net Balance:   -$12.50"));
        assert!(text.contains("Uncategorized"));
    }
}
