//! Budget Overview Report
//!
//! One row per budget with its category, spend against limit, utilization
//! and status band.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{
    Budget, BudgetId, BudgetPeriod, BudgetStatus, Category, CategoryId, Money, Utilization,
    UNKNOWN_CATEGORY,
};

/// A row in the budget overview
#[derive(Debug, Clone, Serialize)]
pub struct BudgetRow {
    pub budget_id: BudgetId,
    pub name: String,
    /// Category name, or "Unknown" when the category was deleted
    pub category: String,
    pub period: BudgetPeriod,
    pub spent: Money,
    pub limit: Money,
    pub remaining: Money,
    #[serde(skip)]
    pub utilization: Utilization,
    /// Percentage of the limit used, absent when the limit is not positive
    pub utilization_percent: Option<f64>,
    pub status: BudgetStatus,
}

impl BudgetRow {
    pub fn is_over_limit(&self) -> bool {
        self.status == BudgetStatus::OverLimit
    }
}

/// Budget Overview Report
#[derive(Debug, Clone, Serialize)]
pub struct BudgetOverview {
    pub rows: Vec<BudgetRow>,
    pub total_limit: Money,
    pub total_spent: Money,
    pub warning_percent: u8,
}

impl BudgetOverview {
    pub fn generate(budgets: &[Budget], categories: &[Category], warning_percent: u8) -> Self {
        let names: HashMap<CategoryId, &str> = categories
            .iter()
            .map(|c| (c.id, c.name.as_str()))
            .collect();

        let rows: Vec<BudgetRow> = budgets
            .iter()
            .map(|b| BudgetRow {
                budget_id: b.id,
                name: b.name.clone(),
                category: names
                    .get(&b.category_id)
                    .copied()
                    .unwrap_or(UNKNOWN_CATEGORY)
                    .to_string(),
                period: b.period,
                spent: b.spent,
                limit: b.limit,
                remaining: b.remaining(),
                utilization: b.utilization(),
                utilization_percent: b.utilization().percent(),
                status: b.status(warning_percent),
            })
            .collect();

        Self {
            total_limit: rows.iter().map(|r| r.limit).sum(),
            total_spent: rows.iter().map(|r| r.spent).sum(),
            rows,
            warning_percent,
        }
    }

    pub fn over_limit_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_over_limit()).count()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        if self.rows.is_empty() {
            return "No budgets found.\n".to_string();
        }

        let mut output = String::new();
        output.push_str("Budget Overview\n");
        output.push_str(&"=".repeat(96));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:<16} {:<8} {:>12} {:>12} {:>12} {:>7}  {}\n",
            "Budget", "Category", "Period", "Spent", "Limit", "Remaining", "Used", "Status"
        ));
        output.push_str(&"-".repeat(96));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<20} {:<16} {:<8} {:>12} {:>12} {:>12} {:>7}  {}\n",
                row.name,
                row.category,
                row.period,
                row.spent.format_with_symbol(currency),
                row.limit.format_with_symbol(currency),
                row.remaining.format_with_symbol(currency),
                row.utilization.to_string(),
                row.status
            ));
        }

        output.push_str(&"-".repeat(96));
        output.push('\n');
        output.push_str(&format!(
            "{:<46} {:>12} {:>12}\n",
            "TOTAL",
            self.total_spent.format_with_symbol(currency),
            self.total_limit.format_with_symbol(currency)
        ));

        output
    }
}
