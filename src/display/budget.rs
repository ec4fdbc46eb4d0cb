//! Budget display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::config::Settings;
use crate::models::Budget;
use crate::reports::BudgetOverview;

#[derive(Tabled)]
struct BudgetTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format the budget overview as a table
pub fn format_budget_list(overview: &BudgetOverview, settings: &Settings) -> String {
    if overview.rows.is_empty() {
        return "No budgets found.".to_string();
    }

    let symbol = &settings.currency_symbol;
    let rows = overview.rows.iter().map(|row| BudgetTableRow {
        id: row.budget_id.short(),
        name: row.name.clone(),
        category: row.category.clone(),
        period: row.period.to_string(),
        spent: row.spent.format_with_symbol(symbol),
        limit: row.limit.format_with_symbol(symbol),
        used: row.utilization.to_string(),
        status: row.status.to_string(),
    });

    Table::new(rows).with(Style::sharp()).to_string()
}

/// Format a single budget's details
pub fn format_budget_details(budget: &Budget, category_name: &str, settings: &Settings) -> String {
    let symbol = &settings.currency_symbol;
    let mut output = String::new();

    output.push_str(&format!("Budget: {}\n", budget.name));
    output.push_str(&format!("  ID:          {}\n", budget.id));
    output.push_str(&format!("  Category:    {}\n", category_name));
    output.push_str(&format!("  Period:      {}\n", budget.period));
    output.push_str(&format!(
        "  Limit:       {}\n",
        budget.limit.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Spent:       {}\n",
        budget.spent.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Remaining:   {}\n",
        budget.remaining().format_with_symbol(symbol)
    ));
    output.push_str(&format!("  Used:        {}\n", budget.utilization()));
    output.push_str(&format!(
        "  Status:      {}\n",
        budget.status(settings.warning_threshold_percent)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Money, NewBudget};

    fn food_budget(spent: i64) -> Budget {
        let mut budget = Budget::from_new(NewBudget::new(
            "Food",
            Money::from_units(100),
            CategoryId::new(),
        ));
        budget.add_spent(Money::from_units(spent)).unwrap();
        budget
    }

    #[test]
    fn test_list() {
        let overview = BudgetOverview::generate(&[food_budget(105)], &[], 80);
        let table = format_budget_list(&overview, &Settings::default());
        assert!(table.contains("Food"));
        assert!(table.contains("Unknown"));
        assert!(table.contains("105.0%"));
        assert!(table.contains("Over limit"));
    }

    #[test]
    fn test_details() {
        let text = format_budget_details(&food_budget(80), "Food", &Settings::default());
        assert!(text.contains("Remaining:   $20.00"));
        assert!(text.contains("Used:        80.0%"));
        assert!(text.contains("Status:      OK"));
    }
}
