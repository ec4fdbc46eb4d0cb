//! Transaction display formatting

use std::collections::HashMap;

use tabled::{settings::Style, Table, Tabled};

use crate::config::Settings;
use crate::models::{Category, CategoryId, Transaction, UNCATEGORIZED};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Account")]
    account: &'static str,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
}

fn category_label(names: &HashMap<CategoryId, &str>, id: Option<CategoryId>) -> String {
    id.and_then(|id| names.get(&id).copied())
        .unwrap_or(UNCATEGORIZED)
        .to_string()
}

/// Format a list of transactions as a table
pub fn format_transaction_list(
    transactions: &[Transaction],
    categories: &[Category],
    settings: &Settings,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.short(),
        date: txn.date.format(&settings.date_format).to_string(),
        kind: txn.kind.to_string(),
        amount: txn.amount.format_with_symbol(&settings.currency_symbol),
        account: txn.account.label(),
        category: category_label(&names, txn.category_id),
        description: super::truncate(&txn.description, 40),
    });

    Table::new(rows).with(Style::sharp()).to_string()
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    category_name: &str,
    settings: &Settings,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!(
        "  Date:        {}\n",
        txn.date.format(&settings.date_format)
    ));
    output.push_str(&format!("  Type:        {}\n", txn.kind));
    output.push_str(&format!(
        "  Amount:      {}\n",
        txn.amount.format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!("  Account:     {}\n", txn.account));
    output.push_str(&format!("  Category:    {}\n", category_name));
    if !txn.description.is_empty() {
        output.push_str(&format!("  Description: {}\n", txn.description));
    }
    output.push_str(&format!("  UUID:        {}\n", txn.id.as_uuid()));
    output.push_str(&format!(
        "  Created:     {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M:%S")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, Money, NewCategory, NewTransaction};
    use chrono::NaiveDate;

    #[test]
    fn test_list_resolves_labels() {
        let food = Category::from_new(NewCategory::new("Food"));
        let date = NaiveDate::from_ymd_opt(2025, 5, 4).unwrap();
        let txns = vec![
            Transaction::from_new(
                NewTransaction::expense(date, Money::from_cents(995))
                    .with_category(food.id)
                    .with_account(Account::MobileMoney),
            ),
            Transaction::from_new(
                NewTransaction::expense(date, Money::from_units(1)).with_category(CategoryId::new()),
            ),
        ];

        let table = format_transaction_list(&txns, &[food], &Settings::default());
        assert!(table.contains("05/04/2025"));
        assert!(table.contains("$9.95"));
        assert!(table.contains("Mobile Money"));
        assert!(table.contains("Food"));
        assert!(table.contains("Uncategorized"));
        assert!(table.contains(&txns[0].id.short()));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(
            format_transaction_list(&[], &[], &Settings::default()),
            "No transactions found."
        );
    }

    #[test]
    fn test_details() {
        let txn = Transaction::from_new(
            NewTransaction::income(NaiveDate::from_ymd_opt(2025, 5, 4).unwrap(), Money::from_units(3))
                .with_description("Refund"),
        );
        let settings = Settings {
            currency_symbol: "€".into(),
            ..Default::default()
        };
        let text = format_transaction_details(&txn, "Uncategorized", &settings);
        assert!(text.contains("Amount:      €3.00"));
        assert!(text.contains("Description: Refund"));
    }
}
