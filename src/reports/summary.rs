//! Ledger summaries
//!
//! Pure aggregations over a snapshot of transactions. Grouped results keep
//! the order in which each key was first seen in the input.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Account, Category, CategoryId, Money, Transaction, TransactionType, UNCATEGORIZED};

/// Income and expense totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Money,
    pub expenses: Money,
}

impl Totals {
    pub fn balance(&self) -> Money {
        self.income - self.expenses
    }

    fn add(&mut self, txn: &Transaction) {
        match txn.kind {
            TransactionType::Income => self.income += txn.amount,
            TransactionType::Expense => self.expenses += txn.amount,
        }
    }
}

/// Sum income and expenses across `transactions`
pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();
    for txn in transactions {
        totals.add(txn);
    }
    totals
}

/// Summed amount for one category label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledTotal {
    pub label: String,
    pub amount: Money,
    pub count: usize,
}

/// Summed amount for one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountTotal {
    pub account: Account,
    pub amount: Money,
    pub count: usize,
}

/// Sum amounts per category name
///
/// Income and expense amounts are added together, unsigned. Transactions
/// without a category, or whose category no longer exists, are grouped
/// under "Uncategorized".
pub fn by_category(transactions: &[Transaction], categories: &[Category]) -> Vec<LabeledTotal> {
    let names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let mut rows: Vec<LabeledTotal> = Vec::new();
    for txn in transactions {
        let label = txn
            .category_id
            .and_then(|id| names.get(&id).copied())
            .unwrap_or(UNCATEGORIZED);

        match rows.iter_mut().find(|r| r.label == label) {
            Some(row) => {
                row.amount += txn.amount;
                row.count += 1;
            }
            None => rows.push(LabeledTotal {
                label: label.to_string(),
                amount: txn.amount,
                count: 1,
            }),
        }
    }
    rows
}

/// Sum amounts per account, income and expense alike
pub fn by_account(transactions: &[Transaction]) -> Vec<AccountTotal> {
    let mut rows: Vec<AccountTotal> = Vec::new();
    for txn in transactions {
        match rows.iter_mut().find(|r| r.account == txn.account) {
            Some(row) => {
                row.amount += txn.amount;
                row.count += 1;
            }
            None => rows.push(AccountTotal {
                account: txn.account,
                amount: txn.amount,
                count: 1,
            }),
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewCategory, NewTransaction};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn txn(new: NewTransaction) -> Transaction {
        Transaction::from_new(new)
    }

    #[test]
    fn test_totals_and_balance() {
        let ledger = vec![
            txn(NewTransaction::income(date(), Money::from_units(100))),
            txn(NewTransaction::expense(date(), Money::from_units(30))),
            txn(NewTransaction::expense(date(), Money::from_units(20))),
        ];

        let totals = totals(&ledger);
        assert_eq!(totals.income, Money::from_units(100));
        assert_eq!(totals.expenses, Money::from_units(50));
        assert_eq!(totals.balance(), Money::from_units(50));
    }

    #[test]
    fn test_totals_are_exact_in_cents() {
        let ledger: Vec<_> = (0..10)
            .map(|_| txn(NewTransaction::expense(date(), Money::from_cents(10))))
            .collect();
        assert_eq!(totals(&ledger).expenses, Money::from_units(1));
        assert_eq!(totals(&[]).balance(), Money::zero());
    }

    #[test]
    fn test_by_category_with_dangling_reference() {
        let food = Category::from_new(NewCategory::new("Food"));
        let deleted = Category::from_new(NewCategory::new("Gone"));
        let ledger = vec![
            txn(NewTransaction::expense(date(), Money::from_units(10)).with_category(food.id)),
            txn(NewTransaction::expense(date(), Money::from_units(5)).with_category(deleted.id)),
            txn(NewTransaction::expense(date(), Money::from_units(7))),
            txn(NewTransaction::income(date(), Money::from_units(3)).with_category(food.id)),
        ];

        let rows = by_category(&ledger, &[food]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "Food");
        assert_eq!(rows[0].amount, Money::from_units(13));
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[1].label, "Uncategorized");
        assert_eq!(rows[1].amount, Money::from_units(12));
    }

    #[test]
    fn test_by_account_first_seen_order() {
        let ledger = vec![
            txn(NewTransaction::expense(date(), Money::from_units(1)).with_account(Account::Cash)),
            txn(NewTransaction::expense(date(), Money::from_units(2))),
            txn(NewTransaction::income(date(), Money::from_units(4)).with_account(Account::Cash)),
        ];

        let rows = by_account(&ledger);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].account, Account::Cash);
        assert_eq!(rows[0].amount, Money::from_units(5));
        assert_eq!(rows[1].account, Account::Bank);
    }
}
