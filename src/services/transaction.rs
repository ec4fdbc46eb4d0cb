//! Transaction service
//!
//! Provides business logic for transaction management: amount validation,
//! lookups by id, and the optional hand-off of new expenses to budgets.

use tracing::{debug, info};

use crate::config::{BudgetSync, Settings};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{
    BudgetBreach, CategoryId, Money, NewTransaction, Transaction, TransactionId, TransactionPatch,
};
use crate::reports::ReportFilter;
use crate::storage::Storage;

use super::BudgetService;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

/// A stored transaction plus any budget breaches recording it caused
#[derive(Debug, Clone)]
pub struct Recorded {
    pub transaction: Transaction,
    pub breaches: Vec<BudgetBreach>,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Record a new transaction
    ///
    /// With automatic budget sync an expense that has a category also counts
    /// against that category's budgets.
    pub fn create(&self, new: NewTransaction) -> ExpenseResult<Recorded> {
        validate_amount(new.amount)?;
        if let Some(category_id) = new.category_id {
            self.ensure_category(category_id)?;
        }
        let new = NewTransaction {
            description: new.description.trim().to_string(),
            ..new
        };

        let transaction = self.storage.transactions.insert(new)?;
        info!(
            transaction = %transaction.id,
            kind = %transaction.kind,
            amount = %transaction.amount,
            "Recorded transaction"
        );

        let breaches = match (self.settings.budget_sync, transaction.category_id) {
            (BudgetSync::Automatic, Some(category_id)) if transaction.is_expense() => {
                BudgetService::new(self.storage, self.settings)
                    .record_spend(category_id, transaction.amount)?
            }
            _ => Vec::new(),
        };

        Ok(Recorded {
            transaction,
            breaches,
        })
    }

    /// Shallow-merge `patch` into a transaction. Budgets are not adjusted.
    pub fn update(
        &self,
        id: TransactionId,
        patch: TransactionPatch,
    ) -> ExpenseResult<Option<Transaction>> {
        if let Some(amount) = patch.amount {
            validate_amount(amount)?;
        }
        if let Some(Some(category_id)) = patch.category_id {
            self.ensure_category(category_id)?;
        }
        let patch = TransactionPatch {
            description: patch.description.map(|d| d.trim().to_string()),
            ..patch
        };

        match self.storage.transactions.update(id, &patch)? {
            Some(txn) => {
                info!(transaction = %txn.id, "Updated transaction");
                Ok(Some(txn))
            }
            None => self.missing(id).map(|_| None),
        }
    }

    /// Delete a transaction. Budgets are not adjusted.
    pub fn delete(&self, id: TransactionId) -> ExpenseResult<bool> {
        if self.storage.transactions.remove(id)? {
            info!(transaction = %id, "Deleted transaction");
            Ok(true)
        } else {
            self.missing(id).map(|_| false)
        }
    }

    pub fn get(&self, id: TransactionId) -> ExpenseResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full or short id
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Transaction>> {
        Ok(self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .find(|t| t.id.matches(identifier)))
    }

    pub fn resolve(&self, identifier: &str) -> ExpenseResult<Transaction> {
        self.find(identifier)?
            .ok_or_else(|| ExpenseError::transaction_not_found(identifier))
    }

    pub fn list(&self) -> ExpenseResult<Vec<Transaction>> {
        self.storage.transactions.get_all()
    }

    pub fn list_filtered(&self, filter: &ReportFilter) -> ExpenseResult<Vec<Transaction>> {
        Ok(filter.apply(&self.storage.transactions.get_all()?))
    }

    fn ensure_category(&self, category_id: CategoryId) -> ExpenseResult<()> {
        if self.settings.strict_mode && self.storage.categories.get(category_id)?.is_none() {
            return Err(ExpenseError::category_not_found(category_id.to_string()));
        }
        Ok(())
    }

    fn missing(&self, id: TransactionId) -> ExpenseResult<()> {
        if self.settings.strict_mode {
            return Err(ExpenseError::transaction_not_found(id.to_string()));
        }
        debug!(transaction = %id, "Ignoring unknown transaction id");
        Ok(())
    }
}

fn validate_amount(amount: Money) -> ExpenseResult<()> {
    if amount.is_negative() {
        return Err(ExpenseError::InvalidAmount(format!(
            "Amount cannot be negative (got {})",
            amount
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewBudget, NewCategory};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn automatic() -> Settings {
        Settings {
            budget_sync: BudgetSync::Automatic,
            ..Default::default()
        }
    }

    fn setup_budget(storage: &Storage, limit: i64) -> CategoryId {
        let food = storage.categories.insert(NewCategory::new("Food")).unwrap();
        storage
            .budgets
            .insert(NewBudget::new("Food", Money::from_units(limit), food.id))
            .unwrap();
        food.id
    }

    #[test]
    fn test_create_transaction() {
        let storage = Storage::new();
        let settings = Settings::default();
        let service = TransactionService::new(&storage, &settings);

        let recorded = service
            .create(NewTransaction::income(date(1), Money::from_units(100)).with_description(" Pay "))
            .unwrap();
        assert_eq!(recorded.transaction.description, "Pay");
        assert!(recorded.breaches.is_empty());
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let storage = Storage::new();
        let settings = Settings::default();
        let service = TransactionService::new(&storage, &settings);

        let err = service
            .create(NewTransaction::expense(date(1), Money::from_units(-5)))
            .unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidAmount(_)));
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_manual_sync_leaves_budgets_alone() {
        let storage = Storage::new();
        let settings = Settings::default();
        let food = setup_budget(&storage, 10);
        let service = TransactionService::new(&storage, &settings);

        service
            .create(NewTransaction::expense(date(1), Money::from_units(50)).with_category(food))
            .unwrap();
        assert_eq!(storage.budgets.get_all().unwrap()[0].spent, Money::zero());
        assert_eq!(storage.notifications.count().unwrap(), 0);
    }

    #[test]
    fn test_automatic_sync_records_expense() {
        let storage = Storage::new();
        let settings = automatic();
        let food = setup_budget(&storage, 10);
        let service = TransactionService::new(&storage, &settings);

        let recorded = service
            .create(NewTransaction::expense(date(1), Money::from_units(50)).with_category(food))
            .unwrap();
        assert_eq!(recorded.breaches.len(), 1);
        assert_eq!(storage.budgets.get_all().unwrap()[0].spent, Money::from_units(50));
        assert_eq!(storage.notifications.count().unwrap(), 1);
    }

    #[test]
    fn test_automatic_sync_skips_income_and_uncategorized() {
        let storage = Storage::new();
        let settings = automatic();
        let food = setup_budget(&storage, 10);
        let service = TransactionService::new(&storage, &settings);

        service
            .create(NewTransaction::income(date(1), Money::from_units(50)).with_category(food))
            .unwrap();
        service
            .create(NewTransaction::expense(date(1), Money::from_units(50)))
            .unwrap();
        assert_eq!(storage.budgets.get_all().unwrap()[0].spent, Money::zero());
    }

    #[test]
    fn test_delete_does_not_refund_budget() {
        let storage = Storage::new();
        let settings = automatic();
        let food = setup_budget(&storage, 100);
        let service = TransactionService::new(&storage, &settings);

        let recorded = service
            .create(NewTransaction::expense(date(1), Money::from_units(30)).with_category(food))
            .unwrap();
        assert!(service.delete(recorded.transaction.id).unwrap());
        assert_eq!(storage.budgets.get_all().unwrap()[0].spent, Money::from_units(30));
    }

    #[test]
    fn test_update_preserves_position() {
        let storage = Storage::new();
        let settings = Settings::default();
        let service = TransactionService::new(&storage, &settings);

        let a = service
            .create(NewTransaction::expense(date(1), Money::from_units(1)))
            .unwrap()
            .transaction;
        service
            .create(NewTransaction::expense(date(2), Money::from_units(2)))
            .unwrap();

        let patch = TransactionPatch {
            amount: Some(Money::from_units(9)),
            ..Default::default()
        };
        service.update(a.id, patch).unwrap();

        let all = service.list().unwrap();
        assert_eq!(all[0].id, a.id);
        assert_eq!(all[0].amount, Money::from_units(9));
        assert_eq!(all[0].date, date(1));
    }

    #[test]
    fn test_unknown_ids() {
        let storage = Storage::new();
        let settings = Settings::default();
        let service = TransactionService::new(&storage, &settings);
        let ghost = TransactionId::new();
        assert!(!service.delete(ghost).unwrap());
        assert!(service.update(ghost, TransactionPatch::default()).unwrap().is_none());

        let strict = Settings {
            strict_mode: true,
            ..Default::default()
        };
        let service = TransactionService::new(&storage, &strict);
        assert!(service.delete(ghost).unwrap_err().is_not_found());
        assert!(service
            .create(NewTransaction::expense(date(1), Money::zero()).with_category(CategoryId::new()))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_find_by_short_id() {
        let storage = Storage::new();
        let settings = Settings::default();
        let service = TransactionService::new(&storage, &settings);
        let txn = service
            .create(NewTransaction::expense(date(1), Money::from_units(1)))
            .unwrap()
            .transaction;

        assert_eq!(service.find(&txn.id.short()).unwrap().unwrap().id, txn.id);
        assert_eq!(service.find(&txn.id.as_uuid().to_string()).unwrap().unwrap().id, txn.id);
        assert!(service.resolve("not-an-id").unwrap_err().is_not_found());
    }
}
