//! Budget service
//!
//! Validation on create/update, plus the only path that moves `spent`:
//! [`BudgetService::record_spend`]. Each breach it produces becomes a warning
//! notification.

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{
    Budget, BudgetBreach, BudgetId, BudgetPatch, BudgetValidationError, CategoryId, Money,
    NewBudget,
};
use crate::reports::BudgetOverview;
use crate::storage::Storage;

use super::NotificationService;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Create a budget with nothing spent
    pub fn create(&self, new: NewBudget) -> ExpenseResult<Budget> {
        let new = NewBudget {
            name: new.name.trim().to_string(),
            ..new
        };
        new.validate().map_err(budget_error)?;
        self.ensure_unique_name(&new.name, None)?;
        self.ensure_category(new.category_id)?;

        let budget = self.storage.budgets.insert(new)?;
        info!(
            budget = %budget.id,
            name = %budget.name,
            limit = %budget.limit,
            "Created budget"
        );
        Ok(budget)
    }

    /// Update name, limit, period or category. `spent` is never touched.
    pub fn update(&self, id: BudgetId, patch: BudgetPatch) -> ExpenseResult<Option<Budget>> {
        let patch = BudgetPatch {
            name: patch.name.map(|n| n.trim().to_string()),
            ..patch
        };
        if let Some(name) = &patch.name {
            if name.is_empty() {
                return Err(budget_error(BudgetValidationError::EmptyName));
            }
            self.ensure_unique_name(name, Some(id))?;
        }
        if let Some(limit) = patch.limit {
            if !limit.is_positive() {
                return Err(budget_error(BudgetValidationError::NonPositiveLimit(limit)));
            }
        }
        if let Some(category_id) = patch.category_id {
            self.ensure_category(category_id)?;
        }

        match self.storage.budgets.update(id, &patch)? {
            Some(budget) => {
                info!(budget = %budget.id, "Updated budget");
                Ok(Some(budget))
            }
            None => self.missing(id).map(|_| None),
        }
    }

    pub fn delete(&self, id: BudgetId) -> ExpenseResult<bool> {
        if self.storage.budgets.remove(id)? {
            info!(budget = %id, "Deleted budget");
            Ok(true)
        } else {
            self.missing(id).map(|_| false)
        }
    }

    /// Record a spend against every budget on `category_id`
    ///
    /// Each budget left over its limit raises a warning notification. The
    /// breaches are returned as well so callers can react directly.
    pub fn record_spend(
        &self,
        category_id: CategoryId,
        amount: Money,
    ) -> ExpenseResult<Vec<BudgetBreach>> {
        if amount.is_negative() {
            return Err(ExpenseError::InvalidAmount(format!(
                "Spend cannot be negative (got {})",
                amount
            )));
        }

        let breaches = self.storage.budgets.record_spend(category_id, amount)?;
        debug!(category = %category_id, amount = %amount, breaches = breaches.len(), "Recorded spend");

        let notifications = NotificationService::new(self.storage);
        for breach in &breaches {
            warn!(
                budget = %breach.budget_id,
                spent = %breach.spent,
                limit = %breach.limit,
                "{}",
                breach.message()
            );
            notifications.warn(breach.message())?;
        }

        Ok(breaches)
    }

    pub fn get(&self, id: BudgetId) -> ExpenseResult<Option<Budget>> {
        self.storage.budgets.get(id)
    }

    /// Find a budget by name or id string
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Budget>> {
        if let Some(budget) = self.storage.budgets.get_by_name(identifier)? {
            return Ok(Some(budget));
        }
        Ok(self
            .storage
            .budgets
            .get_all()?
            .into_iter()
            .find(|b| b.id.matches(identifier)))
    }

    pub fn resolve(&self, identifier: &str) -> ExpenseResult<Budget> {
        self.find(identifier)?
            .ok_or_else(|| ExpenseError::budget_not_found(identifier))
    }

    pub fn list(&self) -> ExpenseResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }

    pub fn list_for_category(&self, category_id: CategoryId) -> ExpenseResult<Vec<Budget>> {
        self.storage.budgets.get_by_category(category_id)
    }

    /// Status rows for every budget, using the configured warning band
    pub fn overview(&self) -> ExpenseResult<BudgetOverview> {
        Ok(BudgetOverview::generate(
            &self.storage.budgets.get_all()?,
            &self.storage.categories.get_all()?,
            self.settings.warning_threshold_percent,
        ))
    }

    fn ensure_unique_name(&self, name: &str, except: Option<BudgetId>) -> ExpenseResult<()> {
        if let Some(existing) = self.storage.budgets.get_by_name(name)? {
            if Some(existing.id) != except {
                return Err(ExpenseError::Duplicate {
                    entity_type: "Budget",
                    identifier: name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Strict mode refuses budgets on categories that do not exist
    fn ensure_category(&self, category_id: CategoryId) -> ExpenseResult<()> {
        if self.settings.strict_mode && self.storage.categories.get(category_id)?.is_none() {
            return Err(ExpenseError::category_not_found(category_id.to_string()));
        }
        Ok(())
    }

    fn missing(&self, id: BudgetId) -> ExpenseResult<()> {
        if self.settings.strict_mode {
            return Err(ExpenseError::budget_not_found(id.to_string()));
        }
        debug!(budget = %id, "Ignoring unknown budget id");
        Ok(())
    }
}

fn budget_error(err: BudgetValidationError) -> ExpenseError {
    match err {
        BudgetValidationError::NonPositiveLimit(_) => ExpenseError::InvalidAmount(err.to_string()),
        _ => ExpenseError::Validation(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetStatus, NewCategory, NotificationKind};

    fn setup() -> (Storage, CategoryId) {
        let storage = Storage::new();
        let food = storage.categories.insert(NewCategory::new("Food")).unwrap();
        (storage, food.id)
    }

    #[test]
    fn test_create_budget() {
        let (storage, food) = setup();
        let settings = Settings::default();
        let service = BudgetService::new(&storage, &settings);

        let budget = service
            .create(NewBudget::new(" Groceries ", Money::from_units(100), food))
            .unwrap();
        assert_eq!(budget.name, "Groceries");
        assert_eq!(budget.spent, Money::zero());
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_non_positive_limit_rejected() {
        let (storage, food) = setup();
        let settings = Settings::default();
        let service = BudgetService::new(&storage, &settings);

        let err = service
            .create(NewBudget::new("Zero", Money::zero(), food))
            .unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidAmount(_)));

        let budget = service
            .create(NewBudget::new("Food", Money::from_units(10), food))
            .unwrap();
        let patch = BudgetPatch {
            limit: Some(Money::from_units(-1)),
            ..Default::default()
        };
        assert!(service.update(budget.id, patch).unwrap_err().is_validation());
    }

    #[test]
    fn test_duplicate_budget_name() {
        let (storage, food) = setup();
        let settings = Settings::default();
        let service = BudgetService::new(&storage, &settings);

        service
            .create(NewBudget::new("Food", Money::from_units(10), food))
            .unwrap();
        assert!(matches!(
            service.create(NewBudget::new("FOOD", Money::from_units(20), food)),
            Err(ExpenseError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_breach_raises_one_notification() {
        let (storage, food) = setup();
        let settings = Settings::default();
        let service = BudgetService::new(&storage, &settings);
        service
            .create(NewBudget::new("Food", Money::from_units(100), food))
            .unwrap();

        let breaches = service.record_spend(food, Money::from_units(150)).unwrap();
        assert_eq!(breaches.len(), 1);

        let all = storage.notifications.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].message, "Budget limit exceeded for Food!");
        assert_eq!(all[0].kind, NotificationKind::Warning);
        assert!(!all[0].read);
    }

    #[test]
    fn test_spend_without_breach_is_quiet() {
        let (storage, food) = setup();
        let settings = Settings::default();
        let service = BudgetService::new(&storage, &settings);
        service
            .create(NewBudget::new("Food", Money::from_units(100), food))
            .unwrap();

        assert!(service
            .record_spend(food, Money::from_units(100))
            .unwrap()
            .is_empty());
        assert_eq!(storage.notifications.count().unwrap(), 0);

        // Every later spend while over the limit warns again
        service.record_spend(food, Money::from_cents(1)).unwrap();
        service.record_spend(food, Money::from_cents(1)).unwrap();
        assert_eq!(storage.notifications.count().unwrap(), 2);
    }

    #[test]
    fn test_negative_spend_rejected() {
        let (storage, food) = setup();
        let settings = Settings::default();
        let service = BudgetService::new(&storage, &settings);
        assert!(matches!(
            service.record_spend(food, Money::from_units(-5)),
            Err(ExpenseError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_spend_past_the_largest_total_is_rejected() {
        let (storage, food) = setup();
        let settings = Settings::default();
        let service = BudgetService::new(&storage, &settings);
        let budget = service
            .create(NewBudget::new("Food", Money::from_units(100), food))
            .unwrap();

        let max = Money::from_cents(i64::MAX);
        assert_eq!(service.record_spend(food, max).unwrap().len(), 1);
        assert!(matches!(
            service.record_spend(food, max),
            Err(ExpenseError::InvalidAmount(_))
        ));

        let stored = service.get(budget.id).unwrap().unwrap();
        assert_eq!(stored.spent, max);
        assert_eq!(storage.notifications.count().unwrap(), 1);
    }

    #[test]
    fn test_update_keeps_spent() {
        let (storage, food) = setup();
        let settings = Settings::default();
        let service = BudgetService::new(&storage, &settings);
        let budget = service
            .create(NewBudget::new("Food", Money::from_units(100), food))
            .unwrap();
        service.record_spend(food, Money::from_units(40)).unwrap();

        let patch = BudgetPatch {
            limit: Some(Money::from_units(200)),
            ..Default::default()
        };
        let updated = service.update(budget.id, patch).unwrap().unwrap();
        assert_eq!(updated.spent, Money::from_units(40));
        assert_eq!(updated.limit, Money::from_units(200));
    }

    #[test]
    fn test_strict_mode() {
        let (storage, _) = setup();
        let settings = Settings {
            strict_mode: true,
            ..Default::default()
        };
        let service = BudgetService::new(&storage, &settings);

        assert!(service.delete(BudgetId::new()).unwrap_err().is_not_found());
        assert!(service
            .create(NewBudget::new("Ghost", Money::from_units(1), CategoryId::new()))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_overview_uses_threshold() {
        let (storage, food) = setup();
        let settings = Settings {
            warning_threshold_percent: 50,
            ..Default::default()
        };
        let service = BudgetService::new(&storage, &settings);
        service
            .create(NewBudget::new("Food", Money::from_units(100), food))
            .unwrap();
        service.record_spend(food, Money::from_units(60)).unwrap();

        let overview = service.overview().unwrap();
        assert_eq!(overview.rows.len(), 1);
        assert_eq!(overview.rows[0].status, BudgetStatus::Warning);
        assert_eq!(overview.rows[0].category, "Food");
    }

    #[test]
    fn test_find_by_name_or_id() {
        let (storage, food) = setup();
        let settings = Settings::default();
        let service = BudgetService::new(&storage, &settings);
        let budget = service
            .create(NewBudget::new("Food", Money::from_units(100), food))
            .unwrap();

        assert_eq!(service.find("food").unwrap().unwrap().id, budget.id);
        assert_eq!(service.find(&budget.id.to_string()).unwrap().unwrap().id, budget.id);
        assert!(service.resolve("nope").unwrap_err().is_not_found());
    }
}
