//! Budget repository
//!
//! Besides the usual insert/update/remove this owns `record_spend`, the only
//! operation that moves a budget's `spent` accumulator.

use std::sync::RwLock;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Budget, BudgetBreach, BudgetId, BudgetPatch, CategoryId, Money, NewBudget};

use super::{read, write};

/// Repository for budgets
#[derive(Default)]
pub struct BudgetRepository {
    data: RwLock<Vec<Budget>>,
}

impl BudgetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, new: NewBudget) -> ExpenseResult<Budget> {
        let budget = Budget::from_new(new);
        write(&self.data)?.push(budget.clone());
        Ok(budget)
    }

    pub fn remove(&self, id: BudgetId) -> ExpenseResult<bool> {
        let mut data = write(&self.data)?;
        let before = data.len();
        data.retain(|b| b.id != id);
        Ok(data.len() != before)
    }

    pub fn update(&self, id: BudgetId, patch: &BudgetPatch) -> ExpenseResult<Option<Budget>> {
        let mut data = write(&self.data)?;
        Ok(data.iter_mut().find(|b| b.id == id).map(|budget| {
            patch.apply_to(budget);
            budget.clone()
        }))
    }

    /// Add `amount` to every budget on `category_id`
    ///
    /// Returns one breach per budget left over its limit by this spend. A
    /// category without budgets yields nothing. If any matching total would
    /// overflow, no budget is changed.
    pub fn record_spend(
        &self,
        category_id: CategoryId,
        amount: Money,
    ) -> ExpenseResult<Vec<BudgetBreach>> {
        let mut data = write(&self.data)?;

        // Refuse the whole spend if any total would overflow
        let fits = data
            .iter()
            .filter(|b| b.category_id == category_id)
            .all(|b| b.spent.checked_add(amount).is_some());
        if !fits {
            return Err(ExpenseError::InvalidAmount(format!(
                "Spending {} would overflow a budget total",
                amount
            )));
        }

        let mut breaches = Vec::new();
        for budget in data.iter_mut().filter(|b| b.category_id == category_id) {
            if budget.add_spent(amount)? {
                breaches.push(BudgetBreach {
                    budget_id: budget.id,
                    budget_name: budget.name.clone(),
                    spent: budget.spent,
                    limit: budget.limit,
                });
            }
        }

        Ok(breaches)
    }

    pub fn get(&self, id: BudgetId) -> ExpenseResult<Option<Budget>> {
        Ok(read(&self.data)?.iter().find(|b| b.id == id).cloned())
    }

    pub fn get_by_name(&self, name: &str) -> ExpenseResult<Option<Budget>> {
        let name_lower = name.trim().to_lowercase();
        Ok(read(&self.data)?
            .iter()
            .find(|b| b.name.to_lowercase() == name_lower)
            .cloned())
    }

    pub fn get_by_category(&self, category_id: CategoryId) -> ExpenseResult<Vec<Budget>> {
        Ok(read(&self.data)?
            .iter()
            .filter(|b| b.category_id == category_id)
            .cloned()
            .collect())
    }

    pub fn get_all(&self) -> ExpenseResult<Vec<Budget>> {
        Ok(read(&self.data)?.clone())
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        Ok(read(&self.data)?.len())
    }
}
