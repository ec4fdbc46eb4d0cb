//! Budget model
//!
//! A budget caps spending in one category. `spent` is an accumulator: it only
//! grows through recorded spends and is never recomputed from the ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{BudgetId, CategoryId};
use super::money::Money;
use crate::error::{ExpenseError, ExpenseResult};

/// Default warning band, as a percentage of the limit
pub const DEFAULT_WARNING_PERCENT: u8 = 80;

/// How often a budget is meant to reset. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        };
        f.pad(s)
    }
}

impl FromStr for BudgetPeriod {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" | "annual" => Ok(Self::Yearly),
            other => Err(ExpenseError::Parse(format!(
                "Unknown budget period '{}' (expected weekly, monthly or yearly)",
                other
            ))),
        }
    }
}

/// spent / limit, or unbounded when there is no positive limit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Utilization {
    Ratio(f64),
    Unbounded,
}

impl Utilization {
    /// Percentage for display, `None` when unbounded
    pub fn percent(&self) -> Option<f64> {
        match self {
            Self::Ratio(r) => Some(r * 100.0),
            Self::Unbounded => None,
        }
    }
}

impl fmt::Display for Utilization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ratio(r) => f.pad(&format!("{:.1}%", r * 100.0)),
            Self::Unbounded => f.pad("∞"),
        }
    }
}

/// Display band for a budget's utilization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Normal,
    Warning,
    OverLimit,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Normal => "OK",
            Self::Warning => "Warning",
            Self::OverLimit => "Over limit",
        };
        f.pad(s)
    }
}

/// A spending limit for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub name: String,
    pub limit: Money,
    pub period: BudgetPeriod,
    /// May dangle after the category is deleted
    pub category_id: CategoryId,
    /// Accumulated spend
    pub spent: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Materialize a new budget with a fresh id and nothing spent
    pub fn from_new(new: NewBudget) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            name: new.name,
            limit: new.limit,
            period: new.period,
            category_id: new.category_id,
            spent: Money::zero(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add to the spent accumulator. Returns true when the result is over the limit.
    ///
    /// Fails with `InvalidAmount`, leaving the budget untouched, when the
    /// new total does not fit.
    pub fn add_spent(&mut self, amount: Money) -> ExpenseResult<bool> {
        self.spent = self.spent.checked_add(amount).ok_or_else(|| {
            ExpenseError::InvalidAmount(format!(
                "Spending {} would overflow the total of budget '{}'",
                amount, self.name
            ))
        })?;
        self.updated_at = Utc::now();
        Ok(self.is_over_limit())
    }

    pub fn is_over_limit(&self) -> bool {
        self.spent > self.limit
    }

    pub fn remaining(&self) -> Money {
        self.limit - self.spent
    }

    pub fn utilization(&self) -> Utilization {
        if !self.limit.is_positive() {
            return Utilization::Unbounded;
        }
        let ratio = self.spent.cents() as f64 / self.limit.cents() as f64;
        Utilization::Ratio(ratio.max(0.0))
    }

    /// Strict form of [`Budget::utilization`]
    pub fn utilization_ratio(&self) -> ExpenseResult<f64> {
        match self.utilization() {
            Utilization::Ratio(r) => Ok(r),
            Utilization::Unbounded => Err(ExpenseError::ZeroLimit(self.name.clone())),
        }
    }

    /// Classify against the warning band, in exact integer arithmetic
    pub fn status(&self, warning_percent: u8) -> BudgetStatus {
        if !self.limit.is_positive() {
            return BudgetStatus::OverLimit;
        }
        let spent = i128::from(self.spent.cents());
        let limit = i128::from(self.limit.cents());

        if spent * 100 <= limit * i128::from(warning_percent) {
            BudgetStatus::Normal
        } else if spent <= limit {
            BudgetStatus::Warning
        } else {
            BudgetStatus::OverLimit
        }
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        validate_fields(&self.name, self.limit)?;
        if self.spent.is_negative() {
            return Err(BudgetValidationError::NegativeSpent);
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} of {})", self.name, self.spent, self.limit)
    }
}

/// Input for creating a budget
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub name: String,
    pub limit: Money,
    pub period: BudgetPeriod,
    pub category_id: CategoryId,
}

impl NewBudget {
    pub fn new(name: impl Into<String>, limit: Money, category_id: CategoryId) -> Self {
        Self {
            name: name.into(),
            limit,
            period: BudgetPeriod::default(),
            category_id,
        }
    }

    pub fn with_period(mut self, period: BudgetPeriod) -> Self {
        self.period = period;
        self
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        validate_fields(&self.name, self.limit)
    }
}

/// Partial update. `spent` is deliberately absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetPatch {
    pub name: Option<String>,
    pub limit: Option<Money>,
    pub period: Option<BudgetPeriod>,
    pub category_id: Option<CategoryId>,
}

impl BudgetPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, budget: &mut Budget) {
        if let Some(name) = &self.name {
            budget.name = name.clone();
        }
        if let Some(limit) = self.limit {
            budget.limit = limit;
        }
        if let Some(period) = self.period {
            budget.period = period;
        }
        if let Some(category_id) = self.category_id {
            budget.category_id = category_id;
        }
        budget.updated_at = Utc::now();
    }
}

/// Raised when a recorded spend leaves a budget over its limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetBreach {
    pub budget_id: BudgetId,
    pub budget_name: String,
    pub spent: Money,
    pub limit: Money,
}

impl BudgetBreach {
    pub fn message(&self) -> String {
        format!("Budget limit exceeded for {}!", self.budget_name)
    }
}

fn validate_fields(name: &str, limit: Money) -> Result<(), BudgetValidationError> {
    if name.trim().is_empty() {
        return Err(BudgetValidationError::EmptyName);
    }
    if !limit.is_positive() {
        return Err(BudgetValidationError::NonPositiveLimit(limit));
    }
    Ok(())
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyName,
    NonPositiveLimit(Money),
    NegativeSpent,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Budget name cannot be empty"),
            Self::NonPositiveLimit(limit) => {
                write!(f, "Budget limit must be greater than zero (got {})", limit)
            }
            Self::NegativeSpent => write!(f, "Spent amount cannot be negative"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
