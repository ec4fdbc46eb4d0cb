//! Core data models for the expense tracker
//!
//! Transactions, categories with their subcategories, budgets and
//! notifications, plus the input and patch shapes used to create and
//! update them.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod notification;
pub mod transaction;

pub use budget::{
    Budget, BudgetBreach, BudgetPatch, BudgetPeriod, BudgetStatus, BudgetValidationError, NewBudget,
    Utilization, DEFAULT_WARNING_PERCENT,
};
pub use category::{
    Category, CategoryPatch, CategoryValidationError, NewCategory, NewSubcategory, Subcategory,
    UNCATEGORIZED, UNKNOWN_CATEGORY,
};
pub use ids::{BudgetId, CategoryId, NotificationId, SubcategoryId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use notification::{Notification, NotificationKind};
pub use transaction::{Account, NewTransaction, Transaction, TransactionPatch, TransactionType};
