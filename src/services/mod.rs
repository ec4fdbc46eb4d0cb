//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer:
//! caller-side validation, strict-mode lookups, and the budget breach to
//! notification path.

pub mod budget;
pub mod category;
pub mod notification;
pub mod transaction;

pub use budget::BudgetService;
pub use category::CategoryService;
pub use notification::NotificationService;
pub use transaction::{Recorded, TransactionService};
