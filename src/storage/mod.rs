//! In-memory storage layer
//!
//! One repository per entity, each owning an insertion-ordered `Vec` behind
//! its own `RwLock`. Nothing is written to disk: the collections live for the
//! length of a session. Repositories never validate; that is the service
//! layer's job.

pub mod budgets;
pub mod categories;
pub mod notifications;
pub mod transactions;

pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use notifications::NotificationRepository;
pub use transactions::TransactionRepository;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{ExpenseError, ExpenseResult};

/// Main storage coordinator that provides access to all repositories
#[derive(Default)]
pub struct Storage {
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    pub budgets: BudgetRepository,
    pub notifications: NotificationRepository,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }
}

pub(crate) fn read<T>(lock: &RwLock<T>) -> ExpenseResult<RwLockReadGuard<'_, T>> {
    lock.read().map_err(ExpenseError::poisoned)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> ExpenseResult<RwLockWriteGuard<'_, T>> {
    lock.write().map_err(ExpenseError::poisoned)
}
