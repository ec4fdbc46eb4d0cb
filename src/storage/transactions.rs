//! Transaction repository
//!
//! Keeps transactions in the order they were added. Updates merge in place,
//! removals close the gap without renumbering anything.

use std::sync::RwLock;

use crate::error::ExpenseResult;
use crate::models::{CategoryId, NewTransaction, Transaction, TransactionId, TransactionPatch};

use super::{read, write};

/// Repository for the transaction ledger
#[derive(Default)]
pub struct TransactionRepository {
    data: RwLock<Vec<Transaction>>,
}

impl TransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction with a fresh id and return the stored copy
    pub fn insert(&self, new: NewTransaction) -> ExpenseResult<Transaction> {
        let txn = Transaction::from_new(new);
        write(&self.data)?.push(txn.clone());
        Ok(txn)
    }

    /// Remove by id. Returns false when the id was not present.
    pub fn remove(&self, id: TransactionId) -> ExpenseResult<bool> {
        let mut data = write(&self.data)?;
        let before = data.len();
        data.retain(|t| t.id != id);
        Ok(data.len() != before)
    }

    /// Merge `patch` into the matching transaction, keeping its position
    pub fn update(
        &self,
        id: TransactionId,
        patch: &TransactionPatch,
    ) -> ExpenseResult<Option<Transaction>> {
        let mut data = write(&self.data)?;
        Ok(data.iter_mut().find(|t| t.id == id).map(|txn| {
            patch.apply_to(txn);
            txn.clone()
        }))
    }

    pub fn get(&self, id: TransactionId) -> ExpenseResult<Option<Transaction>> {
        Ok(read(&self.data)?.iter().find(|t| t.id == id).cloned())
    }

    /// Snapshot of every transaction in insertion order
    pub fn get_all(&self) -> ExpenseResult<Vec<Transaction>> {
        Ok(read(&self.data)?.clone())
    }

    pub fn get_by_category(&self, category_id: CategoryId) -> ExpenseResult<Vec<Transaction>> {
        Ok(read(&self.data)?
            .iter()
            .filter(|t| t.category_id == Some(category_id))
            .cloned()
            .collect())
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        Ok(read(&self.data)?.len())
    }
}
