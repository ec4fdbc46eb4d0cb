//! Notification service

use tracing::debug;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Notification, NotificationId, NotificationKind};
use crate::storage::Storage;

/// Service for the notification log
pub struct NotificationService<'a> {
    storage: &'a Storage,
}

impl<'a> NotificationService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn add(&self, message: &str, kind: NotificationKind) -> ExpenseResult<Notification> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ExpenseError::Validation(
                "Notification message cannot be empty".into(),
            ));
        }
        let notification = self.storage.notifications.push(message, kind)?;
        debug!(notification = %notification.id, kind = %kind, "Added notification");
        Ok(notification)
    }

    pub fn warn(&self, message: impl Into<String>) -> ExpenseResult<Notification> {
        self.storage
            .notifications
            .push(message, NotificationKind::Warning)
    }

    /// Mark one notification read. Unknown ids are a no-op.
    pub fn mark_read(&self, id: NotificationId) -> ExpenseResult<bool> {
        let found = self.storage.notifications.mark_read(id)?;
        if !found {
            debug!(notification = %id, "Ignoring unknown notification id");
        }
        Ok(found)
    }

    pub fn mark_all_read(&self) -> ExpenseResult<usize> {
        self.storage.notifications.mark_all_read()
    }

    pub fn clear(&self) -> ExpenseResult<()> {
        self.storage.notifications.clear()
    }

    pub fn unread_count(&self) -> ExpenseResult<usize> {
        self.storage.notifications.unread_count()
    }

    pub fn list(&self) -> ExpenseResult<Vec<Notification>> {
        self.storage.notifications.get_all()
    }

    pub fn since(&self, id: Option<NotificationId>) -> ExpenseResult<Vec<Notification>> {
        self.storage.notifications.since(id)
    }

    pub fn last_id(&self) -> ExpenseResult<Option<NotificationId>> {
        self.storage.notifications.last_id()
    }
}
