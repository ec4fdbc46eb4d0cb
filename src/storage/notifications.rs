//! Notification repository
//!
//! An append-only log apart from `mark_read` and `clear`. Ids come from a
//! counter that survives `clear`, so an id is never handed out twice.

use std::sync::RwLock;

use crate::error::ExpenseResult;
use crate::models::{Notification, NotificationId, NotificationKind};

use super::{read, write};

#[derive(Default)]
struct NotificationLog {
    entries: Vec<Notification>,
    last_id: u64,
}

/// Repository for notifications
#[derive(Default)]
pub struct NotificationRepository {
    data: RwLock<NotificationLog>,
}

impl NotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an unread notification
    pub fn push(
        &self,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> ExpenseResult<Notification> {
        let mut log = write(&self.data)?;
        log.last_id += 1;
        let notification = Notification::new(NotificationId::new(log.last_id), message, kind);
        log.entries.push(notification.clone());
        Ok(notification)
    }

    /// Returns false when no notification has this id
    pub fn mark_read(&self, id: NotificationId) -> ExpenseResult<bool> {
        let mut log = write(&self.data)?;
        match log.entries.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Mark everything read and return how many changed
    pub fn mark_all_read(&self) -> ExpenseResult<usize> {
        let mut log = write(&self.data)?;
        let mut changed = 0;
        for notification in log.entries.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            changed += 1;
        }
        Ok(changed)
    }

    pub fn clear(&self) -> ExpenseResult<()> {
        write(&self.data)?.entries.clear();
        Ok(())
    }

    pub fn unread_count(&self) -> ExpenseResult<usize> {
        Ok(read(&self.data)?.entries.iter().filter(|n| !n.read).count())
    }

    pub fn get_all(&self) -> ExpenseResult<Vec<Notification>> {
        Ok(read(&self.data)?.entries.clone())
    }

    /// Notifications created after `id`
    pub fn since(&self, id: Option<NotificationId>) -> ExpenseResult<Vec<Notification>> {
        Ok(read(&self.data)?
            .entries
            .iter()
            .filter(|n| id.map_or(true, |after| n.id > after))
            .cloned()
            .collect())
    }

    /// Id of the most recently created notification, even if since cleared
    pub fn last_id(&self) -> ExpenseResult<Option<NotificationId>> {
        let log = read(&self.data)?;
        Ok((log.last_id > 0).then(|| NotificationId::new(log.last_id)))
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        Ok(read(&self.data)?.entries.len())
    }
}
