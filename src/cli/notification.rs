//! Notification CLI commands

use std::io::Write;

use clap::Subcommand;

use crate::display::format_notification_list;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{NotificationId, NotificationKind};
use crate::services::NotificationService;
use crate::storage::Storage;

use super::Terminal;

/// Notification subcommands
#[derive(Subcommand, Debug)]
pub enum NotificationCommands {
    /// Show the notification log
    #[command(alias = "ls")]
    List,

    /// Mark a notification (or all of them) read
    Read {
        /// Notification number, e.g. 3 or #3
        #[arg(required_unless_present = "all")]
        id: Option<NotificationId>,
        #[arg(long, conflicts_with = "id")]
        all: bool,
    },

    /// Remove every notification
    Clear,

    /// Add a notification by hand
    Add {
        message: String,
        /// warning or info
        #[arg(short = 't', long = "type", default_value = "info")]
        kind: NotificationKind,
    },
}

/// Handle a notification command
pub fn handle_notification_command(
    storage: &Storage,
    term: &mut dyn Terminal,
    cmd: NotificationCommands,
) -> ExpenseResult<()> {
    let service = NotificationService::new(storage);

    match cmd {
        NotificationCommands::List => {
            writeln!(term.out(), "{}", format_notification_list(&service.list()?))?;
        }

        NotificationCommands::Read { id, all } => {
            if all {
                let changed = service.mark_all_read()?;
                writeln!(term.out(), "Marked {} notification(s) read", changed)?;
            } else if let Some(id) = id {
                if service.mark_read(id)? {
                    writeln!(term.out(), "Marked {} read", id)?;
                } else {
                    writeln!(term.out(), "No notification {}", id)?;
                }
            } else {
                return Err(ExpenseError::Validation(
                    "Pass a notification number or --all".into(),
                ));
            }
        }

        NotificationCommands::Clear => {
            service.clear()?;
            writeln!(term.out(), "Notifications cleared")?;
        }

        NotificationCommands::Add { message, kind } => {
            service.add(&message, kind)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testing::FakeTerminal;

    #[test]
    fn test_read_and_clear() {
        let storage = Storage::new();
        let mut term = FakeTerminal::default();
        storage
            .notifications
            .push("Budget limit exceeded for Food!", NotificationKind::Warning)
            .unwrap();

        handle_notification_command(
            &storage,
            &mut term,
            NotificationCommands::Read {
                id: Some(NotificationId::new(1)),
                all: false,
            },
        )
        .unwrap();
        assert_eq!(storage.notifications.unread_count().unwrap(), 0);

        handle_notification_command(&storage, &mut term, NotificationCommands::Clear).unwrap();
        handle_notification_command(&storage, &mut term, NotificationCommands::Clear).unwrap();
        assert_eq!(storage.notifications.count().unwrap(), 0);

        handle_notification_command(&storage, &mut term, NotificationCommands::List).unwrap();
        assert!(term.text().contains("No notifications."));
    }

    #[test]
    fn test_read_unknown_is_quiet() {
        let storage = Storage::new();
        let mut term = FakeTerminal::default();
        handle_notification_command(
            &storage,
            &mut term,
            NotificationCommands::Read {
                id: Some(NotificationId::new(7)),
                all: false,
            },
        )
        .unwrap();
        assert!(term.text().contains("No notification #7"));
    }
}
