//! Notification display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::Notification;

#[derive(Tabled)]
struct NotificationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "")]
    icon: &'static str,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Read")]
    read: &'static str,
}

/// Format the notification log, newest last
pub fn format_notification_list(notifications: &[Notification]) -> String {
    if notifications.is_empty() {
        return "No notifications.".to_string();
    }

    let unread = notifications.iter().filter(|n| !n.read).count();
    let rows = notifications.iter().map(|n| NotificationRow {
        id: n.id.to_string(),
        icon: n.kind.icon(),
        message: n.message.clone(),
        read: if n.read { "yes" } else { "" },
    });

    format!(
        "{}\n{} unread",
        Table::new(rows).with(Style::sharp()),
        unread
    )
}

/// One-line alert echoed after the command that raised it
pub fn format_toast(notification: &Notification) -> String {
    notification.to_string()
}
