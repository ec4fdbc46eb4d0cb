//! Notification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::NotificationId;
use crate::error::ExpenseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Warning,
    Info,
}

impl NotificationKind {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Warning => "!",
            Self::Info => "i",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.pad("warning"),
            Self::Info => f.pad("info"),
        }
    }
}

impl FromStr for NotificationKind {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "warning" | "warn" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            other => Err(ExpenseError::Parse(format!(
                "Unknown notification type '{}' (expected warning or info)",
                other
            ))),
        }
    }
}

/// An alert in the notification log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(id: NotificationId, message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            id,
            message: message.into(),
            kind,
            read: false,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.icon(), self.message)
    }
}
