//! CLI command handlers
//!
//! This module contains the implementation of session commands, bridging
//! the clap argument parsing with the service layer. Handlers write to a
//! [`Terminal`] instead of stdout so a session can be driven from any
//! reader/writer pair.

pub mod budget;
pub mod category;
pub mod notification;
pub mod report;
pub mod session;
pub mod tokenize;
pub mod transaction;

use std::io::Write;

use chrono::{Local, NaiveDate};
use clap::Args;

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::ReportFilter;
use crate::services::CategoryService;
use crate::storage::Storage;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use notification::{handle_notification_command, NotificationCommands};
pub use report::{handle_dashboard, handle_export, handle_report};
pub use session::{Session, SessionCommand, SessionLine, SessionOutcome};
pub use tokenize::tokenize;
pub use transaction::{handle_transaction_command, TransactionCommands};

/// Where command output goes and where confirmations are answered
pub trait Terminal {
    fn out(&mut self) -> &mut dyn Write;

    /// Ask a yes/no question. Anything but an explicit yes is a no.
    fn confirm(&mut self, question: &str) -> ExpenseResult<bool>;
}

/// Ask before deleting unless `--yes` was passed
pub(crate) fn confirm_delete(
    term: &mut dyn Terminal,
    entity: &str,
    assume_yes: bool,
) -> ExpenseResult<bool> {
    if assume_yes {
        return Ok(true);
    }
    let confirmed = term.confirm(&format!(
        "Are you sure you want to delete this {}? [y/N]",
        entity
    ))?;
    if !confirmed {
        writeln!(term.out(), "Cancelled.")?;
    }
    Ok(confirmed)
}

/// Parse a date as `YYYY-MM-DD`, the configured display format, or `today`
pub fn parse_date(input: &str, settings: &Settings) -> ExpenseResult<NaiveDate> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, &settings.date_format))
        .map_err(|_| {
            ExpenseError::Parse(format!(
                "Invalid date '{}' (expected YYYY-MM-DD or {})",
                input, settings.date_format
            ))
        })
}

/// Date range and category options shared by listing, report and export
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Start date, inclusive
    #[arg(long)]
    pub start: Option<String>,

    /// End date, inclusive
    #[arg(long)]
    pub end: Option<String>,

    /// Category name or ID
    #[arg(short, long)]
    pub category: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self, storage: &Storage, settings: &Settings) -> ExpenseResult<ReportFilter> {
        let mut filter = ReportFilter::new();
        if let Some(start) = &self.start {
            filter = filter.start(parse_date(start, settings)?);
        }
        if let Some(end) = &self.end {
            filter = filter.end(parse_date(end, settings)?);
        }
        if let Some(category) = &self.category {
            let category = CategoryService::new(storage, settings).resolve(category)?;
            filter = filter.category(category.id);
        }
        if let (Some(start), Some(end)) = (filter.start, filter.end) {
            if start > end {
                return Err(ExpenseError::Validation(format!(
                    "Start date {} is after end date {}",
                    start, end
                )));
            }
        }
        Ok(filter)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeTerminal;
    use super::*;
    use crate::models::NewCategory;

    #[test]
    fn test_parse_date_formats() {
        let settings = Settings::default();
        let expected = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(parse_date("2025-03-09", &settings).unwrap(), expected);
        assert_eq!(parse_date("03/09/2025", &settings).unwrap(), expected);
        assert!(parse_date("today", &settings).is_ok());
        assert!(matches!(
            parse_date("9th March", &settings),
            Err(ExpenseError::Parse(_))
        ));
    }

    #[test]
    fn test_confirm_delete() {
        let mut term = FakeTerminal::answering(&[false]);
        assert!(!confirm_delete(&mut term, "budget", false).unwrap());
        assert_eq!(
            term.questions,
            vec!["Are you sure you want to delete this budget? [y/N]"]
        );
        assert!(term.text().contains("Cancelled."));

        let mut term = FakeTerminal::default();
        assert!(confirm_delete(&mut term, "budget", true).unwrap());
        assert!(term.questions.is_empty());
    }

    #[test]
    fn test_filter_args() {
        let storage = Storage::new();
        let settings = Settings::default();
        let food = storage.categories.insert(NewCategory::new("Food")).unwrap();

        let args = FilterArgs {
            start: Some("2025-01-01".into()),
            end: Some("2025-01-31".into()),
            category: Some("food".into()),
        };
        let filter = args.to_filter(&storage, &settings).unwrap();
        assert_eq!(filter.category_id, Some(food.id));

        let backwards = FilterArgs {
            start: Some("2025-02-01".into()),
            end: Some("2025-01-01".into()),
            category: None,
        };
        assert!(backwards.to_filter(&storage, &settings).is_err());

        let unknown = FilterArgs {
            category: Some("rent".into()),
            ..Default::default()
        };
        assert!(unknown.to_filter(&storage, &settings).unwrap_err().is_not_found());
    }
}
