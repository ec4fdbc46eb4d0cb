//! User settings for the expense tracker
//!
//! Display preferences, the budget warning band, strict mode and whether
//! recorded expenses feed budgets automatically.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::DEFAULT_WARNING_PERCENT;

/// How transactions reach budgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetSync {
    /// Budgets only move on an explicit `budget spend`
    #[default]
    Manual,
    /// Adding an expense with a category records the spend on its budgets
    Automatic,
}

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol placed before amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format (strftime); also the bucket key of the daily series
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Utilization percentage above which a budget shows as a warning
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold_percent: u8,

    /// Fail with "not found" instead of ignoring unknown ids
    #[serde(default)]
    pub strict_mode: bool,

    #[serde(default)]
    pub budget_sync: BudgetSync,

    /// Default tracing filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%m/%d/%Y".to_string()
}

fn default_warning_threshold() -> u8 {
    DEFAULT_WARNING_PERCENT
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            warning_threshold_percent: default_warning_threshold(),
            strict_mode: false,
            budget_sync: BudgetSync::default(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> ExpenseResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| ExpenseError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> ExpenseResult<()> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExpenseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> ExpenseResult<()> {
        if !(1..=100).contains(&self.warning_threshold_percent) {
            return Err(ExpenseError::Config(format!(
                "warning_threshold_percent must be between 1 and 100 (got {})",
                self.warning_threshold_percent
            )));
        }
        if self.date_format.trim().is_empty() {
            return Err(ExpenseError::Config("date_format cannot be empty".into()));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ExpenseError::Config(format!(
                "date_format '{}' is not a valid strftime format",
                self.date_format
            )));
        }
        Ok(())
    }
}
