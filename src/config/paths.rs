//! Path management for the expense tracker
//!
//! Only configuration lives on disk; ledger data never does.
//!
//! ## Path Resolution Order
//!
//! 1. `--config-dir` / `EXPENSE_TRACKER_CONFIG_DIR` (if set)
//! 2. The platform config directory from `directories::ProjectDirs`
//!    (`~/.config/expense-tracker` on Linux)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{ExpenseError, ExpenseResult};

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "EXPENSE_TRACKER_CONFIG_DIR";

/// Manages all paths used by the expense tracker
#[derive(Debug, Clone)]
pub struct ExpensePaths {
    base_dir: PathBuf,
}

impl ExpensePaths {
    /// Resolve paths from the environment, falling back to the platform default
    pub fn new() -> ExpenseResult<Self> {
        match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) if !custom.is_empty() => Ok(Self::with_base_dir(PathBuf::from(custom))),
            _ => Self::platform_default(),
        }
    }

    /// Use `override_dir` when given, otherwise resolve as [`ExpensePaths::new`]
    pub fn resolve(override_dir: Option<&Path>) -> ExpenseResult<Self> {
        match override_dir {
            Some(dir) => Ok(Self::with_base_dir(dir.to_path_buf())),
            None => Self::new(),
        }
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn platform_default() -> ExpenseResult<Self> {
        ProjectDirs::from("", "", "expense-tracker")
            .map(|dirs| Self::with_base_dir(dirs.config_dir().to_path_buf()))
            .ok_or_else(|| {
                ExpenseError::Config("Could not determine a configuration directory".into())
            })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn ensure_directories(&self) -> ExpenseResult<()> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            ExpenseError::Io(format!(
                "Failed to create config directory {}: {}",
                self.base_dir.display(),
                e
            ))
        })
    }

    /// True once a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
