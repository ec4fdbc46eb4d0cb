//! Configuration module for the expense tracker
//!
//! - Config directory resolution
//! - User settings persistence
//! - Logging setup driven by the settings

pub mod logging;
pub mod paths;
pub mod settings;

pub use paths::ExpensePaths;
pub use settings::{BudgetSync, Settings};
