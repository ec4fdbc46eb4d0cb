//! Expense Tracker - terminal expense tracking with categories and budgets
//!
//! This library provides the core functionality for the `expense` binary:
//! an in-memory ledger of income and expense transactions, categories with
//! subcategories, spending budgets that raise notifications when exceeded,
//! and financial reports that can be exported as JSON, YAML or CSV.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration file, path resolution and logging setup
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, budgets, notifications)
//! - `storage`: In-memory stores, one per entity
//! - `services`: Business logic layer (validation, strict mode, budget alerts)
//! - `reports`: Pure aggregations over the ledger
//! - `display`: Terminal formatting
//! - `export`: Report serialization
//! - `cli`: Session commands
//!
//! # Example
//!
//! ```rust
//! use expense_tracker::config::Settings;
//! use expense_tracker::models::{Money, NewCategory, NewTransaction};
//! use expense_tracker::services::{CategoryService, TransactionService};
//! use expense_tracker::storage::Storage;
//!
//! let storage = Storage::new();
//! let settings = Settings::default();
//!
//! let food = CategoryService::new(&storage, &settings)
//!     .create(NewCategory::new("Food"))?;
//! let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
//! TransactionService::new(&storage, &settings)
//!     .create(NewTransaction::expense(date, Money::from_cents(1250)).with_category(food.id))?;
//!
//! assert_eq!(storage.transactions.count()?, 1);
//! # Ok::<(), expense_tracker::ExpenseError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
