//! Reports module for the expense tracker
//!
//! Pure aggregation over ledger snapshots: totals, category and account
//! breakdowns, the dated series behind the dashboard, and budget status.

pub mod budget_overview;
pub mod dashboard;
pub mod filter;
pub mod financial;
pub mod series;
pub mod summary;

pub use budget_overview::{BudgetOverview, BudgetRow};
pub use dashboard::DashboardSummary;
pub use filter::ReportFilter;
pub use financial::FinancialReport;
pub use series::{date_series, DailyPoint};
pub use summary::{by_account, by_category, totals, AccountTotal, LabeledTotal, Totals};
