//! Report, dashboard and export commands

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_report, ExportFormat};
use crate::reports::{DashboardSummary, FinancialReport};
use crate::services::{BudgetService, NotificationService};
use crate::storage::Storage;

use super::{FilterArgs, Terminal};

fn build_report(
    storage: &Storage,
    settings: &Settings,
    filter: &FilterArgs,
) -> ExpenseResult<FinancialReport> {
    let filter = filter.to_filter(storage, settings)?;
    Ok(FinancialReport::generate(
        &storage.transactions.get_all()?,
        &storage.categories.get_all()?,
        &filter,
    ))
}

/// Print the filtered financial report
pub fn handle_report(
    storage: &Storage,
    settings: &Settings,
    term: &mut dyn Terminal,
    filter: &FilterArgs,
) -> ExpenseResult<()> {
    let report = build_report(storage, settings, filter)?;
    write!(term.out(), "{}", report.format_terminal(&settings.currency_symbol))?;
    Ok(())
}

/// Print totals, the daily series and the budget overview
pub fn handle_dashboard(
    storage: &Storage,
    settings: &Settings,
    term: &mut dyn Terminal,
) -> ExpenseResult<()> {
    let symbol = &settings.currency_symbol;
    let summary = DashboardSummary::generate(&storage.transactions.get_all()?, &settings.date_format);
    write!(term.out(), "{}", summary.format_terminal(symbol))?;

    let overview = BudgetService::new(storage, settings).overview()?;
    if !overview.rows.is_empty() {
        writeln!(term.out())?;
        write!(term.out(), "{}", overview.format_terminal(symbol))?;

        let over = overview.over_limit_count();
        if over > 0 {
            writeln!(term.out(), "{} budget(s) over limit", over)?;
        }
    }

    let unread = NotificationService::new(storage).unread_count()?;
    if unread > 0 {
        writeln!(term.out(), "\n{} unread notification(s)", unread)?;
    }
    Ok(())
}

/// Write the filtered report to `path`
pub fn handle_export(
    storage: &Storage,
    settings: &Settings,
    term: &mut dyn Terminal,
    format: ExportFormat,
    path: &Path,
    filter: &FilterArgs,
) -> ExpenseResult<()> {
    let report = build_report(storage, settings, filter)?;

    let file = File::create(path).map_err(|e| {
        ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    export_report(&report, &storage.categories.get_all()?, format, &mut writer)?;
    writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    info!(path = %path.display(), ?format, "Exported report");
    writeln!(
        term.out(),
        "Exported {} transaction(s) to {}",
        report.transaction_count(),
        path.display()
    )?;
    Ok(())
}
