//! Transaction CLI commands

use std::io::Write;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Account, Money, NewTransaction, TransactionPatch, TransactionType};
use crate::services::{CategoryService, TransactionService};
use crate::storage::Storage;

use super::{confirm_delete, parse_date, FilterArgs, Terminal};

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record a transaction
    Add {
        /// Amount (e.g. "12.50" or "$12.50")
        #[arg(allow_hyphen_values = true)]
        amount: Money,

        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: TransactionType,

        /// bank, cash or mobile-money
        #[arg(short, long, default_value = "bank")]
        account: Account,

        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Description
        #[arg(short = 'm', long = "description")]
        description: Option<String>,
    },

    /// List transactions
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Only show the last N
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show transaction details
    Show {
        /// Transaction ID (full or short)
        id: String,
    },

    /// Edit a transaction
    Edit {
        /// Transaction ID (full or short)
        id: String,

        #[arg(long, allow_hyphen_values = true)]
        amount: Option<Money>,

        #[arg(short = 't', long = "type")]
        kind: Option<TransactionType>,

        #[arg(short, long)]
        account: Option<Account>,

        /// New category name or ID
        #[arg(short, long, conflicts_with = "clear_category")]
        category: Option<String>,

        /// Remove the category
        #[arg(long)]
        clear_category: bool,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(short = 'm', long = "description")]
        description: Option<String>,
    },

    /// Delete a transaction
    #[command(alias = "rm")]
    Delete {
        /// Transaction ID (full or short)
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    term: &mut dyn Terminal,
    cmd: TransactionCommands,
) -> ExpenseResult<()> {
    let service = TransactionService::new(storage, settings);
    let categories = CategoryService::new(storage, settings);
    let symbol = &settings.currency_symbol;

    match cmd {
        TransactionCommands::Add {
            amount,
            kind,
            account,
            category,
            date,
            description,
        } => {
            let date = parse_date(date.as_deref().unwrap_or("today"), settings)?;
            let mut new = NewTransaction::new(date, kind, amount, account)
                .with_description(description.unwrap_or_default());
            if let Some(category) = category {
                new = new.with_category(categories.resolve(&category)?.id);
            }

            let recorded = service.create(new)?;
            let txn = &recorded.transaction;
            writeln!(
                term.out(),
                "Recorded {} of {} ({})",
                txn.kind.to_string().to_lowercase(),
                txn.amount.format_with_symbol(symbol),
                categories.transaction_label(txn.category_id)?
            )?;
            writeln!(term.out(), "  ID: {}", txn.id)?;
        }

        TransactionCommands::List { filter, limit } => {
            let filter = filter.to_filter(storage, settings)?;
            let mut txns = service.list_filtered(&filter)?;
            if let Some(limit) = limit {
                let skip = txns.len().saturating_sub(limit);
                txns.drain(..skip);
            }
            writeln!(
                term.out(),
                "{}",
                format_transaction_list(&txns, &categories.list()?, settings)
            )?;
        }

        TransactionCommands::Show { id } => {
            let txn = service.resolve(&id)?;
            let label = categories.transaction_label(txn.category_id)?;
            write!(term.out(), "{}", format_transaction_details(&txn, &label, settings))?;
        }

        TransactionCommands::Edit {
            id,
            amount,
            kind,
            account,
            category,
            clear_category,
            date,
            description,
        } => {
            let txn = service.resolve(&id)?;
            let category_id = if clear_category {
                Some(None)
            } else {
                match category {
                    Some(c) => Some(Some(categories.resolve(&c)?.id)),
                    None => None,
                }
            };
            let patch = TransactionPatch {
                date: date.map(|d| parse_date(&d, settings)).transpose()?,
                kind,
                amount,
                account,
                category_id,
                description,
            };
            if patch.is_empty() {
                return Err(ExpenseError::Validation(
                    "Nothing to change; pass at least one field to edit".into(),
                ));
            }

            if let Some(updated) = service.update(txn.id, patch)? {
                writeln!(term.out(), "Updated transaction {}", updated.id)?;
            }
        }

        TransactionCommands::Delete { id, yes } => {
            let txn = service.resolve(&id)?;
            if confirm_delete(term, "transaction", yes)? && service.delete(txn.id)? {
                writeln!(term.out(), "Deleted transaction {}", txn.id)?;
            }
        }
    }

    Ok(())
}
