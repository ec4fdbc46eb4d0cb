//! Category CLI commands
//!
//! Implements session commands for categories and their subcategories.

use std::io::Write;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_category_details, format_category_tree};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{CategoryPatch, NewCategory, NewSubcategory};
use crate::services::CategoryService;
use crate::storage::Storage;

use super::{confirm_delete, Terminal};

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Create a new category
    Add {
        /// Category name
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List all categories with their subcategories
    #[command(alias = "ls")]
    List,

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Rename or redescribe a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a category (transactions and budgets keep their reference)
    #[command(alias = "rm")]
    Delete {
        /// Category name or ID
        category: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Add a subcategory
    #[command(name = "add-sub")]
    AddSub {
        /// Parent category name or ID
        category: String,
        /// Subcategory name
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    term: &mut dyn Terminal,
    cmd: CategoryCommands,
) -> ExpenseResult<()> {
    let service = CategoryService::new(storage, settings);

    match cmd {
        CategoryCommands::Add { name, description } => {
            let category = service.create(
                NewCategory::new(name).with_description(description.unwrap_or_default()),
            )?;
            writeln!(term.out(), "Created category: {}", category.name)?;
            writeln!(term.out(), "  ID: {}", category.id)?;
        }

        CategoryCommands::List => {
            writeln!(term.out(), "{}", format_category_tree(&service.list()?).trim_end())?;
        }

        CategoryCommands::Show { category } => {
            let category = service.resolve(&category)?;
            let count = storage.transactions.get_by_category(category.id)?.len();
            write!(term.out(), "{}", format_category_details(&category, count))?;
        }

        CategoryCommands::Edit {
            category,
            name,
            description,
        } => {
            let category = service.resolve(&category)?;
            let patch = CategoryPatch { name, description };
            if patch.is_empty() {
                return Err(ExpenseError::Validation(
                    "Nothing to change; pass --name or --description".into(),
                ));
            }
            if let Some(updated) = service.update(category.id, patch)? {
                writeln!(term.out(), "Updated category: {}", updated.name)?;
            }
        }

        CategoryCommands::Delete { category, yes } => {
            let category = service.resolve(&category)?;
            if confirm_delete(term, "category", yes)? && service.delete(category.id)? {
                writeln!(term.out(), "Deleted category: {}", category.name)?;
            }
        }

        CategoryCommands::AddSub {
            category,
            name,
            description,
        } => {
            let category = service.resolve(&category)?;
            let new = NewSubcategory::new(name).with_description(description.unwrap_or_default());
            if let Some(sub) = service.add_subcategory(category.id, new)? {
                writeln!(
                    term.out(),
                    "Added subcategory {} to {}",
                    sub.name,
                    category.name
                )?;
                writeln!(term.out(), "  ID: {}", sub.id)?;
            }
        }
    }

    Ok(())
}
