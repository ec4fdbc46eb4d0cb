//! Budget CLI commands

use std::io::Write;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_budget_details, format_budget_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{BudgetPatch, BudgetPeriod, Money, NewBudget};
use crate::services::{BudgetService, CategoryService};
use crate::storage::Storage;

use super::{confirm_delete, Terminal};

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Create a budget for a category
    Add {
        /// Budget name
        name: String,
        /// Spending limit
        #[arg(allow_hyphen_values = true)]
        limit: Money,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// weekly, monthly or yearly
        #[arg(short, long, default_value = "monthly")]
        period: BudgetPeriod,
    },

    /// List budgets with their status
    #[command(alias = "ls")]
    List,

    /// Show budget details
    Show {
        /// Budget name or ID
        budget: String,
    },

    /// Edit a budget (the spent amount cannot be edited)
    Edit {
        /// Budget name or ID
        budget: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        limit: Option<Money>,
        #[arg(short, long)]
        period: Option<BudgetPeriod>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete a budget
    #[command(alias = "rm")]
    Delete {
        /// Budget name or ID
        budget: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Record spending against every budget on a category
    ///
    /// A budget name or ID stands in for its category, which also reaches
    /// budgets whose category was deleted.
    Spend {
        /// Category name or ID, or a budget name or ID
        category: String,
        #[arg(allow_hyphen_values = true)]
        amount: Money,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    term: &mut dyn Terminal,
    cmd: BudgetCommands,
) -> ExpenseResult<()> {
    let service = BudgetService::new(storage, settings);
    let categories = CategoryService::new(storage, settings);
    let symbol = &settings.currency_symbol;

    match cmd {
        BudgetCommands::Add {
            name,
            limit,
            category,
            period,
        } => {
            let category = categories.resolve(&category)?;
            let budget =
                service.create(NewBudget::new(name, limit, category.id).with_period(period))?;
            writeln!(
                term.out(),
                "Created budget: {} ({} {}, {})",
                budget.name,
                budget.limit.format_with_symbol(symbol),
                budget.period.to_string().to_lowercase(),
                category.name
            )?;
            writeln!(term.out(), "  ID: {}", budget.id)?;
        }

        BudgetCommands::List => {
            writeln!(term.out(), "{}", format_budget_list(&service.overview()?, settings))?;
        }

        BudgetCommands::Show { budget } => {
            let budget = service.resolve(&budget)?;
            let label = categories.budget_label(budget.category_id)?;
            write!(term.out(), "{}", format_budget_details(&budget, &label, settings))?;
        }

        BudgetCommands::Edit {
            budget,
            name,
            limit,
            period,
            category,
        } => {
            let budget = service.resolve(&budget)?;
            let category_id = match category {
                Some(c) => Some(categories.resolve(&c)?.id),
                None => None,
            };
            let patch = BudgetPatch {
                name,
                limit,
                period,
                category_id,
            };
            if patch.is_empty() {
                return Err(ExpenseError::Validation(
                    "Nothing to change; pass at least one field to edit".into(),
                ));
            }
            if let Some(updated) = service.update(budget.id, patch)? {
                writeln!(term.out(), "Updated budget: {}", updated.name)?;
            }
        }

        BudgetCommands::Delete { budget, yes } => {
            let budget = service.resolve(&budget)?;
            if confirm_delete(term, "budget", yes)? && service.delete(budget.id)? {
                writeln!(term.out(), "Deleted budget: {}", budget.name)?;
            }
        }

        BudgetCommands::Spend { category, amount } => {
            let (category_id, label) = match categories.find(&category)? {
                Some(found) => (found.id, found.name),
                None => match service.find(&category)? {
                    Some(budget) => (
                        budget.category_id,
                        categories.budget_label(budget.category_id)?,
                    ),
                    None => return Err(ExpenseError::category_not_found(category)),
                },
            };
            let affected = service.list_for_category(category_id)?.len();
            let breaches = service.record_spend(category_id, amount)?;
            writeln!(
                term.out(),
                "Recorded {} against {} budget(s) for {}",
                amount.format_with_symbol(symbol),
                affected,
                label
            )?;
            if !breaches.is_empty() {
                writeln!(term.out(), "  {} budget(s) now over limit", breaches.len())?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testing::FakeTerminal;
    use crate::models::NewCategory;

    fn setup() -> Storage {
        let storage = Storage::new();
        storage.categories.insert(NewCategory::new("Food")).unwrap();
        storage
    }

    fn run(storage: &Storage, term: &mut FakeTerminal, cmd: BudgetCommands) -> ExpenseResult<()> {
        handle_budget_command(storage, &Settings::default(), term, cmd)
    }

    fn add_food_budget(storage: &Storage, term: &mut FakeTerminal) {
        run(
            storage,
            term,
            BudgetCommands::Add {
                name: "Groceries".into(),
                limit: Money::from_units(100),
                category: "Food".into(),
                period: BudgetPeriod::Monthly,
            },
        )
        .unwrap();
    }

    #[test]
    fn test_threshold_scenario() {
        let storage = setup();
        let mut term = FakeTerminal::default();
        add_food_budget(&storage, &mut term);

        let spend = |amount| BudgetCommands::Spend {
            category: "Food".into(),
            amount: Money::from_units(amount),
        };

        run(&storage, &mut term, spend(80)).unwrap();
        let budget = &storage.budgets.get_all().unwrap()[0];
        assert_eq!(budget.spent, Money::from_units(80));
        assert_eq!(budget.utilization_ratio().unwrap(), 0.8);
        assert_eq!(storage.notifications.count().unwrap(), 0);

        run(&storage, &mut term, spend(25)).unwrap();
        let notes = storage.notifications.get_all().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, "Budget limit exceeded for Groceries!");
        assert!(term.text().contains("1 budget(s) now over limit"));
    }

    #[test]
    fn test_spend_by_budget_name_after_category_deleted() {
        let storage = setup();
        let mut term = FakeTerminal::default();
        add_food_budget(&storage, &mut term);
        let food = storage.categories.get_all().unwrap()[0].id;
        storage.categories.remove(food).unwrap();

        let by_category = BudgetCommands::Spend {
            category: "Food".into(),
            amount: Money::from_units(5),
        };
        assert!(matches!(
            run(&storage, &mut term, by_category),
            Err(ExpenseError::NotFound { .. })
        ));

        run(
            &storage,
            &mut term,
            BudgetCommands::Spend {
                category: "Groceries".into(),
                amount: Money::from_units(5),
            },
        )
        .unwrap();
        assert_eq!(storage.budgets.get_all().unwrap()[0].spent, Money::from_units(5));
        assert!(term
            .text()
            .contains("Recorded $5.00 against 1 budget(s) for Unknown"));
    }

    #[test]
    fn test_list_and_show() {
        let storage = setup();
        let mut term = FakeTerminal::default();
        add_food_budget(&storage, &mut term);

        run(&storage, &mut term, BudgetCommands::List).unwrap();
        run(
            &storage,
            &mut term,
            BudgetCommands::Show {
                budget: "groceries".into(),
            },
        )
        .unwrap();

        let text = term.text();
        assert!(text.contains("Created budget: Groceries ($100.00 monthly, Food)"));
        assert!(text.contains("Remaining:   $100.00"));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let storage = setup();
        let mut term = FakeTerminal::default();
        let err = run(
            &storage,
            &mut term,
            BudgetCommands::Add {
                name: "Nothing".into(),
                limit: Money::zero(),
                category: "Food".into(),
                period: BudgetPeriod::Weekly,
            },
        )
        .unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidAmount(_)));
    }

    #[test]
    fn test_delete_with_yes() {
        let storage = setup();
        let mut term = FakeTerminal::default();
        add_food_budget(&storage, &mut term);

        run(
            &storage,
            &mut term,
            BudgetCommands::Delete {
                budget: "Groceries".into(),
                yes: true,
            },
        )
        .unwrap();
        assert_eq!(storage.budgets.count().unwrap(), 0);
        assert!(term.questions.is_empty());
    }
}
