//! Interactive session
//!
//! Every line of input is tokenized and parsed with clap as one command.
//! State lives in the session's [`Storage`] and is gone when the session ends.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ColorChoice, Parser, Subcommand};
use tracing::debug;

use crate::config::Settings;
use crate::display::format_toast;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::ExportFormat;
use crate::services::NotificationService;
use crate::storage::Storage;

use super::{
    handle_budget_command, handle_category_command, handle_dashboard, handle_export,
    handle_notification_command, handle_report, handle_transaction_command, tokenize,
    BudgetCommands, CategoryCommands, FilterArgs, NotificationCommands, Terminal,
    TransactionCommands,
};

const PROMPT: &str = "expense> ";

/// One session command line
#[derive(Parser, Debug)]
#[command(
    name = "expense",
    no_binary_name = true,
    disable_version_flag = true,
    color = ColorChoice::Never
)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Record and manage transactions
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Manage categories and subcategories
    #[command(subcommand, alias = "cat")]
    Category(CategoryCommands),

    /// Manage budgets
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// View and acknowledge notifications
    #[command(subcommand, alias = "notif")]
    Notification(NotificationCommands),

    /// Financial report for an optional period and category
    Report(FilterArgs),

    /// Totals, daily series and budget status
    Dashboard,

    /// Write the financial report to a file
    Export {
        format: ExportFormat,
        file: PathBuf,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

/// Counts reported when a session ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOutcome {
    pub commands: usize,
    pub errors: usize,
}

struct SessionIo<R, W> {
    input: R,
    output: W,
    interactive: bool,
}

impl<R: BufRead, W: Write> SessionIo<R, W> {
    fn read_line(&mut self) -> ExpenseResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

impl<R: BufRead, W: Write> Terminal for SessionIo<R, W> {
    fn out(&mut self) -> &mut dyn Write {
        &mut self.output
    }

    fn confirm(&mut self, question: &str) -> ExpenseResult<bool> {
        write!(self.output, "{} ", question)?;
        self.output.flush()?;

        let answer = self.read_line()?.unwrap_or_default();
        let answer = answer.trim();
        if !self.interactive {
            writeln!(self.output, "{}", answer)?;
        }
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }
}

enum Flow {
    Continue,
    Quit,
}

/// A command session over any reader/writer pair
pub struct Session<R, W> {
    storage: Storage,
    settings: Settings,
    io: SessionIo<R, W>,
    stop_on_error: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Interactive session: prompts are shown and errors never end it
    pub fn interactive(settings: Settings, input: R, output: W) -> Self {
        Self::build(settings, input, output, true, false)
    }

    /// Scripted session: no prompts, stops at the first failing command
    /// unless `keep_going` is set
    pub fn script(settings: Settings, input: R, output: W, keep_going: bool) -> Self {
        Self::build(settings, input, output, false, !keep_going)
    }

    fn build(settings: Settings, input: R, output: W, interactive: bool, stop_on_error: bool) -> Self {
        Self {
            storage: Storage::new(),
            settings,
            io: SessionIo {
                input,
                output,
                interactive,
            },
            stop_on_error,
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Read and execute commands until `quit` or end of input
    pub fn run(&mut self) -> ExpenseResult<SessionOutcome> {
        let mut outcome = SessionOutcome::default();

        loop {
            if self.io.interactive {
                write!(self.io.output, "{}", PROMPT)?;
                self.io.output.flush()?;
            }

            let Some(line) = self.io.read_line()? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            outcome.commands += 1;
            match self.execute(line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => {
                    outcome.errors += 1;
                    writeln!(self.io.output, "Error: {}", e)?;
                    if self.stop_on_error {
                        break;
                    }
                }
            }
        }

        self.io.output.flush()?;
        debug!(commands = outcome.commands, errors = outcome.errors, "Session ended");
        Ok(outcome)
    }

    fn execute(&mut self, line: &str) -> ExpenseResult<Flow> {
        let tokens = tokenize(line)?;
        let parsed = match SessionLine::try_parse_from(&tokens) {
            Ok(parsed) => parsed,
            Err(e) => {
                return match e.kind() {
                    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                        write!(self.io.output, "{}", e.render())?;
                        Ok(Flow::Continue)
                    }
                    _ => Err(ExpenseError::Parse(
                        e.render().to_string().trim_end().to_string(),
                    )),
                };
            }
        };

        let before = NotificationService::new(&self.storage).last_id()?;
        let flow = self.dispatch(parsed.command)?;

        for notification in NotificationService::new(&self.storage).since(before)? {
            writeln!(self.io.output, "{}", format_toast(&notification))?;
        }
        Ok(flow)
    }

    fn dispatch(&mut self, command: SessionCommand) -> ExpenseResult<Flow> {
        let storage = &self.storage;
        let settings = &self.settings;
        let term = &mut self.io;

        match command {
            SessionCommand::Transaction(cmd) => {
                handle_transaction_command(storage, settings, term, cmd)?
            }
            SessionCommand::Category(cmd) => handle_category_command(storage, settings, term, cmd)?,
            SessionCommand::Budget(cmd) => handle_budget_command(storage, settings, term, cmd)?,
            SessionCommand::Notification(cmd) => handle_notification_command(storage, term, cmd)?,
            SessionCommand::Report(filter) => handle_report(storage, settings, term, &filter)?,
            SessionCommand::Dashboard => handle_dashboard(storage, settings, term)?,
            SessionCommand::Export {
                format,
                file,
                filter,
            } => handle_export(storage, settings, term, format, &file, &filter)?,
            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str, keep_going: bool) -> (SessionOutcome, String, Storage) {
        let mut output = Vec::new();
        let mut session = Session::script(
            Settings::default(),
            Cursor::new(script.as_bytes()),
            &mut output,
            keep_going,
        );
        let outcome = session.run().unwrap();
        let storage = std::mem::take(&mut session.storage);
        drop(session);
        (outcome, String::from_utf8(output).unwrap(), storage)
    }

    #[test]
    fn test_quoted_arguments() {
        let script = r#"
            category add "Eating Out"
            transaction add 12.50 -c "eating out" -m "Pizza night"
        "#;
        let (outcome, output, storage) = run_script(script, false);

        assert_eq!(outcome, SessionOutcome { commands: 2, errors: 0 });
        assert!(output.contains("Recorded expense of $12.50 (Eating Out)"));
        assert_eq!(storage.transactions.get_all().unwrap()[0].description, "Pizza night");
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let (outcome, _, _) = run_script("# setup\n\ncategory add Food\n", false);
        assert_eq!(outcome.commands, 1);
    }

    #[test]
    fn test_delete_confirmation_reads_next_line() {
        let script = "category add Food\ncategory delete Food\nn\ncategory delete Food\ny\n";
        let (outcome, output, storage) = run_script(script, false);

        assert_eq!(outcome.errors, 0);
        assert!(output.contains("Are you sure you want to delete this category? [y/N] n"));
        assert!(output.contains("Cancelled."));
        assert!(output.contains("Deleted category: Food"));
        assert_eq!(storage.categories.count().unwrap(), 0);
    }

    #[test]
    fn test_breach_is_echoed_as_toast() {
        let script = "\
category add Food
budget add Groceries 100 -c Food
budget spend Food 80
budget spend Food 25
";
        let (_, output, _) = run_script(script, false);
        assert!(output.contains("! Budget limit exceeded for Groceries!"));
        assert_eq!(output.matches("! Budget limit exceeded").count(), 1);
    }

    #[test]
    fn test_oversized_spend_is_rejected() {
        let script = "\
category add Food
budget add Groceries 100 -c Food
budget spend Food 92233720368547758.07
budget spend Food 92233720368547758.07
";
        let (outcome, output, storage) = run_script(script, true);
        assert_eq!(outcome, SessionOutcome { commands: 4, errors: 2 });
        assert!(output.contains("Amount too large"));
        assert!(storage.budgets.get_all().unwrap()[0].spent.is_zero());
    }

    #[test]
    fn test_script_stops_at_first_error() {
        let script = "transaction add -5\ncategory add Food\n";
        let (outcome, output, storage) = run_script(script, false);
        assert_eq!(outcome, SessionOutcome { commands: 1, errors: 1 });
        assert!(output.contains("Error: Invalid amount"));
        assert_eq!(storage.categories.count().unwrap(), 0);

        let (outcome, _, storage) = run_script(script, true);
        assert_eq!(outcome, SessionOutcome { commands: 2, errors: 1 });
        assert_eq!(storage.categories.count().unwrap(), 1);
    }

    #[test]
    fn test_unknown_command_and_help() {
        let (outcome, output, _) = run_script("help\nfrobnicate\n", true);
        assert_eq!(outcome.errors, 1);
        assert!(output.contains("transaction"));
        assert!(output.contains("Error: Parse error"));
    }

    #[test]
    fn test_quit_ends_session() {
        let (outcome, _, storage) = run_script("category add Food\nquit\ncategory add Rent\n", false);
        assert_eq!(outcome.commands, 2);
        assert_eq!(storage.categories.count().unwrap(), 1);
    }

    #[test]
    fn test_interactive_prompt() {
        let mut output = Vec::new();
        let mut session = Session::interactive(
            Settings::default(),
            Cursor::new(&b"dashboard\nexit\n"[..]),
            &mut output,
        );
        session.run().unwrap();
        drop(session);

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with(PROMPT));
        assert!(text.contains("No transactions yet."));
    }
}
