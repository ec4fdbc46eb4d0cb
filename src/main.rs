use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use expense_tracker::cli::Session;
use expense_tracker::config::paths::CONFIG_DIR_ENV;
use expense_tracker::config::{logging, ExpensePaths, Settings};

#[derive(Parser)]
#[command(
    name = "expense",
    author = "Kaylee Beyene",
    version,
    about = "Terminal expense tracker",
    long_about = "Track income and expenses by category, set spending budgets \
                  and get warned when they are exceeded. Data lives for the \
                  length of a session; only settings are stored on disk."
)]
struct Cli {
    /// Directory holding config.json
    #[arg(long, global = true, env = CONFIG_DIR_ENV)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Shell,

    /// Run session commands from a file, one per line
    Run {
        file: PathBuf,

        /// Keep going after a command fails
        #[arg(long)]
        keep_going: bool,
    },

    /// Show configuration and paths
    Config {
        /// Write the default settings file if there is none
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ExpensePaths::resolve(cli.config_dir.as_deref())?;
    let settings = Settings::load_or_create(&paths)?;
    logging::init(&settings);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            let stdout = io::stdout();
            let outcome = if interactive {
                println!(
                    "Expense Tracker {}. Type 'help' for commands, 'quit' to leave.",
                    env!("CARGO_PKG_VERSION")
                );
                Session::interactive(settings, stdin.lock(), stdout.lock()).run()?
            } else {
                Session::script(settings, stdin.lock(), stdout.lock(), true).run()?
            };
            tracing::debug!(?outcome, "Shell closed");
        }
        Commands::Run { file, keep_going } => {
            let reader = File::open(&file)
                .with_context(|| format!("Failed to open {}", file.display()))?;
            let outcome =
                Session::script(settings, BufReader::new(reader), io::stdout().lock(), keep_going)
                    .run()?;
            if outcome.errors > 0 {
                bail!(
                    "{} of {} command(s) failed in {}",
                    outcome.errors,
                    outcome.commands,
                    file.display()
                );
            }
        }
        Commands::Config { init } => {
            if init {
                if paths.is_initialized() {
                    println!("Settings already exist: {}", paths.settings_file().display());
                } else {
                    settings.save(&paths)?;
                    println!("Wrote default settings: {}", paths.settings_file().display());
                }
            }
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}
