use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use kurs::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for kurs::AppCommand {
    fn from(cmd: Commands) -> kurs::AppCommand {
        match cmd {
            Commands::Convert { amount, from, to } => {
                kurs::AppCommand::Convert { amount, from, to }
            }
            Commands::Live { from, to } => kurs::AppCommand::Live { from, to },
            Commands::Currencies { query } => kurs::AppCommand::Currencies { query },
            Commands::Favorite { code } => kurs::AppCommand::Favorite { code },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount once and print the result
    Convert {
        /// Amount to convert (defaults to 1)
        amount: Option<String>,
        /// Source currency code, e.g. USD
        from: Option<String>,
        /// Target currency code, e.g. IDR
        to: Option<String>,
    },
    /// Interactive converter with live rates
    Live {
        /// Source currency code, e.g. USD
        from: Option<String>,
        /// Target currency code, e.g. IDR
        to: Option<String>,
    },
    /// List supported currencies
    Currencies {
        /// Filter by code or name
        query: Option<String>,
    },
    /// Add or remove a favorite currency
    Favorite {
        /// Currency code to toggle, e.g. JPY
        code: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => kurs::cli::setup::setup(),
        Some(cmd) => kurs::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
