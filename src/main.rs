use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxr::core::log::init_logging;

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

impl From<Commands> for fxr::AppCommand {
    fn from(cmd: Commands) -> fxr::AppCommand {
        match cmd {
            Commands::Currencies => fxr::AppCommand::Currencies,
            Commands::Convert { from, to, amount } => {
                fxr::AppCommand::Convert { from, to, amount }
            }
            Commands::Refresh => fxr::AppCommand::Refresh,
            Commands::Watch => fxr::AppCommand::Watch,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List all available currency codes
    Currencies,
    /// Convert an amount between two currencies
    Convert {
        /// Currency code to convert from (e.g. USD)
        from: String,
        /// Currency code to convert to (e.g. EUR)
        to: String,
        /// Amount to convert, must be greater than 0
        amount: f64,
    },
    /// Fetch the latest rates and replace the stored snapshot
    Refresh,
    /// Run the daily refresh schedule in the foreground
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxr::cli::setup::setup(),
        Some(cmd) => fxr::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
