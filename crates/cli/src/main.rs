//! SmartChip CLI: the main entry point.
//!
//! Commands:
//! - `compute`: Compute chips for a JSON request or a preset
//! - `validate`: Check a request without running any module
//! - `merchants`: Inspect the merchant catalog
//! - `presets`: List the built-in scenarios
//! - `config`: Show or locate the settings file

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "smartchip",
    about = "SmartChip: quick-reply chip engine for conversational commerce",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute chips and print the response JSON
    Compute {
        /// Request file, or `-` for stdin (the default)
        #[arg(short, long, conflicts_with = "preset")]
        input: Option<String>,

        /// Run a built-in scenario instead of reading a request
        #[arg(short, long)]
        preset: Option<String>,

        /// Pretty-print the response
        #[arg(long)]
        pretty: bool,
    },

    /// Validate a request and print the diagnostics
    Validate {
        /// Request file, or `-` for stdin (the default)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Merchant catalog commands
    Merchants {
        #[command(subcommand)]
        command: MerchantsCommand,
    },

    /// List the built-in presets
    Presets,

    /// Settings commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum MerchantsCommand {
    /// List merchant ids
    List,
    /// Print the engine config a merchant resolves to
    Show {
        /// Merchant id
        id: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective settings as TOML
    Show,
    /// Print the settings file path
    Path,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compute {
            input,
            preset,
            pretty,
        } => commands::compute::run(input, preset, pretty)?,
        Commands::Validate { input } => commands::validate::run(input)?,
        Commands::Merchants { command } => match command {
            MerchantsCommand::List => commands::merchants::list()?,
            MerchantsCommand::Show { id } => commands::merchants::show(&id)?,
        },
        Commands::Presets => commands::presets::list()?,
        Commands::Config { command } => match command {
            ConfigCommand::Show => commands::config_cmd::show()?,
            ConfigCommand::Path => commands::config_cmd::path()?,
        },
    }

    Ok(())
}
