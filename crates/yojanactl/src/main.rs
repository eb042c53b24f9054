//! Yojana Control - CLI host for the scheme advisor
//!
//! Runs one advisory turn from flags or a host JSON payload and prints the
//! emitted message with its slot updates.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use yojana_shared::AdvisorConfig;
use yojanactl::commands::{self, TurnAction};
use yojanactl::errors::{exit_code_for, EXIT_SUCCESS};
use yojanactl::logging;

#[derive(Parser)]
#[command(name = "yojanactl")]
#[command(about = "Yojana - public benefit scheme advisor", long_about = None)]
#[command(version = yojana_shared::VERSION)]
struct Cli {
    /// Config file (default: $YOJANA_CONFIG, ~/.config/yojana/config.toml, /etc/yojana/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Unit policy override: assume_lpa or strict
    #[arg(long, global = true)]
    unit_policy: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend schemes for a stated income
    Income {
        /// Message text, e.g. "my income is 2 lakhs"
        text: Vec<String>,

        /// Income amount already stored in the session
        #[arg(long)]
        amount: Option<f64>,

        /// Income unit already stored in the session
        #[arg(long)]
        unit: Option<String>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show details for a scheme
    Scheme {
        /// Message text, e.g. "tell me about pmkisan"
        text: Vec<String>,

        /// Recognized entity as TYPE=VALUE (repeatable)
        #[arg(long = "entity")]
        entities: Vec<String>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a host turn payload (JSON) and print the outcome as JSON
    Turn {
        /// Resolver to run
        #[arg(value_enum)]
        action: TurnAction,

        /// Payload file, "-" or absent for stdin
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// List schemes in the catalog
    Catalog {
        /// Also list keyword aliases in match order
        #[arg(long)]
        aliases: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            eprintln!("[ERROR] {:#}", err);
            exit_code_for(&err)
        }
    };

    std::process::exit(code);
}

fn run(cli: Cli) -> Result<()> {
    let (mut config, origin) =
        AdvisorConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    logging::init(&config.log.level, cli.verbose);
    match &origin {
        Some(path) => debug!(path = %path.display(), "using config file"),
        None => debug!("using built-in defaults"),
    }

    if let Some(policy) = &cli.unit_policy {
        config.set_unit_policy(policy)?;
    }

    match cli.command {
        Commands::Income {
            text,
            amount,
            unit,
            json,
        } => commands::income(&config, &text.join(" "), amount, unit, json),
        Commands::Scheme {
            text,
            entities,
            json,
        } => commands::scheme(&config, &text.join(" "), &entities, json),
        Commands::Turn { action, input } => commands::turn(&config, action, input.as_deref()),
        Commands::Catalog { aliases } => commands::catalog(&config, aliases),
    }
}
