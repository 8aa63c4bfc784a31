//! CLI frontend for the Not the End token bag.

mod commands;

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::RuleArgs;

#[derive(Parser)]
#[command(
    name = "nte",
    about = "Not the End token bag: draw tokens to resolve tests",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session at the table
    Play {
        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Resolve a single test and print the result
    Test {
        #[command(flatten)]
        rules: RuleArgs,

        /// Take the risk once the base draws are made
        #[arg(long)]
        risk: bool,

        /// Start the test under confusion
        #[arg(long)]
        confused: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the chance of success for a bag
    Odds {
        #[command(flatten)]
        rules: RuleArgs,

        /// Number of simulated tests to compare against
        #[arg(short = 'n', long, default_value = "10000")]
        trials: u32,
    },

    /// List the difficulty tiers
    Tiers,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { rules } => rules.to_config().and_then(commands::play::run),
        Commands::Test {
            rules,
            risk,
            confused,
            json,
        } => rules
            .to_config()
            .and_then(|config| commands::resolve::run(config, risk, confused, json)),
        Commands::Odds { rules, trials } => rules
            .to_config()
            .and_then(|config| commands::odds::run(&config, trials)),
        Commands::Tiers => commands::tiers::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
