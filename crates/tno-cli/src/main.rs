//! CLI host adapter for the threat and opportunity annotator.

mod commands;
mod store;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tno",
    about = "Threat & Opportunity: annotate skill-check roll messages",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a roll total against a difficulty
    Classify {
        /// Roll total
        #[arg(allow_hyphen_values = true)]
        total: i64,

        /// Target difficulty
        #[arg(allow_hyphen_values = true)]
        dc: i64,
    },

    /// Print the margin-to-band table
    Table {
        /// Lowest margin to show
        #[arg(long, default_value = "-12", allow_hyphen_values = true)]
        from: i64,

        /// Highest margin to show
        #[arg(long, default_value = "12", allow_hyphen_values = true)]
        to: i64,
    },

    /// Run a roll notification against a message file, annotating it in place
    Annotate {
        /// JSON message file (rewritten when annotated)
        #[arg(short, long)]
        message: PathBuf,

        /// JSON roll notification file
        #[arg(short, long)]
        event: PathBuf,

        /// JSON annotator config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// JSON label catalog, overlaid on the English labels
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Report how a roll notification would be handled, without writing
    Inspect {
        /// JSON roll notification file
        #[arg(short, long)]
        event: PathBuf,

        /// JSON message file, read for its processed marker
        #[arg(short, long)]
        message: Option<PathBuf>,

        /// JSON annotator config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("TNO_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Classify { total, dc } => commands::classify::run(total, dc),
        Commands::Table { from, to } => commands::table::run(from, to),
        Commands::Annotate {
            message,
            event,
            config,
            catalog,
        } => commands::annotate::run(&message, &event, config.as_deref(), catalog.as_deref()),
        Commands::Inspect {
            event,
            message,
            config,
        } => commands::inspect::run(&event, message.as_deref(), config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
