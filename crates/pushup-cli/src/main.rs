use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pushup", version, about = "Push-up tracker CLI")]
struct Cli {
    /// Data directory holding config.toml and the record database
    #[arg(long, global = true, env = "PUSHUP_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's record, creating it if needed
    Today {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Mark today as done
    Complete {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Current and longest streak
    Streak {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Yearly calendar
    Calendar {
        /// Year to show (defaults to the current year)
        #[arg(long)]
        year: Option<String>,
        /// Print the raw projection as JSON
        #[arg(long)]
        json: bool,
    },
    /// Preview the target progression
    Progression {
        /// Last day to show
        #[arg(long, default_value = "30")]
        days: u32,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = commands::Context::new(cli.data_dir);

    let result = match cli.command {
        Commands::Today { json } => commands::day::today(&ctx, json),
        Commands::Complete { json } => commands::day::complete(&ctx, json),
        Commands::Streak { json } => commands::day::streak(&ctx, json),
        Commands::Calendar { year, json } => commands::calendar::run(&ctx, year.as_deref(), json),
        Commands::Progression { days, json } => commands::progression::run(days, json),
        Commands::Config { action } => commands::config::run(&ctx, action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
