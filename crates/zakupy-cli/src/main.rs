#![forbid(unsafe_code)]

mod cmd;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use output::OutputMode;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use zakupy_core::config;
use zakupy_core::storage::{JsonStorage, Store};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "zakupy: a local-first shopping list",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Skip confirmation prompts.
    #[arg(short, long, global = true)]
    yes: bool,

    /// Override the data directory.
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Add an item to the shopping list",
        after_help = "EXAMPLES:\n    # Add to an existing location\n    zk add Milk --quantity 2 --location Supermarket\n\n    # Add with a new location, saving a recurring template too\n    zk add Bread --new-location Bakery --recurring"
    )]
    Add(cmd::add::AddArgs),

    #[command(
        about = "Show the shopping list grouped by location",
        after_help = "EXAMPLES:\n    # Human-readable groups\n    zk list\n\n    # Machine-readable output\n    zk list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        about = "Check or uncheck items",
        after_help = "EXAMPLES:\n    # Toggle one item\n    zk check m1abcd2efgh\n\n    # Toggle a whole location group\n    zk check --location Bakery"
    )]
    Check(cmd::check::CheckArgs),

    #[command(about = "Collapse or expand a location group in the list view")]
    Hide(cmd::hide::HideArgs),

    #[command(subcommand, about = "Manage locations")]
    Location(cmd::locations::LocationCommands),

    #[command(subcommand, about = "Manage recurring items")]
    Recurring(cmd::recurring::RecurringCommands),

    #[command(subcommand, about = "Browse and restore completed items")]
    History(cmd::history::HistoryCommands),

    #[command(
        about = "Import recurring items from a JSON file",
        after_help = "EXAMPLES:\n    # Replace recurring items with the file's contents\n    zk import backup.json --yes"
    )]
    Import(cmd::import::ImportArgs),

    #[command(
        about = "Export recurring items to JSON",
        after_help = "EXAMPLES:\n    # Write to a file\n    zk export --output backup.json\n\n    # Print to stdout\n    zk export"
    )]
    Export(cmd::export::ExportArgs),

    #[command(about = "Load sample data")]
    Demo(cmd::demo::DemoArgs),

    #[command(about = "Delete the active list, recurring items, and locations")]
    Clear(cmd::clear::ClearArgs),
}

/// Everything a command handler needs.
pub struct Ctx {
    pub store: Store<JsonStorage>,
    pub mode: OutputMode,
    pub assume_yes: bool,
    pub default_color: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = config::load_user_config()?;
    let data_dir = config::resolve_data_dir(cli.data_dir.clone(), &config);
    debug!(data_dir = %data_dir.display(), policy = ?config.read_policy, "opening store");
    let store = Store::new(JsonStorage::new(data_dir)).with_policy(config.read_policy);

    let ctx = Ctx {
        store,
        mode: cli.output_mode(),
        assume_yes: cli.yes,
        default_color: config.default_color,
    };

    match cli.command {
        Commands::Add(args) => cmd::add::run(&args, &ctx),
        Commands::List(args) => cmd::list::run(&args, &ctx),
        Commands::Check(args) => cmd::check::run(&args, &ctx),
        Commands::Hide(args) => cmd::hide::run(&args, &ctx),
        Commands::Location(command) => cmd::locations::run(&command, &ctx),
        Commands::Recurring(command) => cmd::recurring::run(&command, &ctx),
        Commands::History(command) => cmd::history::run(&command, &ctx),
        Commands::Import(args) => cmd::import::run(&args, &ctx),
        Commands::Export(args) => cmd::export::run(&args, &ctx),
        Commands::Demo(args) => cmd::demo::run(&args, &ctx),
        Commands::Clear(args) => cmd::clear::run(&args, &ctx),
    }
}
