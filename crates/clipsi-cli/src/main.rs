//! Clipsi CLI
//!
//! Command-line interface for Clipsi - categorized bookmarks.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use clipsi_core::{Config, NewLink, Session, Store};

mod commands;
mod output;
mod prompt;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "clipsi")]
#[command(about = "Clipsi - Organize links into categories")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use a specific config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// Manage categories
    #[command(alias = "cat")]
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Manage links
    Link {
        #[command(subcommand)]
        command: LinkCommands,
    },
    /// Search links in every category
    Search {
        /// Text to look for in name, URL, description or category
        query: String,
    },
    /// Delete every category and link
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show storage location and counts
    Status,
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// Create a new category
    #[command(alias = "create")]
    Add {
        /// Category name
        name: String,
    },
    /// List all categories
    #[command(alias = "ls")]
    List,
    /// Delete a category and all of its links
    #[command(alias = "rm")]
    Delete {
        /// Category name
        name: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum LinkCommands {
    /// Add a link to a category
    #[command(alias = "add")]
    Create {
        /// URL to save
        url: String,
        /// Category to add the link to
        #[arg(short, long)]
        category: Option<String>,
        /// Display name (defaults to the URL)
        #[arg(short, long, default_value = "")]
        name: String,
        /// Description
        #[arg(short, long, default_value = "")]
        desc: String,
    },
    /// List links
    #[command(alias = "ls")]
    List {
        /// Only show links in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Filter by text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show link details
    Show {
        /// Link ID (full or prefix)
        id: String,
    },
    /// Open a link in the browser
    Open {
        /// Link ID (full or prefix)
        id: String,
    },
    /// Delete a link
    #[command(alias = "rm")]
    Delete {
        /// Link ID (full or prefix)
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, seed_sample, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands work without opening the store
    if let Some(Commands::Config { command }) = &cli.command {
        return match command {
            Some(ConfigCommands::Show) | None => commands::config::show(config_path, &output),
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key.clone(), value.clone(), config_path, &output)
            }
        };
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    // Handle TUI (default when no command given)
    let Some(command) = cli.command else {
        return tui::run(config);
    };
    if matches!(command, Commands::Tui) {
        return tui::run(config);
    }

    init_cli_logging();

    let store = Store::open_with_config(config)?;
    let mut session = Session::new(store);

    match command {
        Commands::Tui | Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Category { command } => handle_category_command(command, &mut session, &output),
        Commands::Link { command } => handle_link_command(command, &mut session, &output),
        Commands::Search { query } => commands::link::search(&mut session, query, &output),
        Commands::Clear { yes } => commands::clear::clear(&mut session, yes, &output),
        Commands::Status => commands::status::show(&session, &output),
    }
}

fn handle_category_command(
    command: CategoryCommands,
    session: &mut Session,
    output: &Output,
) -> Result<()> {
    match command {
        CategoryCommands::Add { name } => commands::category::add(session, name, output),
        CategoryCommands::List => commands::category::list(session, output),
        CategoryCommands::Delete { name, yes } => {
            commands::category::delete(session, name, yes, output)
        }
    }
}

fn handle_link_command(command: LinkCommands, session: &mut Session, output: &Output) -> Result<()> {
    match command {
        LinkCommands::Create {
            url,
            category,
            name,
            desc,
        } => {
            let input = NewLink::new(url).name(name).desc(desc);
            commands::link::create(session, category, input, output)
        }
        LinkCommands::List { category, search } => {
            commands::link::list(session, category, search, output)
        }
        LinkCommands::Show { id } => commands::link::show(session, id, output),
        LinkCommands::Open { id } => commands::link::open(session, id, output),
        LinkCommands::Delete { id, yes } => commands::link::delete(session, id, yes, output),
    }
}

/// Initialize stderr logging for subcommands
///
/// Only initializes if CLIPSI_LOG environment variable is set.
fn init_cli_logging() {
    let Ok(log_level) = std::env::var("CLIPSI_LOG") else {
        return;
    };

    let env_filter = EnvFilter::new(format!(
        "clipsi_core={},clipsi_cli={}",
        log_level, log_level
    ));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
