//! Vitrine CLI
//!
//! Inspect the design catalog, print theme CSS, and replay how a URL and a
//! stored preference resolve to a business type.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Business-type design tooling
#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(about = "Inspect and resolve Vitrine business-type designs")]
#[command(version)]
struct Cli {
    /// Configuration file or directory containing vitrine.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every available design
    List {
        /// Label language (fr or en)
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// Print the CSS rule for a design
    Css {
        /// Design key, e.g. `medical`
        design: String,

        /// Selector to wrap the variables in (defaults to `.theme-<key>`)
        #[arg(short, long)]
        selector: Option<String>,
    },

    /// Resolve the design for a URL, running recovery when needed
    Resolve {
        /// Page URL, absolute or relative (e.g. `/?design=medical`)
        #[arg(short, long, default_value = "/")]
        url: String,

        /// JSON file acting as persistent storage
        #[arg(short, long)]
        storage: Option<PathBuf>,

        /// Write the error log as JSON to this file
        #[arg(long)]
        export_errors: Option<PathBuf>,
    },

    /// Switch a page to another design
    Select {
        /// Design key to apply
        design: String,

        #[arg(short, long, default_value = "/")]
        url: String,

        #[arg(short, long)]
        storage: Option<PathBuf>,

        #[arg(long)]
        export_errors: Option<PathBuf>,
    },

    /// Write a default vitrine.toml
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "vitrine=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let load_config = || config::load(cli.config.as_deref());

    match cli.command {
        Command::List { locale } => commands::list(&load_config()?, locale.as_deref()),
        Command::Css { design, selector } => commands::css(&design, selector.as_deref()),
        Command::Resolve {
            url,
            storage,
            export_errors,
        } => {
            commands::resolve(
                &load_config()?,
                &url,
                storage.as_deref(),
                export_errors.as_deref(),
            )
            .await
        }
        Command::Select {
            design,
            url,
            storage,
            export_errors,
        } => {
            commands::select(
                &load_config()?,
                &design,
                &url,
                storage.as_deref(),
                export_errors.as_deref(),
            )
            .await
        }
        Command::Init { dir, force } => commands::init(&dir, force),
    }
}
