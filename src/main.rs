//! CLI entry point for recueil

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recueil::content::LoadPolicy;

#[derive(Parser)]
#[command(name = "recueil")]
#[command(version)]
#[command(about = "Typed content collections for a portfolio site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate collection documents and the navigation tree
    #[command(alias = "c")]
    Check {
        /// Only check this collection
        collection: Option<String>,

        /// Stop at the first invalid document
        #[arg(long, conflicts_with = "lenient")]
        strict: bool,

        /// Collect and report every failure before exiting
        #[arg(long)]
        lenient: bool,
    },

    /// List site content
    List {
        /// Type of content to list (collections, entries, nav)
        #[arg(default_value = "collections")]
        r#type: String,

        /// Emit JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Create a new document in a collection
    New {
        /// Collection to create the document in
        collection: String,

        /// Title of the new document
        title: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "recueil=debug,info"
    } else {
        "recueil=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let site = recueil::Site::new(&base_dir)?;

    match cli.command {
        Commands::Check {
            collection,
            strict,
            lenient,
        } => {
            let policy = if strict {
                Some(LoadPolicy::FailFast)
            } else if lenient {
                Some(LoadPolicy::CollectErrors)
            } else {
                None
            };
            recueil::commands::check::run(&site, collection.as_deref(), policy)?;
            println!("All content valid.");
        }

        Commands::List { r#type, json } => {
            recueil::commands::list::run(&site, &r#type, json)?;
        }

        Commands::New { collection, title } => {
            tracing::info!("Creating new document in `{}`: {}", collection, title);
            recueil::commands::new::run(&site, &collection, &title)?;
        }
    }

    Ok(())
}
