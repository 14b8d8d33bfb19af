//! SiftQL command-line interface

use clap::{Parser, Subcommand};
use siftql::cli::{check, execute, output, tree};
use std::path::PathBuf;

/// SiftQL command-line tool
#[derive(Parser)]
#[command(name = "siftql")]
#[command(author, version, about = "SiftQL query tools", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a query and print its selection tree as JSON
    Tree {
        /// Query text (`-` reads stdin)
        query: Option<String>,

        /// Read the query from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Reject comments instead of stripping them
        #[arg(long)]
        no_comments: bool,

        /// Pretty-print output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Parse a query and report the outcome
    Check {
        /// Query text (`-` reads stdin)
        query: Option<String>,

        /// Read the query from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Reject comments instead of stripping them
        #[arg(long)]
        no_comments: bool,
    },

    /// Execute a query against a JSON data file
    Execute {
        /// Query text (`-` reads stdin)
        query: Option<String>,

        /// Read the query from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// JSON data the query resolves against
        #[arg(short, long)]
        data: PathBuf,

        /// Reject comments instead of stripping them
        #[arg(long)]
        no_comments: bool,

        /// Fetch sibling fields concurrently
        #[arg(short, long)]
        concurrent: bool,

        /// Pretty-print output
        #[arg(short, long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let result = match cli.command {
        Commands::Tree {
            query,
            file,
            no_comments,
            pretty,
        } => {
            let config = tree::TreeConfig {
                query,
                file,
                no_comments,
                pretty,
            };
            tree::run(config)
        }

        Commands::Check {
            query,
            file,
            no_comments,
        } => {
            let config = check::CheckConfig {
                query,
                file,
                no_comments,
            };
            check::run(config)
        }

        Commands::Execute {
            query,
            file,
            data,
            no_comments,
            concurrent,
            pretty,
        } => {
            let config = execute::ExecuteConfig {
                query,
                file,
                data,
                no_comments,
                concurrent,
                pretty,
            };
            execute::run(config).await
        }
    };

    if let Err(e) = result {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}
