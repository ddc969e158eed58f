//! Command-line interface for the ORM benchmark orchestrator.
//!
//! This crate provides the `ormbench` binary: it executes benchmark queries
//! against the orchestrator service, renders the timing/memory summary, and
//! exports per-iteration results as CSV. Flags mirror the shareable state of
//! the dashboard this tool replaces: query identifier, implementation
//! selection, repetition count.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

mod commands;
pub mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ormbench_client::OrchestratorClient;
use tracing_subscriber::EnvFilter;

/// ORM benchmark CLI.
#[derive(Parser, Debug)]
#[command(name = "ormbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Orchestrator base URL. Overrides ORMBENCH_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute one query across the selected implementations and render
    /// the timing/memory summary.
    Run {
        /// Query identifier (e.g. q1).
        #[arg(short, long)]
        query: String,

        /// Comma-separated implementation identifiers. All when omitted.
        #[arg(short, long, value_delimiter = ',')]
        services: Vec<String>,

        /// Number of repetitions per implementation.
        #[arg(short, long, default_value_t = 1)]
        repetitions: u32,

        /// Write a CSV export, to metrics.csv when no path is given.
        #[arg(short, long, num_args = 0..=1, default_missing_value = ormbench_report::csv::DEFAULT_FILE_NAME)]
        output: Option<PathBuf>,

        /// Also print the per-iteration breakdown.
        #[arg(short, long)]
        iterations: bool,
    },

    /// List the query catalog with descriptions.
    Queries,

    /// List the benchmarkable implementations.
    Services,

    /// Execute one query against a single implementation (legacy endpoint).
    Single {
        /// Implementation endpoint identifier.
        #[arg(short, long)]
        microservice: String,

        /// Query identifier.
        #[arg(short, long)]
        query: String,
    },
}

/// Run the CLI with the given arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the command fails.
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let settings = settings::Settings::load(cli.base_url)?;
    let client = OrchestratorClient::new(&settings.base_url)?;

    match cli.command {
        Commands::Run {
            query,
            services,
            repetitions,
            output,
            iterations,
        } => {
            commands::run_benchmark(
                &client,
                commands::RunArgs {
                    query,
                    services,
                    repetitions,
                    output,
                    iterations,
                },
            )
            .await
        }
        Commands::Queries => commands::list_queries(&client).await,
        Commands::Services => commands::list_services(&client).await,
        Commands::Single {
            microservice,
            query,
        } => commands::run_single(&client, &microservice, &query).await,
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}
