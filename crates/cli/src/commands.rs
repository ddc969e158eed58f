//! Command implementations.
//!
//! Each command fetches through the [`QueryOrchestrator`] seam and renders
//! through pure string-producing helpers, so command logic is testable
//! against a mocked orchestrator without a network.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use ormbench_client::{QueryOrchestrator, QueryRequest};
use ormbench_core::{DecodedResult, Implementation};
use ormbench_report::{csv, markdown, summarize};
use tracing::warn;

/// Arguments of the `run` subcommand.
pub struct RunArgs {
    /// Query identifier.
    pub query: String,
    /// Raw implementation identifiers to run and display. All when empty.
    pub services: Vec<String>,
    /// Repetitions per implementation.
    pub repetitions: u32,
    /// CSV export target, when requested.
    pub output: Option<PathBuf>,
    /// Whether to print the per-iteration breakdown.
    pub iterations: bool,
}

/// Execute one orchestrator query, render the summary, and optionally
/// export CSV.
pub async fn run_benchmark(api: &dyn QueryOrchestrator, args: RunArgs) -> anyhow::Result<()> {
    let request = QueryRequest::new(&args.query)
        .services(args.services.iter().cloned())
        .repetitions(args.repetitions);

    let spinner = start_spinner(format!("Running {} ...", args.query));
    let outcome = api.run_query(&request).await;
    spinner.finish_and_clear();
    let decoded = outcome?;

    for entry in &decoded.result.entries {
        if !entry.metrics.is_well_formed() {
            warn!(key = %entry.key, "iteration count does not match reported repetition");
        }
    }

    print!("{}", render_run(&decoded, &args.services, args.iterations));

    if let Some(path) = &args.output {
        csv::write_csv(&decoded.result, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!(
            "{} {} ({} rows)",
            "Exported".green(),
            path.display(),
            decoded.result.total_iterations()
        );
    }

    Ok(())
}

/// Fetch and print the query catalog, sorted by identifier.
pub async fn list_queries(api: &dyn QueryOrchestrator) -> anyhow::Result<()> {
    let spinner = start_spinner("Fetching query catalog ...".to_string());
    let outcome = api.query_descriptions().await;
    spinner.finish_and_clear();

    print!("{}", render_catalog(&outcome?));
    Ok(())
}

/// Print the implementation registry, plus the orchestrator's own endpoint
/// listing when reachable.
pub async fn list_services(api: &dyn QueryOrchestrator) -> anyhow::Result<()> {
    println!("Benchmarkable implementations:");
    for implementation in Implementation::ALL {
        println!(
            "  {:<14} {}",
            implementation.key(),
            implementation.display_name()
        );
    }

    match api.microservice_endpoints().await {
        Ok(endpoints) => println!("Orchestrator endpoints: {}", endpoints.join(", ")),
        Err(e) => warn!(error = %e, "endpoint listing unavailable"),
    }
    Ok(())
}

/// Execute one query against a single implementation (legacy endpoint).
pub async fn run_single(
    api: &dyn QueryOrchestrator,
    microservice: &str,
    query: &str,
) -> anyhow::Result<()> {
    let spinner = start_spinner(format!("Running {query} on {microservice} ..."));
    let outcome = api.run_single(microservice, query).await;
    spinner.finish_and_clear();
    let result = outcome?;

    println!("status:  {}", result.status);
    println!("elapsed: {} ms", result.elapsed);
    println!("delta:   {} B", result.delta);
    Ok(())
}

/// Render the `run` output: query metadata, summary table, optional
/// iteration breakdown, and a note for entries dropped during decode.
fn render_run(decoded: &DecodedResult, services: &[String], iterations: bool) -> String {
    let allow: Vec<String> = if services.is_empty() {
        Implementation::ALL
            .iter()
            .map(|i| i.key().to_string())
            .collect()
    } else {
        services.to_vec()
    };
    let rows = summarize(&decoded.result, &allow);

    let mut out = String::new();
    writeln!(out, "# {}", decoded.result.query).unwrap();
    writeln!(out, "{}", decoded.result.description).unwrap();
    writeln!(out).unwrap();
    out.push_str(&markdown::render_summary(&rows));

    if iterations {
        for row in &rows {
            writeln!(out).unwrap();
            writeln!(out, "## {}", row.name).unwrap();
            out.push_str(&markdown::render_iterations(row));
        }
    }

    if !decoded.skipped.is_empty() {
        writeln!(out).unwrap();
        writeln!(
            out,
            "Skipped malformed entries: {}",
            decoded.skipped.join(", ")
        )
        .unwrap();
    }

    out
}

fn render_catalog(catalog: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (id, description) in catalog {
        writeln!(out, "{id}").unwrap();
        for line in description.lines() {
            writeln!(out, "    {line}").unwrap();
        }
    }
    out
}

fn start_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
