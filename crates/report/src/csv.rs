//! CSV serialization and file delivery of orchestrator results.
//!
//! The export carries one data row per (implementation, iteration) pair.
//! Every entry present in the result is exported, including implementations
//! a table view's allow-list filtered out, and rows carry the raw wire
//! identifier rather than the display label. Both are observed behavior of
//! the dashboard this export mirrors; see DESIGN.md before changing either.

use std::fs;
use std::io;
use std::path::Path;

use ormbench_core::OrchestratorResult;

/// Default export file name.
pub const DEFAULT_FILE_NAME: &str = "metrics.csv";

/// Column order of the export, fixed.
pub const HEADERS: [&str; 13] = [
    "query",
    "description",
    "implementation",
    "iteration",
    "elapsed",
    "result",
    "delta",
    "status",
    "gcCount",
    "heapUsedAvg",
    "allocatedInsideTLAB",
    "allocatedOutsideTLAB",
    "totalAllocated",
];

/// Quote a cell when its string form contains a comma, double quote, or
/// newline; internal quotes are doubled. Applied to every cell, numeric
/// cells included.
fn quote(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Serialize a result to CSV text.
///
/// Cells are comma-separated, rows newline-separated, with no trailing
/// newline after the last row. Iteration indexes are 1-based in sequence
/// order.
pub fn export_to_string(result: &OrchestratorResult) -> String {
    let mut lines = Vec::with_capacity(result.total_iterations() + 1);
    lines.push(
        HEADERS
            .iter()
            .map(|header| quote(header))
            .collect::<Vec<_>>()
            .join(","),
    );

    for entry in &result.entries {
        for (index, iteration) in entry.metrics.iteration_results.iter().enumerate() {
            let sample = &iteration.jfr;
            let cells = [
                quote(&result.query),
                quote(&result.description),
                quote(&entry.key),
                quote(&(index + 1).to_string()),
                quote(&iteration.elapsed.to_string()),
                quote(&iteration.result.to_string()),
                quote(&iteration.delta.to_string()),
                quote(&iteration.status),
                quote(&sample.gc_count.to_string()),
                quote(&sample.heap_used_avg.to_string()),
                quote(&sample.allocated_inside_tlab.to_string()),
                quote(&sample.allocated_outside_tlab.to_string()),
                quote(&sample.total_allocated.to_string()),
            ];
            lines.push(cells.join(","));
        }
    }

    lines.join("\n")
}

/// Write the export to disk under `path`.
///
/// Single best-effort attempt; I/O errors propagate to the caller. The text
/// is `text/csv;charset=utf-8` content, [`DEFAULT_FILE_NAME`] being the
/// conventional name.
pub fn write_csv(result: &OrchestratorResult, path: impl AsRef<Path>) -> io::Result<()> {
    fs::write(path, export_to_string(result))
}
