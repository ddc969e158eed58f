//! Markdown rendering of benchmark summaries.

use crate::summary::SummaryRow;
use std::fmt::Write;

/// Render the per-implementation summary table.
pub fn render_summary(rows: &[SummaryRow]) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "| Name | Repetitions | Avg Time (ms) | Avg Memory (B) | Max Time (ms) | Min Time (ms) | Max Memory (B) | Min Memory (B) |"
    )
    .unwrap();
    writeln!(
        output,
        "|------|-------------|---------------|----------------|---------------|---------------|----------------|----------------|"
    )
    .unwrap();

    for row in rows {
        writeln!(
            output,
            "| {} | {} | {} | {} | {} | {} | {} | {} |",
            row.name,
            row.repetition,
            row.average_execution_time,
            row.average_memory_usage,
            row.max_execution_time,
            row.min_execution_time,
            row.max_memory_usage,
            row.min_memory_usage
        )
        .unwrap();
    }

    output
}

/// Render the per-iteration breakdown for one summary row.
pub fn render_iterations(row: &SummaryRow) -> String {
    let mut output = String::new();

    writeln!(output, "| Iteration | Time (ms) | Memory (B) |").unwrap();
    writeln!(output, "|-----------|-----------|------------|").unwrap();

    for (index, iteration) in row.iteration_results.iter().enumerate() {
        writeln!(
            output,
            "| {} | {} | {} |",
            index + 1,
            iteration.elapsed,
            iteration.delta
        )
        .unwrap();
    }

    output
}
