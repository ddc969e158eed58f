//! Result-to-row flattening for tabular display.

use ormbench_core::{Implementation, IterationResult, OrchestratorResult};
use serde::Serialize;

/// One per-implementation row of the results table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    /// Display label, resolved through the static identifier table with a
    /// raw-identifier fallback.
    pub name: String,
    /// Count of iterations executed.
    pub repetition: u32,
    /// Average execution time, milliseconds.
    pub average_execution_time: f64,
    /// Average memory usage, bytes.
    pub average_memory_usage: f64,
    /// Maximum execution time, milliseconds.
    pub max_execution_time: f64,
    /// Minimum execution time, milliseconds.
    pub min_execution_time: f64,
    /// Maximum memory usage, bytes.
    pub max_memory_usage: f64,
    /// Minimum memory usage, bytes.
    pub min_memory_usage: f64,
    /// Per-iteration breakdown, in execution order. Empty when the
    /// response carried none.
    pub iteration_results: Vec<IterationResult>,
}

/// Reduced projection of a summary row carrying only the plotted fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// Display label.
    pub name: String,
    /// Average execution time, milliseconds.
    pub average_execution_time: f64,
    /// Average memory usage, bytes.
    pub average_memory_usage: f64,
    /// Maximum execution time, milliseconds.
    pub max_execution_time: f64,
    /// Minimum execution time, milliseconds.
    pub min_execution_time: f64,
    /// Maximum memory usage, bytes.
    pub max_memory_usage: f64,
    /// Minimum memory usage, bytes.
    pub min_memory_usage: f64,
}

/// Flatten a result into one summary row per allow-listed implementation.
///
/// Entries are retained when their key appears in `allow`; rows keep the
/// response's own entry order, with no further sorting. Aggregates are
/// carried as reported by the orchestrator, never recomputed from the
/// iteration breakdown.
pub fn summarize(result: &OrchestratorResult, allow: &[String]) -> Vec<SummaryRow> {
    result
        .entries
        .iter()
        .filter(|entry| allow.iter().any(|key| key == &entry.key))
        .map(|entry| {
            let metrics = &entry.metrics;
            SummaryRow {
                name: Implementation::label_for(&entry.key).to_string(),
                repetition: metrics.repetition,
                average_execution_time: metrics.average_execution_time,
                average_memory_usage: metrics.average_memory_usage,
                max_execution_time: metrics.max_execution_time,
                min_execution_time: metrics.min_execution_time,
                max_memory_usage: metrics.max_memory_usage,
                min_memory_usage: metrics.min_memory_usage,
                iteration_results: metrics.iteration_results.clone(),
            }
        })
        .collect()
}

/// Project summary rows into the shape charting consumers plot.
pub fn chart_series(rows: &[SummaryRow]) -> Vec<ChartPoint> {
    rows.iter()
        .map(|row| ChartPoint {
            name: row.name.clone(),
            average_execution_time: row.average_execution_time,
            average_memory_usage: row.average_memory_usage,
            max_execution_time: row.max_execution_time,
            min_execution_time: row.min_execution_time,
            max_memory_usage: row.max_memory_usage,
            min_memory_usage: row.min_memory_usage,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ormbench_core::OrchestratorResult;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> OrchestratorResult {
        OrchestratorResult::from_value(&value).unwrap().result
    }

    fn allow(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    fn two_entry_result() -> OrchestratorResult {
        decode(json!({
            "query": "q1",
            "description": "d",
            "jooq": {
                "status": "OK",
                "repetition": 2,
                "averageExecutionTime": 12.5,
                "maxExecutionTime": 15.0,
                "minExecutionTime": 10.0,
                "averageMemoryUsage": 2048.0,
                "maxMemoryUsage": 4096.0,
                "minMemoryUsage": 1024.0,
                "iterationResults": [
                    { "elapsed": 10.0, "result": 4.0, "delta": 1024.0, "status": "OK" },
                    { "elapsed": 15.0, "result": 4.0, "delta": 4096.0, "status": "OK" }
                ]
            },
            "jdbc": {
                "status": "OK",
                "repetition": 1,
                "averageExecutionTime": 8.0,
                "maxExecutionTime": 8.0,
                "minExecutionTime": 8.0,
                "averageMemoryUsage": 512.0,
                "maxMemoryUsage": 512.0,
                "minMemoryUsage": 512.0,
                "iterationResults": [
                    { "elapsed": 8.0, "result": 4.0, "delta": 512.0, "status": "OK" }
                ]
            }
        }))
    }

    #[test]
    fn test_one_row_per_allow_listed_key_in_response_order() {
        let result = two_entry_result();
        let rows = summarize(&result, &allow(&["jdbc", "jooq"]));

        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["JOOQ", "JDBC"]);
    }

    #[test]
    fn test_allow_list_excludes_present_entries() {
        let result = two_entry_result();
        let rows = summarize(&result, &allow(&["jdbc"]));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "JDBC");
        assert_eq!(rows[0].iteration_results.len(), 1);
    }

    #[test]
    fn test_empty_allow_list_yields_no_rows() {
        let result = two_entry_result();
        assert!(summarize(&result, &[]).is_empty());
    }

    #[test]
    fn test_unknown_key_uses_raw_identifier_as_name() {
        let result = decode(json!({
            "query": "q1",
            "description": "d",
            "hibernate": { "status": "OK", "repetition": 0, "iterationResults": [] }
        }));
        let rows = summarize(&result, &allow(&["hibernate"]));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "hibernate");
    }

    #[test]
    fn test_aggregates_are_trusted_not_recomputed() {
        // Average deliberately inconsistent with the single iteration.
        let result = decode(json!({
            "query": "q1",
            "description": "d",
            "jdbc": {
                "status": "OK",
                "repetition": 1,
                "averageExecutionTime": 99.0,
                "iterationResults": [ { "elapsed": 8.0 } ]
            }
        }));
        let rows = summarize(&result, &allow(&["jdbc"]));
        assert_eq!(rows[0].average_execution_time, 99.0);
    }

    #[test]
    fn test_missing_iterations_default_to_empty() {
        let result = decode(json!({
            "query": "q1",
            "description": "d",
            "ebean": { "status": "ERROR", "repetition": 0 }
        }));
        let rows = summarize(&result, &allow(&["ebean"]));
        assert!(rows[0].iteration_results.is_empty());
    }

    #[test]
    fn test_chart_series_projects_plotted_fields() {
        let result = two_entry_result();
        let rows = summarize(&result, &allow(&["jooq", "jdbc"]));
        let points = chart_series(&rows);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].name, "JOOQ");
        assert_eq!(points[0].average_execution_time, 12.5);
        assert_eq!(points[1].max_memory_usage, 512.0);
    }
}
