// Copyright 2025 ORM Benchmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! Orchestrator response types and the defensive decoder.
//!
//! The orchestrator answers one query execution with a JSON object carrying
//! `query` and `description` metadata plus one entry per implementation that
//! ran, keyed by wire identifier and ordered by execution. Entries whose
//! value is not an object are dropped by the decoder rather than failing the
//! whole response; the dropped keys are reported back to the caller instead
//! of being lost silently.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while decoding an orchestrator response.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The response body is not a JSON object.
    #[error("response is not a JSON object")]
    NotAnObject,

    /// A required metadata field is missing or has the wrong type.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Runtime measurements sampled during one iteration (wire name `jfr`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeSample {
    /// Garbage collection count.
    pub gc_count: u64,
    /// Average heap in use, bytes.
    pub heap_used_avg: f64,
    /// Bytes allocated inside thread-local allocation buffers.
    #[serde(rename = "allocatedInsideTLAB")]
    pub allocated_inside_tlab: f64,
    /// Bytes allocated outside thread-local allocation buffers.
    #[serde(rename = "allocatedOutsideTLAB")]
    pub allocated_outside_tlab: f64,
    /// Total bytes allocated.
    pub total_allocated: f64,
}

/// One measured run of a query against one implementation.
///
/// Iteration order is execution order; the 1-based iteration index is the
/// position in [`MetricGroup::iteration_results`] plus one. Missing fields
/// decode to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IterationResult {
    /// Execution time, milliseconds.
    pub elapsed: f64,
    /// Result value returned by the benchmarked query. Opaque to this layer.
    pub result: f64,
    /// Memory delta, bytes.
    pub delta: f64,
    /// Per-iteration outcome.
    pub status: String,
    /// Runtime measurements for this iteration.
    pub jfr: RuntimeSample,
}

/// Aggregated statistics for one implementation across repeated runs.
///
/// Aggregates are reported by the orchestrator and carried as given; they
/// are never recomputed from the iteration breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricGroup {
    /// Outcome of the whole run.
    pub status: String,
    /// Count of iterations executed.
    pub repetition: u32,
    /// Average execution time, milliseconds.
    pub average_execution_time: f64,
    /// Maximum execution time, milliseconds.
    pub max_execution_time: f64,
    /// Minimum execution time, milliseconds.
    pub min_execution_time: f64,
    /// Average memory usage, bytes.
    pub average_memory_usage: f64,
    /// Maximum memory usage, bytes.
    pub max_memory_usage: f64,
    /// Minimum memory usage, bytes.
    pub min_memory_usage: f64,
    /// Per-iteration breakdown, in execution order.
    pub iteration_results: Vec<IterationResult>,
}

impl MetricGroup {
    /// Whether the iteration breakdown matches the reported repetition
    /// count. Invariant of a well-formed group.
    pub fn is_well_formed(&self) -> bool {
        self.iteration_results.len() == self.repetition as usize
    }
}

/// A decoded `(implementation key, metrics)` pair, in response order.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricEntry {
    /// Raw wire identifier the entry was keyed by.
    pub key: String,
    /// Aggregated statistics for that implementation.
    pub metrics: MetricGroup,
}

/// Top-level response for one query execution.
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorResult {
    /// Identifier of the executed query.
    pub query: String,
    /// Human-readable query text/description.
    pub description: String,
    /// Per-implementation entries, preserving the response's key order.
    pub entries: Vec<MetricEntry>,
}

/// A decoded response plus the keys of entries the decoder dropped.
#[derive(Debug, Clone)]
pub struct DecodedResult {
    /// The decoded response.
    pub result: OrchestratorResult,
    /// Keys whose value was not a well-formed metrics object.
    pub skipped: Vec<String>,
}

impl OrchestratorResult {
    /// Decode a raw orchestrator response.
    ///
    /// `query` and `description` must be present as strings. Every other
    /// key is treated as an implementation entry; entries that are not
    /// decodable metrics objects are dropped and reported via
    /// [`DecodedResult::skipped`].
    pub fn from_value(value: &Value) -> Result<DecodedResult, DecodeError> {
        let object = value.as_object().ok_or(DecodeError::NotAnObject)?;

        let query = object
            .get("query")
            .and_then(Value::as_str)
            .ok_or(DecodeError::MissingField("query"))?
            .to_string();
        let description = object
            .get("description")
            .and_then(Value::as_str)
            .ok_or(DecodeError::MissingField("description"))?
            .to_string();

        let mut entries = Vec::new();
        let mut skipped = Vec::new();
        for (key, entry) in object {
            if key == "query" || key == "description" {
                continue;
            }
            if !entry.is_object() {
                skipped.push(key.clone());
                continue;
            }
            match serde_json::from_value::<MetricGroup>(entry.clone()) {
                Ok(metrics) => entries.push(MetricEntry {
                    key: key.clone(),
                    metrics,
                }),
                Err(_) => skipped.push(key.clone()),
            }
        }

        Ok(DecodedResult {
            result: OrchestratorResult {
                query,
                description,
                entries,
            },
            skipped,
        })
    }

    /// Look up the metrics entry for a wire identifier.
    pub fn entry(&self, key: &str) -> Option<&MetricGroup> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.metrics)
    }

    /// Total iteration count across all entries.
    pub fn total_iterations(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.metrics.iteration_results.len())
            .sum()
    }
}

/// Result of a single-implementation run (earlier orchestrator schema).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingleRunResult {
    /// Execution time, milliseconds.
    pub elapsed: f64,
    /// Memory delta, bytes.
    pub delta: f64,
    /// Run outcome.
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_response() -> Value {
        json!({
            "query": "Q1) Pricing Summary Report Query",
            "description": "TPC-H Q1 query that reports pricing summary.",
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
                    {
                        "elapsed": 10.0,
                        "result": 4.0,
                        "delta": 1024.0,
                        "status": "OK",
                        "jfr": {
                            "gcCount": 1,
                            "heapUsedAvg": 100.0,
                            "allocatedInsideTLAB": 200.0,
                            "allocatedOutsideTLAB": 50.0,
                            "totalAllocated": 250.0
                        }
                    },
                    {
                        "elapsed": 15.0,
                        "result": 4.0,
                        "delta": 4096.0,
                        "status": "OK",
                        "jfr": {
                            "gcCount": 0,
                            "heapUsedAvg": 110.0,
                            "allocatedInsideTLAB": 210.0,
                            "allocatedOutsideTLAB": 60.0,
                            "totalAllocated": 270.0
                        }
                    }
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
                    {
                        "elapsed": 8.0,
                        "result": 4.0,
                        "delta": 512.0,
                        "status": "OK",
                        "jfr": {
                            "gcCount": 0,
                            "heapUsedAvg": 90.0,
                            "allocatedInsideTLAB": 180.0,
                            "allocatedOutsideTLAB": 40.0,
                            "totalAllocated": 220.0
                        }
                    }
                ]
            }
        })
    }

    #[test]
    fn test_decode_preserves_entry_order() {
        let decoded = OrchestratorResult::from_value(&sample_response()).unwrap();
        let keys: Vec<&str> = decoded
            .result
            .entries
            .iter()
            .map(|e| e.key.as_str())
            .collect();
        assert_eq!(keys, vec!["jooq", "jdbc"]);
        assert!(decoded.skipped.is_empty());
    }

    #[test]
    fn test_decode_metrics_fields() {
        let decoded = OrchestratorResult::from_value(&sample_response()).unwrap();
        let jooq = decoded.result.entry("jooq").unwrap();

        assert_eq!(jooq.repetition, 2);
        assert_eq!(jooq.average_execution_time, 12.5);
        assert!(jooq.is_well_formed());
        assert_eq!(jooq.iteration_results[1].jfr.allocated_inside_tlab, 210.0);
    }

    #[test]
    fn test_decode_skips_non_object_entries() {
        let value = json!({
            "query": "q1",
            "description": "d",
            "jooq": "error",
            "jdbc": null,
            "ebean": {
                "status": "OK",
                "repetition": 0,
                "iterationResults": []
            }
        });

        let decoded = OrchestratorResult::from_value(&value).unwrap();
        assert_eq!(decoded.result.entries.len(), 1);
        assert_eq!(decoded.result.entries[0].key, "ebean");
        assert_eq!(decoded.skipped, vec!["jooq", "jdbc"]);
    }

    #[test]
    fn test_decode_missing_metadata_fails() {
        let value = json!({ "description": "d" });
        let err = OrchestratorResult::from_value(&value).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField("query")));

        let err = OrchestratorResult::from_value(&json!([])).unwrap_err();
        assert!(matches!(err, DecodeError::NotAnObject));
    }

    #[test]
    fn test_decode_defaults_missing_iteration_fields() {
        let value = json!({
            "query": "q1",
            "description": "d",
            "jdbc": {
                "status": "OK",
                "repetition": 1,
                "iterationResults": [ { "elapsed": 3.0 } ]
            }
        });

        let decoded = OrchestratorResult::from_value(&value).unwrap();
        let iteration = &decoded.result.entry("jdbc").unwrap().iteration_results[0];
        assert_eq!(iteration.elapsed, 3.0);
        assert_eq!(iteration.delta, 0.0);
        assert_eq!(iteration.status, "");
        assert_eq!(iteration.jfr, RuntimeSample::default());
    }

    #[test]
    fn test_total_iterations() {
        let decoded = OrchestratorResult::from_value(&sample_response()).unwrap();
        assert_eq!(decoded.result.total_iterations(), 3);
    }

    #[test]
    fn test_well_formed_invariant_detects_mismatch() {
        let group = MetricGroup {
            repetition: 3,
            ..MetricGroup::default()
        };
        assert!(!group.is_well_formed());
    }
}
