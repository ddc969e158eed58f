// Copyright 2025 ORM Benchmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP clients for the benchmark orchestrator service.
//!
//! The orchestrator fans a query out to the selected ORM implementations and
//! aggregates their timing/memory statistics. This crate consumes that HTTP
//! surface: the per-query execution endpoint, the query catalog, and the
//! earlier-schema listing and single-implementation endpoints.
//!
//! Requests are stateless and safe to repeat. There is no retry, no caching,
//! and no cancellation signal beyond dropping the pending future; failures
//! surface as a single generic error kind.
//!
//! # Example
//!
//! ```ignore
//! use ormbench_client::{OrchestratorClient, QueryOrchestrator, QueryRequest};
//!
//! let client = OrchestratorClient::new("http://localhost:8100")?;
//! let request = QueryRequest::new("q1")
//!     .services(["jooq", "jdbc"])
//!     .repetitions(3);
//! let decoded = client.run_query(&request).await?;
//! ```

mod orchestrator;

pub use orchestrator::{
    ClientError, OrchestratorClient, QueryOrchestrator, QueryRequest, DEFAULT_BASE_URL,
};
