// Copyright 2025 ORM Benchmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! Orchestrator and query-catalog HTTP clients.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use ormbench_core::{DecodedResult, OrchestratorResult, SingleRunResult};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Default orchestrator address when no configuration is supplied.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8100";

/// Benchmark runs with high repetition counts are slow on the server side.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Errors surfaced by the orchestrator clients.
///
/// A single failure kind is modeled: non-success statuses, transport
/// failures, and undecodable bodies all collapse into a generic message.
/// Callers must not branch on the cause.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request did not produce a usable response.
    #[error("orchestrator request failed: {0}")]
    RequestFailed(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::RequestFailed(err.to_string())
    }
}

/// Parameters for one orchestrator query execution.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    /// Query identifier, e.g. `q1`.
    pub query: String,
    /// Raw implementation identifiers to run. Empty means the orchestrator
    /// runs every implementation.
    pub services: Vec<String>,
    /// Number of iterations per implementation.
    pub repetitions: u32,
}

impl QueryRequest {
    /// Create a request for `query` with one repetition and no
    /// implementation selection.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            services: Vec::new(),
            repetitions: 1,
        }
    }

    /// Select the implementations to run.
    pub fn services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.services = services.into_iter().map(Into::into).collect();
        self
    }

    /// Set the repetition count.
    pub fn repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Query-string pairs for the execution endpoint. The `services` pair
    /// is omitted entirely when no implementations are selected, not sent
    /// as an empty value.
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("repetitions", self.repetitions.to_string())];
        if !self.services.is_empty() {
            pairs.push(("services", self.services.join(",")));
        }
        pairs
    }
}

/// Async boundary to the benchmark orchestrator service.
///
/// The HTTP implementation is [`OrchestratorClient`]; consumers take the
/// trait so command logic can be exercised against a mock.
#[async_trait]
pub trait QueryOrchestrator: Send + Sync {
    /// Execute one query across the selected implementations.
    async fn run_query(&self, request: &QueryRequest) -> Result<DecodedResult, ClientError>;

    /// Fetch the query catalog: identifier to human-readable description
    /// (including query source text in the current schema).
    async fn query_descriptions(&self) -> Result<BTreeMap<String, String>, ClientError>;

    /// List the query identifiers exposed by the orchestrator (earlier
    /// schema).
    async fn query_endpoints(&self) -> Result<Vec<String>, ClientError>;

    /// List the implementation endpoint identifiers (earlier schema).
    async fn microservice_endpoints(&self) -> Result<Vec<String>, ClientError>;

    /// Execute one query against a single implementation (earlier schema).
    async fn run_single(
        &self,
        microservice: &str,
        query: &str,
    ) -> Result<SingleRunResult, ClientError>;
}

/// HTTP client for the orchestrator service.
pub struct OrchestratorClient {
    http: reqwest::Client,
    base_url: String,
}

impl OrchestratorClient {
    /// Create a client against `base_url`. A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    /// The configured orchestrator address.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "orchestrator request");
        let response = self.http.get(&url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl QueryOrchestrator for OrchestratorClient {
    async fn run_query(&self, request: &QueryRequest) -> Result<DecodedResult, ClientError> {
        let url = format!("{}/orchestrator/{}", self.base_url, request.query);
        debug!(%url, repetitions = request.repetitions, "orchestrator query");

        let response = self
            .http
            .get(&url)
            .query(&request.query_pairs())
            .send()
            .await?
            .error_for_status()?;
        let body: serde_json::Value = response.json().await?;

        let decoded = OrchestratorResult::from_value(&body)
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;
        for key in &decoded.skipped {
            warn!(%key, query = %request.query, "dropped malformed result entry");
        }
        Ok(decoded)
    }

    async fn query_descriptions(&self) -> Result<BTreeMap<String, String>, ClientError> {
        self.get_json("getQueryDescriptions").await
    }

    async fn query_endpoints(&self) -> Result<Vec<String>, ClientError> {
        self.get_json("getQueryEndpoints").await
    }

    async fn microservice_endpoints(&self) -> Result<Vec<String>, ClientError> {
        self.get_json("getMicroserviceEndpoints").await
    }

    async fn run_single(
        &self,
        microservice: &str,
        query: &str,
    ) -> Result<SingleRunResult, ClientError> {
        self.get_json(&format!("{microservice}/{query}")).await
    }
}
