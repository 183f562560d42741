//! HTTP SPARQL endpoint client

use super::query::AskQueryBuilder;
use super::{AskOutcome, QueryExecutor};
use crate::config::SparqlConfig;
use crate::error::{Result, VerifierError};
use crate::metrics::METRICS;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, warn};

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// SPARQL client error types
#[derive(Debug, thiserror::Error)]
pub enum SparqlError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Boolean result document of an ASK query
#[derive(Debug, Deserialize)]
struct AskResponse {
    #[serde(default)]
    boolean: bool,
}

/// SPARQL endpoint client
///
/// One attempt per query, bounded by the configured timeout.
pub struct SparqlClient {
    http: Client,
    config: SparqlConfig,
    builder: AskQueryBuilder,
}

impl SparqlClient {
    /// Create a new SPARQL client
    pub fn new(config: SparqlConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| VerifierError::Internal(e.to_string()))?;

        let builder = AskQueryBuilder::new(
            config.ontology_namespace.clone(),
            config.property_namespace.clone(),
        );

        Ok(Self {
            http,
            config,
            builder,
        })
    }

    /// Query text that `ask` would send for these terms
    pub fn build_query(&self, subject: &str, predicate: &str, object: &str) -> String {
        self.builder.build(subject, predicate, object)
    }

    /// Send one ASK query and read its boolean
    pub async fn execute(&self, query: &str) -> std::result::Result<bool, SparqlError> {
        debug!("Sending ASK query to {}", self.config.endpoint);

        let response = self
            .http
            .get(&self.config.endpoint)
            .query(&[("query", query), ("format", "json")])
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SparqlError::Timeout(e.to_string())
                } else {
                    SparqlError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SparqlError::UpstreamError(format!(
                "Status {}: {}",
                status, error_text
            )));
        }

        let ask_response: AskResponse = response
            .json()
            .await
            .map_err(|e| SparqlError::InvalidResponse(e.to_string()))?;

        Ok(ask_response.boolean)
    }
}

#[async_trait]
impl QueryExecutor for SparqlClient {
    async fn ask(&self, subject: &str, predicate: &str, object: &str) -> AskOutcome {
        let query = self.build_query(subject, predicate, object);
        let start = Instant::now();

        let exists = match self.execute(&query).await {
            Ok(exists) => {
                METRICS.record_ask(exists, start.elapsed());
                exists
            }
            Err(e) => {
                METRICS.record_ask_failure(start.elapsed());
                warn!("A query failed for query {}: {}", query, e);
                false
            }
        };

        AskOutcome::new(exists, query)
    }
}
