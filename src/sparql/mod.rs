//! SPARQL ASK plumbing
//!
//! The resolver only sees the [`QueryExecutor`] capability:
//! - `ask` runs one boolean existence check over both predicate namespaces
//! - failures surface as a negative [`AskOutcome`], never as an error
//!
//! [`SparqlClient`] is the HTTP implementation; tests plug in stubs.

pub mod client;
pub mod query;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use client::{SparqlClient, SparqlError};
pub use query::AskQueryBuilder;

/// Result of a single ASK query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskOutcome {
    pub exists: bool,
    pub query: String,
}

impl AskOutcome {
    pub fn new(exists: bool, query: impl Into<String>) -> Self {
        Self {
            exists,
            query: query.into(),
        }
    }
}

/// Capability to check whether a triple pattern exists in the knowledge base
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Ask whether `subject predicate object` holds under either namespace
    ///
    /// `subject` and `object` are serialized terms; `predicate` is the bare
    /// local name. Transport and parse failures must come back as
    /// `exists == false` together with the query that was attempted.
    async fn ask(&self, subject: &str, predicate: &str, object: &str) -> AskOutcome;
}
