//! Fact Verifier
//!
//! Checks whether (subject, predicate, object) facts are asserted in a public
//! SPARQL knowledge base. The object string's RDF type is not known up front,
//! so each fact is turned into an ordered cascade of candidate literal and
//! resource forms, and the first confirmed form decides the answer.

pub mod batch;
pub mod config;
pub mod error;
pub mod facts;
pub mod logging;
pub mod metrics;
pub mod sparql;

pub use batch::{BatchReport, BatchVerifier, VerificationSummary};
pub use crate::config::VerifierConfig;
pub use error::{Result, VerifierError};
pub use facts::{ExistenceResolver, Resolution, Triple, VerificationRecord};
pub use sparql::{AskOutcome, QueryExecutor, SparqlClient};
