//! Data models for fact verification

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Separator between the parts of a serialized triple
pub const TRIPLE_SEPARATOR: &str = " | ";

/// Fact (RDF-style triple) exactly as read from the input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Parts in subject, predicate, object order
    pub fn to_parts(&self) -> [String; 3] {
        [
            self.subject.clone(),
            self.predicate.clone(),
            self.object.clone(),
        ]
    }
}

/// Reasons an input triple entry cannot be verified
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripleParseError {
    #[error("Item is not a string")]
    NotText,

    #[error("expected 3 parts separated by '{separator}', found {parts}", separator = TRIPLE_SEPARATOR)]
    Malformed { parts: usize },
}

/// Parse a `"subject | predicate | object"` entry
pub fn parse_triple(entry: &Value) -> Result<Triple, TripleParseError> {
    let text = entry.as_str().ok_or(TripleParseError::NotText)?;
    let parts: Vec<&str> = text.split(TRIPLE_SEPARATOR).collect();

    match parts.as_slice() {
        [subject, predicate, object] => Ok(Triple::new(*subject, *predicate, *object)),
        _ => Err(TripleParseError::Malformed { parts: parts.len() }),
    }
}

/// One input record: a source identifier and its serialized triples
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputRecord {
    #[serde(rename = "title", alias = "id", default)]
    pub source_id: Value,

    #[serde(rename = "output", alias = "triples", default)]
    pub triples: Vec<Value>,
}

impl InputRecord {
    pub fn new(source_id: impl Into<Value>, triples: Vec<Value>) -> Self {
        Self {
            source_id: source_id.into(),
            triples,
        }
    }

    /// Identifier as display text (`null` when absent)
    pub fn source_label(&self) -> String {
        match &self.source_id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Outcome of verifying one triple, as written to the output file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRecord {
    #[serde(rename = "webnlg_id")]
    pub source_id: Value,

    pub triple: [String; 3],

    #[serde(rename = "generated_query")]
    pub query: String,

    #[serde(rename = "exists_in_dbpedia")]
    pub exists: bool,
}

impl VerificationRecord {
    pub fn new(source_id: Value, triple: &Triple, query: String, exists: bool) -> Self {
        Self {
            source_id,
            triple: triple.to_parts(),
            query,
            exists,
        }
    }
}
