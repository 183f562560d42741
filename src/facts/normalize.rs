//! Normalization of raw triple text before it is embedded in a query

use serde::{Deserialize, Serialize};

const SINGLE_QUOTE_MARKER: &str = "''";

/// Clean a raw subject, predicate or object string
///
/// Trims whitespace, drops one enclosing pair of double quotes, removes a
/// doubled single-quote marker at each end (`''Foo''` becomes `Foo`) and turns
/// underscores into spaces. Never fails.
pub fn clean(raw: &str) -> String {
    let mut s = raw.trim();

    if s.starts_with('"') && s.ends_with('"') {
        s = if s.len() >= 2 { &s[1..s.len() - 1] } else { "" };
    }

    if let Some(rest) = s.strip_prefix(SINGLE_QUOTE_MARKER) {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix(SINGLE_QUOTE_MARKER) {
        s = rest;
    }

    s.replace('_', " ")
}

/// Triple with every part passed through [`clean`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedTriple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl CleanedTriple {
    pub fn new(subject: &str, predicate: &str, object: &str) -> Self {
        Self {
            subject: clean(subject),
            predicate: clean(predicate),
            object: clean(object),
        }
    }
}
