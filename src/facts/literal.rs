//! Serialization of cleaned values into SPARQL resource and literal terms

use serde::{Deserialize, Serialize};
use std::fmt;

pub const RESOURCE_NAMESPACE: &str = "http://dbpedia.org/resource/";
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

/// Type tag of a candidate term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralKind {
    Resource,
    LangLiteral,
    PlainLiteral,
    XsdString,
    Date,
    Year,
    Integer,
    Double,
}

impl LiteralKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiteralKind::Resource => "resource",
            LiteralKind::LangLiteral => "lang_literal",
            LiteralKind::PlainLiteral => "plain_literal",
            LiteralKind::XsdString => "xsd_string",
            LiteralKind::Date => "date",
            LiteralKind::Year => "year",
            LiteralKind::Integer => "integer",
            LiteralKind::Double => "double",
        }
    }

    /// XSD datatype local name for explicitly typed kinds
    fn xsd_type(&self) -> Option<&'static str> {
        match self {
            LiteralKind::XsdString => Some("string"),
            LiteralKind::Date => Some("date"),
            LiteralKind::Year => Some("gYear"),
            LiteralKind::Integer => Some("integer"),
            LiteralKind::Double => Some("double"),
            LiteralKind::Resource | LiteralKind::LangLiteral | LiteralKind::PlainLiteral => None,
        }
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A serialized object term together with its type tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLiteral {
    pub term: String,
    pub kind: LiteralKind,
}

impl CandidateLiteral {
    /// Render `value` as a term of the given kind
    pub fn new(value: &str, kind: LiteralKind) -> Self {
        let term = match kind {
            LiteralKind::Resource => as_resource(value),
            LiteralKind::LangLiteral => as_language_literal(value),
            LiteralKind::PlainLiteral => as_plain_literal(value),
            _ => typed(value, kind),
        };
        Self { term, kind }
    }
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

fn typed(value: &str, kind: LiteralKind) -> String {
    match kind.xsd_type() {
        Some(datatype) => format!("{}^^<{}{}>", quoted(value), XSD_NAMESPACE, datatype),
        None => quoted(value),
    }
}

pub fn as_resource(value: &str) -> String {
    format!("<{}{}>", RESOURCE_NAMESPACE, value.replace(' ', "_"))
}

pub fn as_language_literal(value: &str) -> String {
    format!("{}@en", quoted(value))
}

pub fn as_plain_literal(value: &str) -> String {
    quoted(value)
}

pub fn as_typed_string_literal(value: &str) -> String {
    typed(value, LiteralKind::XsdString)
}

pub fn as_date_literal(value: &str) -> String {
    typed(value, LiteralKind::Date)
}

pub fn as_year_literal(value: &str) -> String {
    typed(value, LiteralKind::Year)
}

pub fn as_integer_literal(value: &str) -> String {
    typed(value, LiteralKind::Integer)
}

pub fn as_double_literal(value: &str) -> String {
    typed(value, LiteralKind::Double)
}

/// Render a double the way the knowledge base's loaders wrote them
///
/// Shortest round-trip digits, `.0` on integral values, and exponent form
/// (`1e-05`, `1.5e+300`) outside `[1e-4, 1e16)`.
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let scientific = format!("{:e}", value);
        let (mantissa, exponent) = scientific
            .split_once('e')
            .unwrap_or((scientific.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
    }

    let plain = value.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{}.0", plain)
    }
}

/// Canonical decimal form of an integer string (`+42` -> `42`, `-007` -> `-7`)
///
/// Works on the digits as text, so integers of any length are accepted.
/// Returns `None` unless the text is an optional sign followed by ASCII digits.
pub fn canonical_integer(value: &str) -> Option<String> {
    let (negative, digits) = match value.as_bytes().first()? {
        b'-' => (true, &value[1..]),
        b'+' => (false, &value[1..]),
        _ => (false, value),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Some("0".to_string());
    }
    Some(if negative {
        format!("-{}", significant)
    } else {
        significant.to_string()
    })
}
