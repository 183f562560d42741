//! Existence resolution for triples whose object type is unknown
//!
//! The object string alone does not say whether it is a date, a measurement,
//! a year, a number or an entity. Resolution walks an ordered cascade of
//! rules keyed on the object's surface form:
//!
//! 1. `full_date`   - `YYYY-MM-DD`, one `xsd:date` query
//! 2. `centimetres` - `<n> (centimetres)`, one `xsd:double` query in metres
//! 3. `four_digit`  - `xsd:gYear` first, then `xsd:integer`
//! 4. `numeric`     - one `xsd:double` or `xsd:integer` query
//! 5. `generic`     - resource, `@en` literal, plain literal, `xsd:string`
//!
//! The first rule whose guard matches owns the object. Within its plan the
//! first positive answer wins; otherwise the last answer is reported.

use super::literal::{
    as_resource, canonical_integer, format_double, CandidateLiteral, LiteralKind,
};
use super::models::Triple;
use super::normalize::CleanedTriple;
use crate::metrics::METRICS;
use crate::sparql::{AskOutcome, QueryExecutor};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

static FULL_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("full date pattern is valid")
});

static CENTIMETRES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+\.?[0-9]*)\s*\(centimetres\)").expect("centimetres pattern is valid")
});

static FOUR_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("four digit pattern is valid"));

/// Name of the fallback rule that applies when no cascade rule matches
pub const GENERIC_RULE: &str = "generic";

/// Ordered, non-empty list of candidate terms for one object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePlan {
    pub primary: CandidateLiteral,
    pub fallbacks: Vec<CandidateLiteral>,
}

impl CandidatePlan {
    pub fn single(value: &str, kind: LiteralKind) -> Self {
        Self {
            primary: CandidateLiteral::new(value, kind),
            fallbacks: Vec::new(),
        }
    }

    pub fn ordered(value: &str, first: LiteralKind, rest: &[LiteralKind]) -> Self {
        Self {
            primary: CandidateLiteral::new(value, first),
            fallbacks: rest
                .iter()
                .map(|kind| CandidateLiteral::new(value, *kind))
                .collect(),
        }
    }

    pub fn then(mut self, candidate: CandidateLiteral) -> Self {
        self.fallbacks.push(candidate);
        self
    }

    pub fn candidate_count(&self) -> usize {
        1 + self.fallbacks.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateLiteral> {
        std::iter::once(&self.primary).chain(self.fallbacks.iter())
    }
}

/// A guard on the object's surface form paired with the plan it produces
pub struct Rule {
    pub name: &'static str,
    pub plan: fn(&str) -> Option<CandidatePlan>,
}

/// Cascade rules in priority order; [`GENERIC_RULE`] follows implicitly
pub static CASCADE: &[Rule] = &[
    Rule {
        name: "full_date",
        plan: plan_full_date,
    },
    Rule {
        name: "centimetres",
        plan: plan_centimetres,
    },
    Rule {
        name: "four_digit",
        plan: plan_four_digit,
    },
    Rule {
        name: "numeric",
        plan: plan_numeric,
    },
];

pub fn plan_full_date(object: &str) -> Option<CandidatePlan> {
    FULL_DATE
        .is_match(object)
        .then(|| CandidatePlan::single(object, LiteralKind::Date))
}

pub fn plan_centimetres(object: &str) -> Option<CandidatePlan> {
    let captures = CENTIMETRES.captures(object)?;
    let centimetres: f64 = captures.get(1)?.as_str().parse().ok()?;
    let metres = format_double(centimetres / 100.0);
    Some(CandidatePlan::single(&metres, LiteralKind::Double))
}

/// A bare 4-digit number is either a year or an integer
pub fn plan_four_digit(object: &str) -> Option<CandidatePlan> {
    if !FOUR_DIGIT.is_match(object) {
        return None;
    }
    let integer = canonical_integer(object)?;
    Some(
        CandidatePlan::single(object, LiteralKind::Year)
            .then(CandidateLiteral::new(&integer, LiteralKind::Integer)),
    )
}

pub fn plan_numeric(object: &str) -> Option<CandidatePlan> {
    // Leading zero on a digit string marks an identifier
    if object.len() > 1 && object.starts_with('0') && object.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    if object.contains('.') {
        let value: f64 = object.parse().ok()?;
        Some(CandidatePlan::single(&format_double(value), LiteralKind::Double))
    } else {
        let integer = canonical_integer(object)?;
        Some(CandidatePlan::single(&integer, LiteralKind::Integer))
    }
}

pub fn plan_generic(object: &str) -> CandidatePlan {
    CandidatePlan::ordered(
        object,
        LiteralKind::Resource,
        &[
            LiteralKind::LangLiteral,
            LiteralKind::PlainLiteral,
            LiteralKind::XsdString,
        ],
    )
}

/// Pick the rule that owns a cleaned object and its candidate plan
pub fn plan(object: &str) -> (&'static str, CandidatePlan) {
    CASCADE
        .iter()
        .find_map(|rule| (rule.plan)(object).map(|plan| (rule.name, plan)))
        .unwrap_or_else(|| (GENERIC_RULE, plan_generic(object)))
}

/// Decisive answer for one triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub exists: bool,
    pub query: String,
    pub kind: LiteralKind,
    pub rule: &'static str,
    pub attempts: usize,
}

impl Resolution {
    fn from_outcome(outcome: AskOutcome, kind: LiteralKind, rule: &'static str, attempts: usize) -> Self {
        Self {
            exists: outcome.exists,
            query: outcome.query,
            kind,
            rule,
            attempts,
        }
    }
}

/// Runs the cascade for triples against a query executor
///
/// Holds no per-triple state; each `resolve` call is independent.
#[derive(Clone)]
pub struct ExistenceResolver {
    executor: Arc<dyn QueryExecutor>,
}

impl ExistenceResolver {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    pub async fn resolve_triple(&self, triple: &Triple) -> Resolution {
        self.resolve(&triple.subject, &triple.predicate, &triple.object)
            .await
    }

    /// Resolve a raw triple, issuing at least one query
    pub async fn resolve(&self, subject: &str, predicate: &str, object: &str) -> Resolution {
        let cleaned = CleanedTriple::new(subject, predicate, object);
        let subject_term = as_resource(&cleaned.subject);
        let (rule, plan) = plan(&cleaned.object);

        debug!(
            "Resolving '{}' via rule {} with {} candidate(s)",
            cleaned.object,
            rule,
            plan.candidate_count()
        );

        let CandidatePlan { primary, fallbacks } = plan;
        let mut resolution = self
            .attempt(&subject_term, &cleaned.predicate, primary, rule, 1)
            .await;

        for candidate in fallbacks {
            if resolution.exists {
                break;
            }
            resolution = self
                .attempt(
                    &subject_term,
                    &cleaned.predicate,
                    candidate,
                    rule,
                    resolution.attempts + 1,
                )
                .await;
        }

        METRICS.record_resolution(rule, resolution.kind, resolution.exists);
        resolution
    }

    async fn attempt(
        &self,
        subject_term: &str,
        predicate: &str,
        candidate: CandidateLiteral,
        rule: &'static str,
        attempts: usize,
    ) -> Resolution {
        let outcome = self
            .executor
            .ask(subject_term, predicate, &candidate.term)
            .await;
        debug!(
            "Candidate {} as {}: {}",
            candidate.term, candidate.kind, outcome.exists
        );
        Resolution::from_outcome(outcome, candidate.kind, rule, attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::literal::{
        as_date_literal, as_double_literal, as_integer_literal, as_language_literal,
        as_plain_literal, as_typed_string_literal, as_year_literal,
    };
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Answers true for a fixed set of object terms and records every call
    struct StubExecutor {
        positives: HashSet<String>,
        calls: Mutex<Vec<String>>,
    }

    impl StubExecutor {
        fn new(positives: &[String]) -> Arc<Self> {
            Arc::new(Self {
                positives: positives.iter().cloned().collect(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl QueryExecutor for StubExecutor {
        async fn ask(&self, subject: &str, predicate: &str, object: &str) -> AskOutcome {
            self.calls.lock().unwrap().push(object.to_string());
            AskOutcome::new(
                self.positives.contains(object),
                format!("{} {} {}", subject, predicate, object),
            )
        }
    }

    async fn run(object: &str, positives: &[String]) -> (Resolution, Vec<String>) {
        let stub = StubExecutor::new(positives);
        let resolver = ExistenceResolver::new(stub.clone());
        let resolution = resolver.resolve("Subject", "predicate", object).await;
        (resolution, stub.calls())
    }

    #[test]
    fn test_rule_selection() {
        assert_eq!(plan("1950-03-04").0, "full_date");
        assert_eq!(plan("180 (centimetres)").0, "centimetres");
        assert_eq!(plan("1987").0, "four_digit");
        assert_eq!(plan("42").0, "numeric");
        assert_eq!(plan("3.14").0, "numeric");
        assert_eq!(plan("007").0, GENERIC_RULE);
        assert_eq!(plan("Germany").0, GENERIC_RULE);
    }

    #[test]
    fn test_full_date_requires_exact_shape() {
        assert!(plan_full_date("1950-03-04").is_some());
        assert!(plan_full_date("1950-3-4").is_none());
        assert!(plan_full_date("1950-03-04T00:00").is_none());
    }

    #[test]
    fn test_centimetres_conversion() {
        let plan = plan_centimetres("180 (centimetres)").unwrap();
        assert_eq!(plan.primary.term, as_double_literal("1.8"));
        assert!(plan.fallbacks.is_empty());

        let plan = plan_centimetres("200(centimetres)").unwrap();
        assert_eq!(plan.primary.term, as_double_literal("2.0"));

        let plan = plan_centimetres("175.5 (centimetres) tall").unwrap();
        assert_eq!(plan.primary.term, as_double_literal("1.755"));

        assert!(plan_centimetres("180 (inches)").is_none());
        assert!(plan_centimetres("about 180 (centimetres)").is_none());
    }

    #[test]
    fn test_four_digit_plan_order() {
        let plan = plan_four_digit("0123").unwrap();
        let terms: Vec<_> = plan.iter().map(|c| c.term.clone()).collect();
        assert_eq!(terms, vec![as_year_literal("0123"), as_integer_literal("123")]);
        assert!(plan_four_digit("12345").is_none());
    }

    #[test]
    fn test_numeric_plan() {
        assert_eq!(
            plan_numeric("3.50").unwrap().primary.term,
            as_double_literal("3.5")
        );
        assert_eq!(plan_numeric("+42").unwrap().primary.term, as_integer_literal("42"));
        assert_eq!(plan_numeric("-5").unwrap().primary.term, as_integer_literal("-5"));
        assert_eq!(plan_numeric("0").unwrap().primary.term, as_integer_literal("0"));
        assert_eq!(
            plan_numeric("0.5").unwrap().primary.term,
            as_double_literal("0.5")
        );
        assert!(plan_numeric("007").is_none());
        assert!(plan_numeric("1.2.3").is_none());
        assert!(plan_numeric("St. Louis").is_none());
        assert!(plan_numeric("12 km").is_none());
        assert!(plan_numeric("").is_none());
    }

    #[test]
    fn test_long_integer_stays_numeric() {
        let object = "1234567890123456789012345678901234567890";
        let (rule, plan) = plan(object);
        assert_eq!(rule, "numeric");
        assert_eq!(plan.primary.term, as_integer_literal(object));
        assert!(plan.fallbacks.is_empty());
    }

    #[test]
    fn test_non_ascii_digits_are_text() {
        assert_eq!(plan("١٩٨٧").0, GENERIC_RULE);
        assert_eq!(plan("１２").0, GENERIC_RULE);
    }

    #[test]
    fn test_generic_plan_order() {
        let kinds: Vec<_> = plan_generic("Berlin").iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LiteralKind::Resource,
                LiteralKind::LangLiteral,
                LiteralKind::PlainLiteral,
                LiteralKind::XsdString,
            ]
        );
    }

    #[tokio::test]
    async fn test_date_issues_single_query() {
        let (resolution, calls) = run("1950-03-04", &[]).await;
        assert_eq!(calls, vec![as_date_literal("1950-03-04")]);
        assert!(!resolution.exists);
        assert_eq!(resolution.kind, LiteralKind::Date);

        let (resolution, calls) = run("1950-03-04", &[as_date_literal("1950-03-04")]).await;
        assert_eq!(calls.len(), 1);
        assert!(resolution.exists);
    }

    #[tokio::test]
    async fn test_centimetres_issue_single_query() {
        let (resolution, calls) = run("180 (centimetres)", &[]).await;
        assert_eq!(calls, vec![as_double_literal("1.8")]);
        assert!(!resolution.exists);
        assert_eq!(resolution.rule, "centimetres");
    }

    #[tokio::test]
    async fn test_year_hit_skips_integer() {
        let (resolution, calls) = run("1987", &[as_year_literal("1987")]).await;
        assert_eq!(calls, vec![as_year_literal("1987")]);
        assert!(resolution.exists);
        assert_eq!(resolution.kind, LiteralKind::Year);
        assert_eq!(resolution.attempts, 1);
    }

    #[tokio::test]
    async fn test_year_miss_falls_back_to_integer() {
        let (resolution, calls) = run("1987", &[as_integer_literal("1987")]).await;
        assert_eq!(calls, vec![as_year_literal("1987"), as_integer_literal("1987")]);
        assert!(resolution.exists);
        assert_eq!(resolution.kind, LiteralKind::Integer);

        let (resolution, calls) = run("1987", &[]).await;
        assert_eq!(calls.len(), 2);
        assert!(!resolution.exists);
        assert_eq!(resolution.kind, LiteralKind::Integer);
        assert!(resolution.query.ends_with(&as_integer_literal("1987")));
    }

    #[tokio::test]
    async fn test_leading_zero_enters_generic_cascade() {
        let (resolution, calls) = run("007", &[]).await;
        assert_eq!(calls[0], as_resource("007"));
        assert_eq!(calls.len(), 4);
        assert_eq!(resolution.rule, GENERIC_RULE);
    }

    #[tokio::test]
    async fn test_generic_reports_typed_string_when_nothing_matches() {
        let (resolution, calls) = run("Germany", &[]).await;
        assert_eq!(
            calls,
            vec![
                as_resource("Germany"),
                as_language_literal("Germany"),
                as_plain_literal("Germany"),
                as_typed_string_literal("Germany"),
            ]
        );
        assert!(!resolution.exists);
        assert_eq!(resolution.kind, LiteralKind::XsdString);
        assert!(resolution.query.ends_with(&as_typed_string_literal("Germany")));
        assert_eq!(resolution.attempts, 4);
    }

    #[tokio::test]
    async fn test_generic_stops_at_first_hit() {
        let (resolution, calls) = run("Berlin", &[as_language_literal("Berlin")]).await;
        assert_eq!(calls.len(), 2);
        assert!(resolution.exists);
        assert_eq!(resolution.kind, LiteralKind::LangLiteral);
    }

    #[tokio::test]
    async fn test_inputs_are_cleaned_before_querying() {
        let stub = StubExecutor::new(&[as_resource("New York City")]);
        let resolver = ExistenceResolver::new(stub.clone());
        let resolution = resolver
            .resolve(" ''Alan_Shepard'' ", "\"birthPlace\"", "\"New_York_City\"")
            .await;

        assert!(resolution.exists);
        assert_eq!(
            resolution.query,
            format!(
                "{} birthPlace {}",
                as_resource("Alan Shepard"),
                as_resource("New York City")
            )
        );
    }
}
