//! ASK query text construction

pub const ONTOLOGY_NAMESPACE: &str = "http://dbpedia.org/ontology/";
pub const PROPERTY_NAMESPACE: &str = "http://dbpedia.org/property/";

/// Builds the disjunctive ASK query checked for every candidate term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskQueryBuilder {
    ontology_namespace: String,
    property_namespace: String,
}

impl AskQueryBuilder {
    pub fn new(ontology_namespace: impl Into<String>, property_namespace: impl Into<String>) -> Self {
        Self {
            ontology_namespace: ontology_namespace.into(),
            property_namespace: property_namespace.into(),
        }
    }

    /// Query text for `subject predicate object` under `dbo:` or `dbp:`
    pub fn build(&self, subject: &str, predicate: &str, object: &str) -> String {
        format!(
            r#"
        PREFIX dbo: <{ontology}>
        PREFIX dbp: <{property}>

        ASK WHERE {{
          {{ {subject} dbo:{predicate} {object} . }}
          UNION
          {{ {subject} dbp:{predicate} {object} . }}
        }}
        "#,
            ontology = self.ontology_namespace,
            property = self.property_namespace,
        )
    }
}

impl Default for AskQueryBuilder {
    fn default() -> Self {
        Self::new(ONTOLOGY_NAMESPACE, PROPERTY_NAMESPACE)
    }
}
