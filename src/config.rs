//! Configuration for the fact verifier
//!
//! Values come from built-in defaults, an optional TOML file and the
//! environment, in that order of precedence (later wins).

use crate::error::{Result, VerifierError};
use crate::sparql::query::{ONTOLOGY_NAMESPACE, PROPERTY_NAMESPACE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix for nested environment overrides, e.g. `FACT_VERIFIER__SPARQL__ENDPOINT`
pub const ENV_PREFIX: &str = "FACT_VERIFIER";

/// Top-level verifier configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifierConfig {
    #[serde(default)]
    pub sparql: SparqlConfig,

    #[serde(default)]
    pub batch: BatchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// SPARQL endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparqlConfig {
    /// Endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-query timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Namespace bound to `dbo:`
    #[serde(default = "default_ontology_namespace")]
    pub ontology_namespace: String,

    /// Namespace bound to `dbp:`
    #[serde(default = "default_property_namespace")]
    pub property_namespace: String,

    /// User-Agent header sent with every query
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_endpoint() -> String {
    "https://dbpedia.org/sparql".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_ontology_namespace() -> String {
    ONTOLOGY_NAMESPACE.to_string()
}

fn default_property_namespace() -> String {
    PROPERTY_NAMESPACE.to_string()
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

impl Default for SparqlConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
            ontology_namespace: default_ontology_namespace(),
            property_namespace: default_property_namespace(),
            user_agent: default_user_agent(),
        }
    }
}

impl SparqlConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Batch run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// JSON file with input records
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,

    /// JSON file the verification records are written to
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Minimum delay before each triple is resolved, in milliseconds
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,

    /// Optional file for a Prometheus text dump at the end of the run
    #[serde(default)]
    pub metrics_path: Option<PathBuf>,
}

fn default_input_path() -> PathBuf {
    PathBuf::from("triples.json")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("verified_triples.json")
}

fn default_throttle_ms() -> u64 {
    200
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_path: default_output_path(),
            throttle_ms: default_throttle_ms(),
            metrics_path: None,
        }
    }
}

impl BatchConfig {
    /// Get throttle delay as Duration
    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl VerifierConfig {
    /// Load configuration from an optional TOML file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(VerifierError::Configuration(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(::config::File::from(path));
        }

        let config: Self = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        let config = config.from_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply the flat environment variables understood by earlier releases
    pub fn from_env(mut self) -> Self {
        if let Ok(val) = std::env::var("SPARQL_ENDPOINT") {
            self.sparql.endpoint = val;
        }

        if let Ok(val) = std::env::var("SPARQL_TIMEOUT_MS") {
            if let Ok(timeout) = val.parse() {
                self.sparql.timeout_ms = timeout;
            }
        }

        if let Ok(val) = std::env::var("VERIFIER_THROTTLE_MS") {
            if let Ok(ms) = val.parse() {
                self.batch.throttle_ms = ms;
            }
        }

        if let Ok(val) = std::env::var("VERIFIER_LOG_JSON") {
            self.logging.json = val.to_lowercase() == "true" || val == "1";
        }

        self
    }

    /// Reject values that would make every query fail
    pub fn validate(&self) -> Result<()> {
        if self.sparql.endpoint.trim().is_empty() {
            return Err(VerifierError::Configuration(
                "sparql.endpoint must not be empty".to_string(),
            ));
        }
        if self.sparql.timeout_ms == 0 {
            return Err(VerifierError::Configuration(
                "sparql.timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.sparql.ontology_namespace.is_empty() || self.sparql.property_namespace.is_empty() {
            return Err(VerifierError::Configuration(
                "predicate namespaces must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
