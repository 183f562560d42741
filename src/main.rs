//! Batch verification of triples against a SPARQL endpoint

use anyhow::Context;
use clap::Parser;
use fact_verifier::batch::{read_records, write_records, BatchVerifier};
use fact_verifier::metrics::METRICS;
use fact_verifier::{logging, ExistenceResolver, SparqlClient, VerifierConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "fact-verifier", version, about = "Check triples against a SPARQL knowledge base")]
struct Cli {
    /// TOML configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Input JSON file of records
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Output JSON file for verification records
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// SPARQL endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Delay before each triple, in milliseconds
    #[arg(long)]
    throttle_ms: Option<u64>,

    /// Write Prometheus metrics to this file when the run ends
    #[arg(long)]
    metrics: Option<PathBuf>,
}

impl Cli {
    fn apply(self, config: &mut VerifierConfig) {
        if let Some(input) = self.input {
            config.batch.input_path = input;
        }
        if let Some(output) = self.output {
            config.batch.output_path = output;
        }
        if let Some(endpoint) = self.endpoint {
            config.sparql.endpoint = endpoint;
        }
        if let Some(ms) = self.throttle_ms {
            config.batch.throttle_ms = ms;
        }
        if let Some(metrics) = self.metrics {
            config.batch.metrics_path = Some(metrics);
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = VerifierConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    logging::init(&config.logging)?;
    info!("Verifying against {}", config.sparql.endpoint);

    let records = read_records(&config.batch.input_path)?;

    let client = SparqlClient::new(config.sparql.clone())?;
    let resolver = ExistenceResolver::new(Arc::new(client));
    let verifier = BatchVerifier::new(resolver, config.batch.throttle());

    let report = verifier.run(&records).await;

    write_records(&config.batch.output_path, &report.records)?;
    report.summary.log();

    if let Some(path) = &config.batch.metrics_path {
        std::fs::write(path, METRICS.export_prometheus())
            .with_context(|| format!("failed to write metrics to {}", path.display()))?;
    }

    Ok(())
}
