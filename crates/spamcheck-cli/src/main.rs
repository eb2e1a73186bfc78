//! spamcheck
//!
//! Batch spam moderation for web content.
//!
//! Reads documents from CSV, asks an LLM chat completions service to label
//! each one under a request quota, normalizes the labels with the override
//! rules, and writes JSONL results. With `--validate` the labels are also
//! compared against the human annotations in the input.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use spamcheck_classifiers::{ChatCompletionsService, Scheduler};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

mod config;
mod input;
mod output;
mod report;
mod runner;

use config::AppConfig;
use report::{ArtifactPaths, ValidationReport};
use runner::Runner;

#[derive(Parser, Debug)]
#[command(name = "spamcheck")]
#[command(about = "Spam moderation of web content with an LLM", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "spamcheck.yaml")]
    config: String,

    /// CSV file with `uid` and `content` columns
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Process at most this many documents
    #[arg(short, long)]
    limit: Option<usize>,

    /// Compare results with the human annotations in the input
    #[arg(short, long)]
    validate: bool,

    /// Directory for results and reports
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Chat model to use
    #[arg(long)]
    model: Option<String>,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => debug!("no .env file found"),
        Err(e) => warn!("Failed to read .env file: {}", e),
    }

    let config = AppConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded");
    info!("Input: {}", config.input_path.display());
    info!("Model: {} at {}", config.service.model, config.service.endpoint);
    info!(
        "Quota: {} requests per {}s, {}ms apart",
        config.rate_limit.window_capacity,
        config.rate_limit.window_secs,
        config.rate_limit.min_interval_ms
    );
    if let Some(limit) = cli.limit {
        info!("Processing limit: {} documents", limit);
    }

    let metrics_handle = init_metrics()?;
    let started_at = Utc::now();

    let documents = input::load_documents(&config.input_path, cli.limit)?;

    let service = ChatCompletionsService::new(config.chat_service(config.api_key()?))?;
    let scheduler = Scheduler::new(config.quota(), config.retry_policy())
        .with_min_interval(config.min_interval());

    let mut runner = Runner::new(Arc::new(service), scheduler);
    if cli.validate {
        runner = runner.with_validation();
    }

    let outcome = runner.run(&documents).await?;
    let paths = ArtifactPaths::new(&config.output_dir, outcome.records.len(), started_at);

    output::write_jsonl(&paths.results, &outcome.records)?;
    outcome.summary.log();

    let schema = output::check_records(&output::read_jsonl(&paths.results)?);
    schema.log();

    if let Some(metrics) = &outcome.metrics {
        if metrics.total_samples == 0 {
            warn!("Validation requested but no document carries a reference label");
        } else {
            metrics.log();
            ValidationReport {
                run_id: outcome.run_id,
                generated_at: Utc::now(),
                model: &config.service.model,
                metrics,
                schema: &schema,
            }
            .write(&paths.validation_report)?;
        }
    }

    report::write_metrics_snapshot(&paths.metrics_snapshot, &metrics_handle.render())?;

    info!("Results: {}", paths.results.display());
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("spamcheck=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("spamcheck=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize the metrics recorder and return a handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "spamcheck_requests_total",
        "Calls issued to the classification service, retries included"
    );
    metrics::describe_counter!(
        "spamcheck_retries_total",
        "Calls retried after a transient failure"
    );
    metrics::describe_counter!(
        "spamcheck_documents_total",
        "Documents processed by decode status"
    );
    metrics::describe_counter!(
        "spamcheck_rule_overrides_total",
        "Documents whose labels were rewritten by an override rule"
    );
    metrics::describe_histogram!(
        "spamcheck_request_latency_ms",
        metrics::Unit::Milliseconds,
        "Classification service call latency in milliseconds"
    );

    debug!("Metrics recorder installed");
    Ok(handle)
}
