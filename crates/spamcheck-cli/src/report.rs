//! Run artifacts: file naming, validation report, metrics snapshot

use chrono::{DateTime, Utc};
use serde::Serialize;
use spamcheck_core::Result;
use spamcheck_telemetry::MetricsReport;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use crate::output::SchemaCheck;

/// Paths of the files one run writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub results: PathBuf,
    pub validation_report: PathBuf,
    pub metrics_snapshot: PathBuf,
}

impl ArtifactPaths {
    /// Name artifacts after the document count and the run's start time
    pub fn new(output_dir: impl AsRef<Path>, documents: usize, started_at: DateTime<Utc>) -> Self {
        let dir = output_dir.as_ref();
        let stamp = started_at.format("%Y%m%d_%H%M%S");
        Self {
            results: dir.join(format!("moderation_results_{}_{}.jsonl", documents, stamp)),
            validation_report: dir.join(format!("validation_report_{}_{}.json", documents, stamp)),
            metrics_snapshot: dir.join(format!("metrics_{}_{}.prom", documents, stamp)),
        }
    }
}

/// Agreement report written when validation is enabled
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport<'a> {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub model: &'a str,

    #[serde(flatten)]
    pub metrics: &'a MetricsReport,

    pub schema: &'a SchemaCheck,
}

impl ValidationReport<'_> {
    /// Write the report as pretty-printed JSON
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        write_file(path, serde_json::to_string_pretty(self)?)?;
        info!(path = %path.display(), "validation report written");
        Ok(())
    }
}

/// Write rendered Prometheus text next to the results
pub fn write_metrics_snapshot(path: impl AsRef<Path>, rendered: &str) -> Result<()> {
    let path = path.as_ref();
    write_file(path, rendered)?;
    info!(path = %path.display(), "metrics snapshot written");
    Ok(())
}

fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}
