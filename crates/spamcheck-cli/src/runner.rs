//! Run orchestration
//!
//! Documents go through the pipeline one at a time, in input order:
//! scheduler → decoder → rule engine → (optional) agreement metrics.

use spamcheck_classifiers::{decode, ClassificationService, Scheduler, LABELING_INSTRUCTIONS};
use spamcheck_core::{ClassificationResult, DecodeStatus, LabeledDocument, Result};
use spamcheck_policy::RuleEngine;
use spamcheck_telemetry::{AgreementMetrics, MetricsReport, RunSummary};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::output::OutputRecord;

/// Everything a finished run produced
#[derive(Debug)]
pub struct RunOutcome {
    pub run_id: Uuid,

    /// One result per document, in input order
    pub results: Vec<ClassificationResult>,

    /// Output records matching `results`
    pub records: Vec<OutputRecord>,

    pub summary: RunSummary,

    /// Agreement with the reference labels, when validation was requested
    pub metrics: Option<MetricsReport>,
}

/// Drives one run over a document list
pub struct Runner {
    run_id: Uuid,
    service: Arc<dyn ClassificationService>,
    scheduler: Scheduler,
    rules: RuleEngine,
    metrics: Option<AgreementMetrics>,
}

impl Runner {
    pub fn new(service: Arc<dyn ClassificationService>, scheduler: Scheduler) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            service,
            scheduler,
            rules: RuleEngine::new(),
            metrics: None,
        }
    }

    /// Compare every annotated document against its reference label
    pub fn with_validation(mut self) -> Self {
        self.metrics = Some(AgreementMetrics::new());
        self
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Classify every document.
    ///
    /// A document whose service calls are exhausted gets empty fallback
    /// labels and the run continues; a configuration error aborts the run.
    pub async fn run(&mut self, documents: &[LabeledDocument]) -> Result<RunOutcome> {
        let total = documents.len();
        info!(
            run_id = %self.run_id,
            documents = total,
            service = self.service.name(),
            "starting run"
        );

        if let Some(metrics) = self.metrics.as_mut() {
            metrics.reset();
        }

        let mut results = Vec::with_capacity(total);
        let mut records = Vec::with_capacity(total);

        for (index, labeled) in documents.iter().enumerate() {
            let document = &labeled.document;
            info!(
                run_id = %self.run_id,
                id = document.short_id(),
                "classifying document {}/{}",
                index + 1,
                total
            );

            let result = self.classify(labeled).await?;
            let status = result.decode_status.as_str();
            metrics::counter!("spamcheck_documents_total", "status" => status).increment(1);

            if let (Some(metrics), Some(reference)) =
                (self.metrics.as_mut(), labeled.reference.as_ref())
            {
                metrics.record(&result.labels, reference);
            }

            records.push(OutputRecord::new(document, &result));
            results.push(result);
        }

        let summary = RunSummary::from_results(&results);
        let metrics = self.metrics.as_ref().map(AgreementMetrics::summarize);

        info!(
            run_id = %self.run_id,
            documents = results.len(),
            requests = self.scheduler.requests_issued(),
            retries = self.scheduler.retries(),
            "run complete"
        );

        Ok(RunOutcome {
            run_id: self.run_id,
            results,
            records,
            summary,
            metrics,
        })
    }

    async fn classify(&mut self, labeled: &LabeledDocument) -> Result<ClassificationResult> {
        let document = &labeled.document;
        let service = self.service.as_ref();

        let raw = match self
            .scheduler
            .schedule(|| service.complete(LABELING_INSTRUCTIONS, &document.text))
            .await
        {
            Ok(raw) => raw,
            Err(e) if !e.is_fatal() => {
                warn!(id = %document.id, error = %e, "service unavailable, recording empty labels");
                return Ok(ClassificationResult::unavailable(&document.id));
            }
            Err(e) => {
                error!(id = %document.id, error = %e, "aborting run");
                return Err(e);
            }
        };

        let decoded = decode(&raw);
        match decoded.status {
            DecodeStatus::Ok => {
                debug!(id = %document.id, repaired = decoded.repaired, "reply decoded")
            }
            status => {
                warn!(id = %document.id, %status, reply = %raw, "reply did not decode cleanly")
            }
        }

        let evaluation = self.rules.evaluate(&decoded.labels);
        if evaluation.rule.is_override() {
            let rule = evaluation.rule.as_str();
            metrics::counter!("spamcheck_rule_overrides_total", "rule" => rule).increment(1);
        }

        Ok(ClassificationResult::new(
            document.id.clone(),
            evaluation.labels,
            raw,
            decoded.status,
        ))
    }
}
