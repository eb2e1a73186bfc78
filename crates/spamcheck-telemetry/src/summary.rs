//! Per-run processing summary

use serde::Serialize;
use spamcheck_core::{Category, ClassificationResult, DecodeStatus};
use std::collections::BTreeMap;
use tracing::info;

/// Confidence at or below this value counts as low
pub const LOW_CONFIDENCE_THRESHOLD: u8 = 2;

/// Totals over every result of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub total: u64,

    /// Positive count per category (the aggregate included)
    pub positives: BTreeMap<Category, u64>,

    pub decoded_ok: u64,
    pub decoded_malformed: u64,
    pub decoded_empty: u64,

    pub average_confidence: f64,
    pub low_confidence: u64,
}

impl RunSummary {
    /// Build a summary from the results of a run
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a ClassificationResult>) -> Self {
        let mut summary = Self::default();
        let mut confidence_sum = 0u64;

        for result in results {
            summary.total += 1;

            for category in Category::ALL {
                if result.labels.get(category) {
                    *summary.positives.entry(category).or_default() += 1;
                }
            }

            match result.decode_status {
                DecodeStatus::Ok => summary.decoded_ok += 1,
                DecodeStatus::Malformed => summary.decoded_malformed += 1,
                DecodeStatus::Empty => summary.decoded_empty += 1,
            }

            let confidence = result.labels.confidence.value();
            confidence_sum += u64::from(confidence);
            if confidence <= LOW_CONFIDENCE_THRESHOLD {
                summary.low_confidence += 1;
            }
        }

        if summary.total > 0 {
            summary.average_confidence = confidence_sum as f64 / summary.total as f64;
        }

        summary
    }

    /// Number of results positive for a category
    pub fn positive(&self, category: Category) -> u64 {
        self.positives.get(&category).copied().unwrap_or(0)
    }

    /// Share of results flagged as spam
    pub fn spam_rate(&self) -> f64 {
        share(self.positive(Category::LabelsSpam), self.total)
    }

    /// Share of results with low confidence
    pub fn low_confidence_rate(&self) -> f64 {
        share(self.low_confidence, self.total)
    }

    /// Log the summary
    pub fn log(&self) {
        info!("Total content pieces: {}", self.total);
        info!(
            "Spam detected: {} ({:.1}%)",
            self.positive(Category::LabelsSpam),
            self.spam_rate() * 100.0
        );
        for category in &Category::ALL[..5] {
            info!("  - {}: {}", category, self.positive(*category));
        }
        info!(
            "Decode status: {} ok, {} malformed, {} empty",
            self.decoded_ok, self.decoded_malformed, self.decoded_empty
        );
        info!(
            "Average confidence: {:.1}/5, low confidence (<= {}): {} ({:.1}%)",
            self.average_confidence,
            LOW_CONFIDENCE_THRESHOLD,
            self.low_confidence,
            self.low_confidence_rate() * 100.0
        );
    }
}

fn share(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spamcheck_core::{Confidence, LabelVector};

    fn result(labels: LabelVector, status: DecodeStatus) -> ClassificationResult {
        ClassificationResult::new("doc", labels, "{}", status)
    }

    #[test]
    fn test_summary_counts() {
        let results = vec![
            result(
                LabelVector {
                    ads: true,
                    is_spam: true,
                    confidence: Confidence::clamped(5),
                    ..Default::default()
                },
                DecodeStatus::Ok,
            ),
            result(
                LabelVector {
                    unreadable: true,
                    confidence: Confidence::clamped(4),
                    ..Default::default()
                },
                DecodeStatus::Malformed,
            ),
            ClassificationResult::unavailable("doc-3"),
        ];

        let summary = RunSummary::from_results(&results);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.positive(Category::Ads), 1);
        assert_eq!(summary.positive(Category::LabelsSpam), 1);
        assert_eq!(summary.positive(Category::Unreadable), 1);
        assert_eq!(summary.positive(Category::KeywordSpam), 0);
        assert_eq!(
            (summary.decoded_ok, summary.decoded_malformed, summary.decoded_empty),
            (1, 1, 1)
        );
        assert!((summary.average_confidence - 10.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.low_confidence, 1);
    }

    #[test]
    fn test_empty_run_has_zero_rates() {
        let summary = RunSummary::from_results(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.spam_rate(), 0.0);
        assert_eq!(summary.low_confidence_rate(), 0.0);
        assert_eq!(summary.average_confidence, 0.0);
    }
}
