//! Agreement metrics against human reference labels

use serde::Serialize;
use spamcheck_core::{Category, LabelVector, ReferenceLabel};
use std::collections::BTreeMap;
use tracing::info;

/// Confusion-matrix counts for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryStat {
    pub true_positive: u64,
    pub false_positive: u64,
    pub false_negative: u64,
    pub true_negative: u64,
}

impl CategoryStat {
    /// Count one predicted/reference pair
    pub fn record(&mut self, predicted: bool, reference: bool) {
        match (predicted, reference) {
            (true, true) => self.true_positive += 1,
            (true, false) => self.false_positive += 1,
            (false, true) => self.false_negative += 1,
            (false, false) => self.true_negative += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.true_positive + self.false_positive + self.false_negative + self.true_negative
    }

    /// Pairs where prediction and reference agree
    pub fn correct(&self) -> u64 {
        self.true_positive + self.true_negative
    }

    pub fn predicted_positive(&self) -> u64 {
        self.true_positive + self.false_positive
    }

    pub fn reference_positive(&self) -> u64 {
        self.true_positive + self.false_negative
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.correct(), self.total())
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.predicted_positive())
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.reference_positive())
    }

    pub fn f1(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();
        if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        }
    }
}

/// Fraction in `[0, 1]`, zero when the denominator is zero
fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Accumulates per-category confusion counts across a run
#[derive(Debug, Clone)]
pub struct AgreementMetrics {
    stats: BTreeMap<Category, CategoryStat>,
    samples: u64,
}

impl AgreementMetrics {
    /// Create a collector with every category at zero
    pub fn new() -> Self {
        Self {
            stats: Category::ALL
                .iter()
                .map(|category| (*category, CategoryStat::default()))
                .collect(),
            samples: 0,
        }
    }

    /// Clear all counts for a new run
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Record one document that has a reference label
    pub fn record(&mut self, predicted: &LabelVector, reference: &ReferenceLabel) {
        for category in Category::ALL {
            self.stats
                .entry(category)
                .or_default()
                .record(predicted.get(category), reference.get(category));
        }
        self.samples += 1;
    }

    /// Counts for one category
    pub fn stat(&self, category: Category) -> CategoryStat {
        self.stats.get(&category).copied().unwrap_or_default()
    }

    /// Number of recorded documents
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Derive statistics from the accumulated counts
    pub fn summarize(&self) -> MetricsReport {
        let categories: BTreeMap<Category, CategorySummary> = self
            .stats
            .iter()
            .map(|(category, stat)| (*category, CategorySummary::from_stat(*stat)))
            .collect();

        let aggregate = self.stat(Category::LabelsSpam);

        MetricsReport {
            total_samples: self.samples,
            correct_predictions: aggregate.correct(),
            overall_accuracy: aggregate.accuracy(),
            categories,
        }
    }
}

impl Default for AgreementMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Derived statistics for one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategorySummary {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,

    /// Positives predicted by the model
    pub predicted_positive: u64,

    /// Positives in the reference labels
    pub reference_positive: u64,

    #[serde(flatten)]
    pub counts: CategoryStat,
}

impl CategorySummary {
    fn from_stat(stat: CategoryStat) -> Self {
        Self {
            accuracy: stat.accuracy(),
            precision: stat.precision(),
            recall: stat.recall(),
            f1: stat.f1(),
            predicted_positive: stat.predicted_positive(),
            reference_positive: stat.reference_positive(),
            counts: stat,
        }
    }
}

/// Agreement report for a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    /// Documents compared against a reference label
    pub total_samples: u64,

    /// Documents whose aggregate flag matched the reference
    pub correct_predictions: u64,

    /// Accuracy of the aggregate flag
    pub overall_accuracy: f64,

    pub categories: BTreeMap<Category, CategorySummary>,
}

impl MetricsReport {
    /// Statistics for one category
    pub fn category(&self, category: Category) -> Option<&CategorySummary> {
        self.categories.get(&category)
    }

    /// Log the report as a table
    pub fn log(&self) {
        info!(
            "Overall accuracy: {:.1}% ({}/{})",
            self.overall_accuracy * 100.0,
            self.correct_predictions,
            self.total_samples
        );

        for (category, summary) in &self.categories {
            info!(
                "{:16} | Acc: {:5.1}% | Prec: {:5.1}% | Rec: {:5.1}% | F1: {:5.1}% | \
                 Predicted: {:3} | Reference: {:3}",
                category.as_str(),
                summary.accuracy * 100.0,
                summary.precision * 100.0,
                summary.recall * 100.0,
                summary.f1 * 100.0,
                summary.predicted_positive,
                summary.reference_positive,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ads(value: bool) -> LabelVector {
        LabelVector {
            ads: value,
            is_spam: value,
            ..Default::default()
        }
    }

    fn ads_reference(value: bool) -> ReferenceLabel {
        ReferenceLabel {
            ads: value,
            is_spam: value,
            ..Default::default()
        }
    }

    #[test]
    fn test_ads_precision_and_recall() {
        let mut metrics = AgreementMetrics::new();
        metrics.record(&ads(true), &ads_reference(true));
        metrics.record(&ads(true), &ads_reference(true));
        metrics.record(&ads(true), &ads_reference(false));

        let stat = metrics.stat(Category::Ads);
        assert_eq!(stat.true_positive, 2);
        assert_eq!(stat.false_positive, 1);
        assert_eq!(stat.false_negative, 0);

        let report = metrics.summarize();
        let summary = report.category(Category::Ads).unwrap();
        assert!((summary.precision - 0.667).abs() < 1e-3);
        assert_eq!(summary.recall, 1.0);
        assert!((summary.f1 - 0.8).abs() < 1e-9);
        assert!((summary.accuracy - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_guards() {
        let metrics = AgreementMetrics::new();
        let report = metrics.summarize();
        assert_eq!(report.total_samples, 0);
        assert_eq!(report.overall_accuracy, 0.0);
        for summary in report.categories.values() {
            assert_eq!(summary.accuracy, 0.0);
            assert_eq!(summary.precision, 0.0);
            assert_eq!(summary.recall, 0.0);
            assert_eq!(summary.f1, 0.0);
        }
    }

    #[test]
    fn test_all_negative_agreement_has_zero_precision_but_full_accuracy() {
        let mut metrics = AgreementMetrics::new();
        for _ in 0..4 {
            metrics.record(&LabelVector::default(), &ReferenceLabel::default());
        }

        let report = metrics.summarize();
        let summary = report.category(Category::KeywordSpam).unwrap();
        assert_eq!(summary.accuracy, 1.0);
        assert_eq!(summary.precision, 0.0);
        assert_eq!(summary.recall, 0.0);
        assert_eq!(report.correct_predictions, 4);
        assert_eq!(report.overall_accuracy, 1.0);
    }

    #[test]
    fn test_ratios_never_exceed_one() {
        let mut metrics = AgreementMetrics::new();
        let pairs = [(true, true), (true, false), (false, true), (false, false), (true, true)];
        for (predicted, reference) in pairs {
            metrics.record(&ads(predicted), &ads_reference(reference));
        }

        for summary in metrics.summarize().categories.values() {
            for value in [summary.accuracy, summary.precision, summary.recall, summary.f1] {
                assert!((0.0..=1.0).contains(&value));
            }
        }
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let mut metrics = AgreementMetrics::new();
        metrics.record(&ads(true), &ads_reference(false));

        let first = metrics.summarize();
        let second = metrics.summarize();
        assert_eq!(first, second);
        assert_eq!(metrics.samples(), 1);
    }

    #[test]
    fn test_reset_clears_counts() {
        let mut metrics = AgreementMetrics::new();
        metrics.record(&ads(true), &ads_reference(true));
        metrics.reset();

        assert_eq!(metrics.samples(), 0);
        assert_eq!(metrics.stat(Category::Ads), CategoryStat::default());
    }

    #[test]
    fn test_report_serializes_flat_counts() {
        let mut metrics = AgreementMetrics::new();
        metrics.record(&ads(true), &ads_reference(true));

        let json = serde_json::to_value(metrics.summarize()).unwrap();
        assert_eq!(json["categories"]["ads"]["true_positive"], 1);
        assert_eq!(json["categories"]["labels_spam"]["precision"], 1.0);
        assert_eq!(json["total_samples"], 1);
    }
}
