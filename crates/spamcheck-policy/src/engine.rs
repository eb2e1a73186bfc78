//! Rule evaluation engine

use spamcheck_core::LabelVector;
use tracing::trace;

use crate::OverrideRule;

/// Rule evaluation engine.
///
/// Stateless: evaluation is a pure function of the input vector, so one
/// engine can be shared for a whole run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl RuleEngine {
    /// Create a new rule engine
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a decoded vector, reporting which rule fired
    pub fn evaluate(&self, labels: &LabelVector) -> EvaluationResult {
        let rule = OverrideRule::select(labels);
        let normalized = rule.apply(labels);

        if rule.is_override() && labels.has_content_violation() {
            trace!(
                rule = rule.as_str(),
                "override cleared content flags set by the decoder"
            );
        }

        EvaluationResult {
            rule,
            labels: normalized,
            aggregate_corrected: labels.is_spam != normalized.is_spam,
        }
    }

    /// Normalize a vector so that the override and aggregate invariants hold
    pub fn normalize(&self, labels: &LabelVector) -> LabelVector {
        self.evaluate(labels).labels
    }
}

/// Result of rule evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationResult {
    /// The rule that governed the vector
    pub rule: OverrideRule,

    /// Normalized labels
    pub labels: LabelVector,

    /// The decoder's aggregate disagreed with the recomputed one
    pub aggregate_corrected: bool,
}

/// Normalize with a default engine
pub fn normalize(labels: &LabelVector) -> LabelVector {
    RuleEngine::new().normalize(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spamcheck_core::Confidence;

    #[test]
    fn test_unreadable_nulls_everything_else() {
        let labels = LabelVector {
            keyword_spam: true,
            malicious_links: true,
            ads: true,
            wrong_language: true,
            unreadable: true,
            is_spam: true,
            confidence: Confidence::clamped(4),
        };

        let result = RuleEngine::new().evaluate(&labels);
        assert_eq!(result.rule, OverrideRule::Unreadable);
        assert_eq!(
            result.labels,
            LabelVector {
                unreadable: true,
                confidence: Confidence::clamped(4),
                ..Default::default()
            }
        );
        assert!(result.aggregate_corrected);
    }

    #[test]
    fn test_wrong_language_nulls_content_flags() {
        let labels = LabelVector {
            ads: true,
            wrong_language: true,
            ..Default::default()
        };

        let normalized = normalize(&labels);
        assert!(normalized.wrong_language);
        assert!(!normalized.ads);
        assert!(!normalized.is_spam);
    }

    #[test]
    fn test_aggregate_recomputed_from_content_flags() {
        let decoded = LabelVector {
            malicious_links: true,
            is_spam: false,
            ..Default::default()
        };
        let result = RuleEngine::new().evaluate(&decoded);
        assert_eq!(result.rule, OverrideRule::Normal);
        assert!(result.labels.is_spam);
        assert!(result.aggregate_corrected);

        let claimed = LabelVector {
            is_spam: true,
            ..Default::default()
        };
        assert!(!normalize(&claimed).is_spam);
    }

    #[test]
    fn test_confidence_preserved() {
        let labels = LabelVector {
            wrong_language: true,
            confidence: Confidence::MAX,
            ..Default::default()
        };
        assert_eq!(normalize(&labels).confidence, Confidence::MAX);
    }
}
