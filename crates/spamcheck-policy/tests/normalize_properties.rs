use proptest::prelude::*;
use spamcheck_core::{Confidence, LabelVector};
use spamcheck_policy::{normalize, OverrideRule, RuleEngine};

fn any_labels() -> impl Strategy<Value = LabelVector> {
    (any::<[bool; 6]>(), 1i64..=5).prop_map(|(flags, confidence)| LabelVector {
        keyword_spam: flags[0],
        malicious_links: flags[1],
        ads: flags[2],
        wrong_language: flags[3],
        unreadable: flags[4],
        is_spam: flags[5],
        confidence: Confidence::clamped(confidence),
    })
}

proptest! {
    #[test]
    fn unreadable_clears_all_other_flags(labels in any_labels()) {
        let out = normalize(&labels);
        if out.unreadable {
            prop_assert!(!out.wrong_language);
            prop_assert!(!out.keyword_spam && !out.malicious_links && !out.ads);
            prop_assert!(!out.is_spam);
        }
    }

    #[test]
    fn wrong_language_clears_all_other_flags(labels in any_labels()) {
        let out = normalize(&labels);
        if out.wrong_language {
            prop_assert!(!out.unreadable);
            prop_assert!(!out.keyword_spam && !out.malicious_links && !out.ads);
            prop_assert!(!out.is_spam);
        }
    }

    #[test]
    fn aggregate_is_or_of_content_flags(labels in any_labels()) {
        let out = normalize(&labels);
        if !out.wrong_language && !out.unreadable {
            prop_assert_eq!(out.is_spam, out.keyword_spam || out.malicious_links || out.ads);
        }
    }

    #[test]
    fn normalize_is_idempotent(labels in any_labels()) {
        let once = normalize(&labels);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn override_input_never_keeps_content_flags(labels in any_labels()) {
        let result = RuleEngine::new().evaluate(&labels);
        if labels.unreadable || labels.wrong_language {
            prop_assert!(result.rule.is_override());
            prop_assert!(!result.labels.has_content_violation());
        } else {
            prop_assert_eq!(result.rule, OverrideRule::Normal);
            prop_assert_eq!(result.labels.ads, labels.ads);
        }
    }

    #[test]
    fn confidence_survives_normalization(labels in any_labels()) {
        prop_assert_eq!(normalize(&labels).confidence, labels.confidence);
    }
}
