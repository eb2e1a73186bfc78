//! Override rule decision table

use serde::{Deserialize, Serialize};
use spamcheck_core::LabelVector;

/// Which rule governs a label vector.
///
/// Variants are listed in precedence order: `Unreadable` wins over
/// `WrongLanguage`, which wins over `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideRule {
    /// Content could not be read; every other flag is cleared
    Unreadable,

    /// Content is not in the target language; every other flag is cleared
    WrongLanguage,

    /// No override; the aggregate is the OR of the content flags
    Normal,
}

impl OverrideRule {
    /// Select the governing rule for a decoded vector
    pub fn select(labels: &LabelVector) -> Self {
        if labels.unreadable {
            Self::Unreadable
        } else if labels.wrong_language {
            Self::WrongLanguage
        } else {
            Self::Normal
        }
    }

    /// Apply this rule to a vector
    pub fn apply(&self, labels: &LabelVector) -> LabelVector {
        let cleared = LabelVector {
            confidence: labels.confidence,
            ..LabelVector::default()
        };

        match self {
            Self::Unreadable => LabelVector {
                unreadable: true,
                ..cleared
            },
            Self::WrongLanguage => LabelVector {
                wrong_language: true,
                ..cleared
            },
            Self::Normal => LabelVector {
                wrong_language: false,
                unreadable: false,
                is_spam: labels.has_content_violation(),
                ..*labels
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unreadable => "unreadable",
            Self::WrongLanguage => "wrong_language",
            Self::Normal => "normal",
        }
    }

    /// Whether this rule overrides the content flags
    pub fn is_override(&self) -> bool {
        !matches!(self, Self::Normal)
    }
}
