//! Label vectors, reference labels, and the categories they are scored on

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scored category: the five independent flags plus the aggregate spam flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    KeywordSpam,
    MaliciousLinks,
    Ads,
    WrongLanguage,
    Unreadable,
    /// Aggregate `is_spam` flag
    LabelsSpam,
}

impl Category {
    /// Every category, in report order
    pub const ALL: [Category; 6] = [
        Category::KeywordSpam,
        Category::MaliciousLinks,
        Category::Ads,
        Category::WrongLanguage,
        Category::Unreadable,
        Category::LabelsSpam,
    ];

    /// Stable snake_case name used in reports and output records
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeywordSpam => "keyword_spam",
            Self::MaliciousLinks => "malicious_links",
            Self::Ads => "ads",
            Self::WrongLanguage => "wrong_language",
            Self::Unreadable => "unreadable",
            Self::LabelsSpam => "labels_spam",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model confidence, always within `[1, 5]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(u8);

impl Confidence {
    pub const MIN: Confidence = Confidence(1);
    pub const MAX: Confidence = Confidence(5);

    /// Clamp any integer into the valid range
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::MIN
    }
}

/// Labels predicted for one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelVector {
    pub keyword_spam: bool,
    pub malicious_links: bool,
    pub ads: bool,
    pub wrong_language: bool,
    pub unreadable: bool,

    /// Aggregate flag; only trustworthy after rule normalization
    pub is_spam: bool,

    pub confidence: Confidence,
}

impl LabelVector {
    /// The all-false vector with the lowest confidence
    pub fn fallback() -> Self {
        Self::default()
    }

    /// Whether any of the three content-violation flags is set
    pub fn has_content_violation(&self) -> bool {
        self.keyword_spam || self.malicious_links || self.ads
    }

    /// Read a category flag
    pub fn get(&self, category: Category) -> bool {
        match category {
            Category::KeywordSpam => self.keyword_spam,
            Category::MaliciousLinks => self.malicious_links,
            Category::Ads => self.ads,
            Category::WrongLanguage => self.wrong_language,
            Category::Unreadable => self.unreadable,
            Category::LabelsSpam => self.is_spam,
        }
    }
}

/// Human-annotated labels for one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReferenceLabel {
    pub keyword_spam: bool,
    pub malicious_links: bool,
    pub ads: bool,
    pub wrong_language: bool,
    pub unreadable: bool,

    /// The annotator's own aggregate answer
    pub is_spam: bool,
}

impl ReferenceLabel {
    /// Read a category flag
    pub fn get(&self, category: Category) -> bool {
        match category {
            Category::KeywordSpam => self.keyword_spam,
            Category::MaliciousLinks => self.malicious_links,
            Category::Ads => self.ads,
            Category::WrongLanguage => self.wrong_language,
            Category::Unreadable => self.unreadable,
            Category::LabelsSpam => self.is_spam,
        }
    }
}

/// How much a decoded label vector can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeStatus {
    Ok,
    Malformed,
    Empty,
}

impl DecodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Malformed => "malformed",
            Self::Empty => "empty",
        }
    }

    /// Keep the least trustworthy of two statuses
    pub fn downgrade(self, other: DecodeStatus) -> DecodeStatus {
        match (self, other) {
            (Self::Empty, _) | (_, Self::Empty) => Self::Empty,
            (Self::Malformed, _) | (_, Self::Malformed) => Self::Malformed,
            _ => Self::Ok,
        }
    }
}

impl fmt::Display for DecodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
