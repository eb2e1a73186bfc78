//! Core types for spamcheck

use serde::{Deserialize, Serialize};

use crate::labels::{DecodeStatus, LabelVector, ReferenceLabel};

/// A text document submitted for classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque unique identifier
    pub id: String,

    /// Document text, possibly empty
    pub text: String,
}

impl Document {
    /// Create a new document
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Short form of the id for log lines
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }
}

/// One input record: a document and, when annotated, its reference label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledDocument {
    pub document: Document,
    pub reference: Option<ReferenceLabel>,
}

impl LabeledDocument {
    /// Create an unannotated record
    pub fn new(document: Document) -> Self {
        Self {
            document,
            reference: None,
        }
    }

    /// Attach a reference label
    pub fn with_reference(mut self, reference: ReferenceLabel) -> Self {
        self.reference = Some(reference);
        self
    }
}

/// Outcome of classifying one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// Id of the classified document
    pub document_id: String,

    /// Normalized labels
    pub labels: LabelVector,

    /// Reply text exactly as received (empty when the service was unavailable)
    pub raw_reply: String,

    /// Trust level of the decoded labels
    pub decode_status: DecodeStatus,
}

impl ClassificationResult {
    /// Create a new classification result
    pub fn new(
        document_id: impl Into<String>,
        labels: LabelVector,
        raw_reply: impl Into<String>,
        decode_status: DecodeStatus,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            labels,
            raw_reply: raw_reply.into(),
            decode_status,
        }
    }

    /// Result for a document whose service call never produced a reply
    pub fn unavailable(document_id: impl Into<String>) -> Self {
        Self::new(document_id, LabelVector::fallback(), "", DecodeStatus::Empty)
    }
}

/// A chat message sent to the classification service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }
}
