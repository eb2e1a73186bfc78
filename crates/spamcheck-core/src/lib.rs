//! spamcheck Core
//!
//! Core types, traits, and utilities shared across spamcheck components.
//!
//! This crate provides:
//! - Documents, label vectors, and human reference labels
//! - The scored categories and decode status values
//! - Error types for service failures and run-level failures

pub mod error;
pub mod labels;
pub mod types;

pub use error::{Error, Result, ServiceError};
pub use labels::{Category, Confidence, DecodeStatus, LabelVector, ReferenceLabel};
pub use types::{ChatMessage, ClassificationResult, Document, LabeledDocument};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result, ServiceError};
    pub use crate::labels::{Category, Confidence, DecodeStatus, LabelVector, ReferenceLabel};
    pub use crate::types::{ClassificationResult, Document, LabeledDocument};
}
