//! Spamcheck Classifiers
//!
//! Everything between a document and its decoded label vector:
//! - [`ClassificationService`]: the seam to an LLM chat completions API
//! - [`Scheduler`]: quota, spacing, timeout and retry around every call
//! - [`decode`]: tolerant parsing of free-form replies into labels
//!
//! The service is the only I/O boundary; the decoder is pure.

pub mod classifier;
pub mod decoder;
pub mod openai;
pub mod prompt;
pub mod quota;
pub mod scheduler;

pub use classifier::ClassificationService;
pub use decoder::{
    decode, extract_candidate, scan_candidates, Candidate, CandidateKind, Candidates, Decoded,
};
pub use openai::{ChatCompletionsService, ChatServiceConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use prompt::LABELING_INSTRUCTIONS;
pub use quota::RequestQuota;
pub use scheduler::{RetryPolicy, Scheduler};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::ClassificationService;
    pub use crate::decoder::{decode, Decoded};
    pub use crate::openai::{ChatCompletionsService, ChatServiceConfig};
    pub use crate::prompt::LABELING_INSTRUCTIONS;
    pub use crate::quota::RequestQuota;
    pub use crate::scheduler::{RetryPolicy, Scheduler};
}
