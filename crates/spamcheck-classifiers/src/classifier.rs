//! Classification service trait

use async_trait::async_trait;
use spamcheck_core::ServiceError;

/// An external service that labels a document from instructions.
///
/// The reply is free-form text that is expected, but not guaranteed, to
/// contain a JSON answer. Implementations classify their own failures as
/// transient or fatal; retrying is the scheduler's job, not theirs.
#[async_trait]
pub trait ClassificationService: Send + Sync {
    /// Send one document with the labeling instructions and return the raw reply
    async fn complete(
        &self,
        instructions: &str,
        document_text: &str,
    ) -> Result<String, ServiceError>;

    /// Get the service name
    fn name(&self) -> &str;
}

