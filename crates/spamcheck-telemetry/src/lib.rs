//! spamcheck Telemetry
//!
//! Measurement of a moderation run.
//!
//! Provides:
//! - Confusion-matrix agreement metrics against human reference labels
//! - Per-run processing summaries

pub mod metrics;
pub mod summary;

pub use metrics::{AgreementMetrics, CategoryStat, CategorySummary, MetricsReport};
pub use summary::RunSummary;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::metrics::{AgreementMetrics, MetricsReport};
    pub use crate::summary::RunSummary;
}
