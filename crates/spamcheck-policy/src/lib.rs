//! spamcheck Policy Engine
//!
//! Business rules that resolve conflicting moderation labels.
//!
//! Rules form a precedence table:
//! - `unreadable` overrides everything
//! - `wrong_language` overrides the content flags
//! - otherwise the spam aggregate is the OR of keyword spam, malicious links and ads

pub mod engine;
pub mod rule;

pub use engine::{normalize, EvaluationResult, RuleEngine};
pub use rule::OverrideRule;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::engine::{normalize, EvaluationResult, RuleEngine};
    pub use crate::rule::OverrideRule;
}
