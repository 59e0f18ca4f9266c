//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// A single direct-message delivery failed (recipient unreachable,
    /// DMs disabled, ...). Recoverable per recipient.
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// The gateway rejected a reply or defer on the invocation's
    /// reply channel.
    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}
