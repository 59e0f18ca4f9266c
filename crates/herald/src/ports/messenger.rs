//! Direct-Message Delivery Port

use async_trait::async_trait;

use crate::domain::entities::Recipient;
use crate::domain::errors::DomainError;

/// Delivers a direct message to a single recipient
///
/// Each call may fail independently (recipient has DMs disabled, is
/// unreachable, ...) with a descriptive reason; callers decide whether a
/// failure aborts or continues a larger run.
#[async_trait]
pub trait DirectMessenger: Send + Sync {
    async fn send_direct(&self, recipient: &Recipient, body: &str) -> Result<(), DomainError>;
}
