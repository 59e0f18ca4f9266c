//! Reply Channel Port
//!
//! The gateway accepts exactly one initial response per invocation;
//! everything after that must go through the edit path, and picking the
//! wrong one is a protocol-level double-reply error. `Reply` owns that
//! decision as a small state machine so handlers never touch it.

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// Raw reply operations on one invocation's reply channel
#[async_trait]
pub trait ReplyTransport: Send + Sync {
    /// Acknowledge the invocation with a placeholder, to be completed later
    async fn defer(&self) -> Result<(), DomainError>;

    /// Send the first (and only) initial response
    async fn send_initial(&self, content: &str) -> Result<(), DomainError>;

    /// Edit the already-started response
    async fn edit(&self, content: &str) -> Result<(), DomainError>;
}

/// Where an invocation's reply currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyState {
    /// Nothing sent yet
    Fresh,
    /// Placeholder acknowledged, awaiting content
    Deferred,
    /// A response with content exists
    Replied,
}

/// Reply channel for one invocation
pub struct Reply<T: ReplyTransport> {
    transport: T,
    state: ReplyState,
}

impl<T: ReplyTransport> Reply<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: ReplyState::Fresh,
        }
    }

    pub fn state(&self) -> ReplyState {
        self.state
    }

    /// Acknowledge with a placeholder reply
    ///
    /// Valid only before anything has been sent.
    pub async fn defer(&mut self) -> Result<(), DomainError> {
        match self.state {
            ReplyState::Fresh => {
                self.transport.defer().await?;
                self.state = ReplyState::Deferred;
                Ok(())
            }
            _ => Err(DomainError::Gateway(
                "cannot defer a reply that was already started".to_string(),
            )),
        }
    }

    /// Deliver content over whichever path the current state requires:
    /// a fresh initial response, or an edit of the existing one.
    pub async fn send_or_edit(&mut self, content: &str) -> Result<(), DomainError> {
        match self.state {
            ReplyState::Fresh => self.transport.send_initial(content).await?,
            ReplyState::Deferred | ReplyState::Replied => self.transport.edit(content).await?,
        }
        self.state = ReplyState::Replied;
        Ok(())
    }
}
