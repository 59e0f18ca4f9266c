//! Dispatch Entities
//!
//! Recipients and the aggregate accounting of one bulk delivery run.

use serde::{Deserialize, Serialize};

/// A member eligible to receive a direct message
///
/// Owned by the membership collaborator; referenced here only for the
/// duration of a dispatch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    /// Stable platform identifier
    pub id: String,
    /// Display label ("user#1234" style tag)
    pub label: String,
}

impl Recipient {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Aggregate counts for one completed dispatch run
///
/// Invariant: `sent + failed` equals the number of recipients processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub sent: usize,
    pub failed: usize,
}

/// Result of a bulk dispatch call
///
/// The empty-recipient case is signalled distinctly so callers can render
/// a "no members found" reply instead of a 0/0 summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The recipient set was empty; nothing was attempted
    NoRecipients,
    /// Every recipient was processed exactly once
    Completed(DispatchReport),
}
