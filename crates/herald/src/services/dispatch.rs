//! Bulk Direct-Message Dispatcher
//!
//! Iterates a recipient set, delivering one direct message at a time
//! through the `DirectMessenger` port. A failed delivery never aborts
//! the run; it is counted, logged, and the loop moves on.

use std::sync::Arc;

use crate::domain::entities::{DispatchOutcome, DispatchReport, LogKind, Recipient};
use crate::ports::messenger::DirectMessenger;
use crate::services::log_store::LogStore;

/// Bulk delivery with per-recipient failure accounting
pub struct BulkDmDispatcher<M: DirectMessenger> {
    messenger: M,
    logs: Arc<LogStore>,
}

impl<M: DirectMessenger> BulkDmDispatcher<M> {
    pub fn new(messenger: M, logs: Arc<LogStore>) -> Self {
        Self { messenger, logs }
    }

    /// Send `message` (attributed to `sender_label`) to every recipient
    ///
    /// Recipients are processed exactly once, in the order the slice
    /// provides, one awaited delivery at a time. Each outcome lands in
    /// the log store: `success` per delivery, `error` per failure with
    /// the recipient label and reason. After a completed run,
    /// `sent + failed` equals `recipients.len()`.
    ///
    /// An empty recipient set attempts nothing, logs a single info entry,
    /// and returns the distinct `NoRecipients` signal so the caller can
    /// render "no members found" instead of a 0/0 summary.
    pub async fn dispatch(
        &self,
        recipients: &[Recipient],
        message: &str,
        sender_label: &str,
    ) -> DispatchOutcome {
        if recipients.is_empty() {
            self.logs
                .append(LogKind::Info, "No recipients matched the requested role");
            return DispatchOutcome::NoRecipients;
        }

        let body = format!("Message from {sender_label}: {message}");
        let mut report = DispatchReport::default();

        for recipient in recipients {
            match self.messenger.send_direct(recipient, &body).await {
                Ok(()) => {
                    report.sent += 1;
                    self.logs
                        .append(LogKind::Success, format!("Sent DM to {}", recipient.label));
                }
                Err(reason) => {
                    report.failed += 1;
                    self.logs.append(
                        LogKind::Error,
                        format!("Failed to send DM to {}: {reason}", recipient.label),
                    );
                }
            }
        }

        DispatchOutcome::Completed(report)
    }
}
