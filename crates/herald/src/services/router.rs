//! Command Router
//!
//! Dispatches an inbound invocation to the matching handler and converts
//! handler faults into a generic failure reply at the routing boundary.
//! Unknown command names are ignored outright.

use std::sync::Arc;

use chrono::Local;
use tracing::warn;

use crate::domain::entities::{DispatchOutcome, Invocation, LogEntry, LogFilter, LogKind};
use crate::domain::errors::DomainError;
use crate::ports::directory::RoleDirectory;
use crate::ports::messenger::DirectMessenger;
use crate::ports::reply::{Reply, ReplyTransport};
use crate::services::dispatch::BulkDmDispatcher;
use crate::services::log_store::LogStore;
use crate::services::uptime::format_uptime;

/// Command names as registered with the gateway
pub const DM_ROLE: &str = "dm-role";
pub const STATUS: &str = "status";
pub const LOGS: &str = "logs";

/// Most recent entries rendered by the logs command
const RENDERED_LOG_LIMIT: usize = 10;

const GENERIC_FAILURE_REPLY: &str = "There was an error executing this command.";

/// Routes invocations to the closed set of command handlers
pub struct CommandRouter<D: RoleDirectory, M: DirectMessenger> {
    logs: Arc<LogStore>,
    directory: D,
    dispatcher: BulkDmDispatcher<M>,
}

impl<D: RoleDirectory, M: DirectMessenger> CommandRouter<D, M> {
    pub fn new(logs: Arc<LogStore>, directory: D, dispatcher: BulkDmDispatcher<M>) -> Self {
        Self {
            logs,
            directory,
            dispatcher,
        }
    }

    /// Dispatch `invocation` to its handler
    ///
    /// An unrecognized command name is a silent no-op: no reply, no log
    /// entry. A handler fault is logged and answered with a generic
    /// failure reply over whichever path the reply state requires; faults
    /// never escape this method.
    pub async fn route<T: ReplyTransport>(&self, invocation: Invocation, reply: &mut Reply<T>) {
        let outcome = match invocation.command.as_str() {
            DM_ROLE => self.handle_dm_role(&invocation, reply).await,
            STATUS => self.handle_status(&invocation, reply).await,
            LOGS => self.handle_logs(&invocation, reply).await,
            _ => return,
        };

        if let Err(fault) = outcome {
            self.logs.append(
                LogKind::Error,
                format!("Error executing command {}: {fault}", invocation.command),
            );
            if let Err(reply_fault) = reply.send_or_edit(GENERIC_FAILURE_REPLY).await {
                warn!(
                    command = %invocation.command,
                    error = %reply_fault,
                    "Failed to deliver the failure reply"
                );
            }
        }
    }

    async fn handle_dm_role<T: ReplyTransport>(
        &self,
        invocation: &Invocation,
        reply: &mut Reply<T>,
    ) -> Result<(), DomainError> {
        reply.defer().await?;

        let role = invocation
            .role
            .as_ref()
            .ok_or_else(|| DomainError::Validation("dm-role invoked without a role".to_string()))?;
        let message = invocation.message.as_deref().ok_or_else(|| {
            DomainError::Validation("dm-role invoked without a message".to_string())
        })?;
        let guild_id = invocation.guild_id.as_deref().ok_or_else(|| {
            DomainError::Validation("dm-role invoked outside a server".to_string())
        })?;

        let recipients = self.directory.members_with_role(guild_id, &role.id).await?;

        if recipients.is_empty() {
            self.dispatcher
                .dispatch(&recipients, message, &invocation.sender_label)
                .await;
            reply
                .send_or_edit(&format!("No members found with the role {}", role.name))
                .await?;
            return Ok(());
        }

        reply
            .send_or_edit(&format!(
                "Starting to send DMs to {} members with role {}...",
                recipients.len(),
                role.name
            ))
            .await?;

        if let DispatchOutcome::Completed(report) = self
            .dispatcher
            .dispatch(&recipients, message, &invocation.sender_label)
            .await
        {
            reply
                .send_or_edit(&format!(
                    "Completed sending DMs to members with role {}.\n\
                     ✅ Successfully sent: {}\n\
                     ❌ Failed to send: {}",
                    role.name, report.sent, report.failed
                ))
                .await?;
            self.logs.append(
                LogKind::Info,
                format!(
                    "Completed DM to role {}. Success: {}, Failed: {}",
                    role.name, report.sent, report.failed
                ),
            );
        }

        Ok(())
    }

    async fn handle_status<T: ReplyTransport>(
        &self,
        invocation: &Invocation,
        reply: &mut Reply<T>,
    ) -> Result<(), DomainError> {
        let snapshot = invocation.status.clone().unwrap_or_default();
        let latency = snapshot
            .latency_ms
            .map(|ms| format!("{ms}ms"))
            .unwrap_or_else(|| "n/a".to_string());

        reply
            .send_or_edit(&format!(
                "🤖 Bot Status\n\
                 Status: 🟢 Online\n\
                 Uptime: {}\n\
                 Server: {}\n\
                 Latency: {latency}",
                format_uptime(snapshot.started_at),
                snapshot.server_label,
            ))
            .await
    }

    async fn handle_logs<T: ReplyTransport>(
        &self,
        invocation: &Invocation,
        reply: &mut Reply<T>,
    ) -> Result<(), DomainError> {
        let filter: LogFilter = invocation.filter.as_deref().unwrap_or("all").parse()?;

        let entries = self.logs.query(filter);
        let recent: Vec<&LogEntry> = entries.iter().rev().take(RENDERED_LOG_LIMIT).collect();

        if recent.is_empty() {
            reply
                .send_or_edit(&format!("No logs found with filter: {filter}"))
                .await?;
            return Ok(());
        }

        let lines: Vec<String> = recent
            .iter()
            .map(|entry| {
                format!(
                    "[{}] [{}] {}",
                    entry.timestamp.with_timezone(&Local).format("%H:%M:%S"),
                    entry.kind.as_str().to_uppercase(),
                    entry.message
                )
            })
            .collect();

        reply.send_or_edit(&lines.join("\n")).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::entities::{Recipient, RoleRef, StatusSnapshot};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Defer,
        Initial(String),
        Edit(String),
    }

    #[derive(Clone, Default)]
    struct RecordingTransport {
        calls: Arc<Mutex<Vec<Call>>>,
    }

    impl RecordingTransport {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReplyTransport for RecordingTransport {
        async fn defer(&self) -> Result<(), DomainError> {
            self.calls.lock().unwrap().push(Call::Defer);
            Ok(())
        }

        async fn send_initial(&self, content: &str) -> Result<(), DomainError> {
            self.calls.lock().unwrap().push(Call::Initial(content.to_string()));
            Ok(())
        }

        async fn edit(&self, content: &str) -> Result<(), DomainError> {
            self.calls.lock().unwrap().push(Call::Edit(content.to_string()));
            Ok(())
        }
    }

    /// Directory with a fixed member set, or a simulated fetch failure.
    struct FakeDirectory {
        members: Result<Vec<Recipient>, ()>,
    }

    #[async_trait]
    impl RoleDirectory for FakeDirectory {
        async fn members_with_role(
            &self,
            _guild_id: &str,
            _role_id: &str,
        ) -> Result<Vec<Recipient>, DomainError> {
            self.members.clone().map_err(|_| {
                DomainError::ExternalService("member fetch failed: timed out".to_string())
            })
        }
    }

    #[derive(Default)]
    struct FakeMessenger {
        failing: HashSet<String>,
    }

    #[async_trait]
    impl DirectMessenger for FakeMessenger {
        async fn send_direct(
            &self,
            recipient: &Recipient,
            _body: &str,
        ) -> Result<(), DomainError> {
            if self.failing.contains(&recipient.id) {
                return Err(DomainError::Delivery("DMs disabled".to_string()));
            }
            Ok(())
        }
    }

    fn router_with(
        logs: Arc<LogStore>,
        members: Result<Vec<Recipient>, ()>,
        failing: &[&str],
    ) -> CommandRouter<FakeDirectory, FakeMessenger> {
        let messenger = FakeMessenger {
            failing: failing.iter().map(|id| id.to_string()).collect(),
        };
        CommandRouter::new(
            logs.clone(),
            FakeDirectory { members },
            BulkDmDispatcher::new(messenger, logs),
        )
    }

    fn dm_role_invocation() -> Invocation {
        Invocation::new(DM_ROLE, "admin#0001")
            .with_guild("42")
            .with_role(RoleRef::new("7", "Moderators"))
            .with_message("meeting at noon")
    }

    #[tokio::test]
    async fn test_unknown_command_is_a_silent_noop() {
        let logs = Arc::new(LogStore::new());
        let router = router_with(logs.clone(), Ok(vec![]), &[]);
        let transport = RecordingTransport::default();
        let mut reply = Reply::new(transport.clone());

        router
            .route(Invocation::new("ban-hammer", "admin#0001"), &mut reply)
            .await;

        assert!(transport.calls().is_empty());
        assert!(logs.is_empty());
    }

    #[tokio::test]
    async fn test_dm_role_partial_failure_summary() {
        let logs = Arc::new(LogStore::new());
        let members = vec![
            Recipient::new("1", "alice#0001"),
            Recipient::new("2", "bob#0002"),
            Recipient::new("3", "carol#0003"),
        ];
        let router = router_with(logs.clone(), Ok(members), &["2"]);
        let transport = RecordingTransport::default();
        let mut reply = Reply::new(transport.clone());

        router.route(dm_role_invocation(), &mut reply).await;

        let calls = transport.calls();
        assert_eq!(calls[0], Call::Defer);
        assert!(matches!(&calls[1], Call::Edit(text) if text.contains("Starting to send DMs to 3 members")));
        let Call::Edit(summary) = &calls[2] else {
            panic!("expected a summary edit, got {:?}", calls[2]);
        };
        assert!(summary.contains("Successfully sent: 2"));
        assert!(summary.contains("Failed to send: 1"));

        // 2 success + 1 error + 1 info summary
        assert_eq!(logs.query(LogFilter::Kind(LogKind::Success)).len(), 2);
        assert_eq!(logs.query(LogFilter::Kind(LogKind::Error)).len(), 1);
        assert_eq!(logs.query(LogFilter::Kind(LogKind::Info)).len(), 1);
        assert_eq!(logs.len(), 4);
    }

    #[tokio::test]
    async fn test_dm_role_with_no_members() {
        let logs = Arc::new(LogStore::new());
        let router = router_with(logs.clone(), Ok(vec![]), &[]);
        let transport = RecordingTransport::default();
        let mut reply = Reply::new(transport.clone());

        router.route(dm_role_invocation(), &mut reply).await;

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(&calls[1], Call::Edit(text) if text == "No members found with the role Moderators"));
        assert_eq!(logs.query(LogFilter::Kind(LogKind::Info)).len(), 1);
        assert_eq!(logs.len(), 1);
    }

    #[tokio::test]
    async fn test_fault_after_defer_uses_edit_path() {
        let logs = Arc::new(LogStore::new());
        let router = router_with(logs.clone(), Err(()), &[]);
        let transport = RecordingTransport::default();
        let mut reply = Reply::new(transport.clone());

        router.route(dm_role_invocation(), &mut reply).await;

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], Call::Defer);
        assert!(matches!(&calls[1], Call::Edit(text) if text == GENERIC_FAILURE_REPLY));

        let errors = logs.query(LogFilter::Kind(LogKind::Error));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("dm-role"));
        assert!(errors[0].message.contains("member fetch failed"));
    }

    #[tokio::test]
    async fn test_fault_before_reply_uses_initial_path() {
        let logs = Arc::new(LogStore::new());
        let router = router_with(logs.clone(), Ok(vec![]), &[]);
        let transport = RecordingTransport::default();
        let mut reply = Reply::new(transport.clone());

        // The logs handler never defers; a bad filter faults while fresh.
        let invocation = Invocation::new(LOGS, "admin#0001").with_filter("bogus");
        router.route(invocation, &mut reply).await;

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert!(matches!(&calls[0], Call::Initial(text) if text == GENERIC_FAILURE_REPLY));
        assert_eq!(logs.query(LogFilter::Kind(LogKind::Error)).len(), 1);
    }

    #[tokio::test]
    async fn test_logs_renders_most_recent_first() {
        let logs = Arc::new(LogStore::new());
        for i in 0..15 {
            logs.append(LogKind::Info, format!("event {i}"));
        }
        let router = router_with(logs.clone(), Ok(vec![]), &[]);
        let transport = RecordingTransport::default();
        let mut reply = Reply::new(transport.clone());

        router
            .route(Invocation::new(LOGS, "admin#0001"), &mut reply)
            .await;

        let calls = transport.calls();
        let Call::Initial(rendered) = &calls[0] else {
            panic!("expected an initial reply, got {:?}", calls[0]);
        };
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].ends_with("event 14"));
        assert!(lines[9].ends_with("event 5"));
        assert!(lines[0].contains("[INFO]"));
    }

    #[tokio::test]
    async fn test_logs_filter_with_no_matches() {
        let logs = Arc::new(LogStore::new());
        logs.append(LogKind::Info, "startup");
        let router = router_with(logs.clone(), Ok(vec![]), &[]);
        let transport = RecordingTransport::default();
        let mut reply = Reply::new(transport.clone());

        let invocation = Invocation::new(LOGS, "admin#0001").with_filter("error");
        router.route(invocation, &mut reply).await;

        assert_eq!(
            transport.calls(),
            vec![Call::Initial("No logs found with filter: error".to_string())]
        );
    }

    #[tokio::test]
    async fn test_status_renders_snapshot() {
        let logs = Arc::new(LogStore::new());
        let router = router_with(logs.clone(), Ok(vec![]), &[]);
        let transport = RecordingTransport::default();
        let mut reply = Reply::new(transport.clone());

        let snapshot = StatusSnapshot {
            started_at: None,
            server_label: "Test Server".to_string(),
            latency_ms: Some(42),
        };
        let invocation = Invocation::new(STATUS, "admin#0001").with_status(snapshot);
        router.route(invocation, &mut reply).await;

        let calls = transport.calls();
        let Call::Initial(rendered) = &calls[0] else {
            panic!("expected an initial reply, got {:?}", calls[0]);
        };
        assert!(rendered.contains("Online"));
        assert!(rendered.contains("Uptime: Not available"));
        assert!(rendered.contains("Server: Test Server"));
        assert!(rendered.contains("Latency: 42ms"));
        assert!(logs.is_empty());
    }
}
