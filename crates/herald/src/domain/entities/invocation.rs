//! Invocation Entities
//!
//! The platform-neutral view of one inbound command event: the command
//! name, the issuing user, and the options the gateway resolved for it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A role referenced by a command option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRef {
    /// Stable platform identifier
    pub id: String,
    /// Human-readable role name
    pub name: String,
}

impl RoleRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Read-only connection snapshot rendered by the `status` command
///
/// Resolved entirely by the gateway adapter; the router holds no
/// connection state of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// When the gateway connection became ready, if it has
    pub started_at: Option<DateTime<Utc>>,
    /// Label of the server the command was issued from
    pub server_label: String,
    /// Current gateway latency, when the shard has measured one
    pub latency_ms: Option<u64>,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            started_at: None,
            server_label: "unknown".to_string(),
            latency_ms: None,
        }
    }
}

/// One inbound command invocation
///
/// Option fields are populated only when the gateway supplied them; each
/// handler validates the ones it requires.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Command name as registered with the gateway
    pub command: String,
    /// Display tag of the issuing user
    pub sender_label: String,
    /// Originating server, absent for direct-message invocations
    pub guild_id: Option<String>,
    /// `role` option (dm-role)
    pub role: Option<RoleRef>,
    /// `message` option (dm-role)
    pub message: Option<String>,
    /// `filter` option (logs)
    pub filter: Option<String>,
    /// Connection snapshot (status)
    pub status: Option<StatusSnapshot>,
}

impl Invocation {
    pub fn new(command: impl Into<String>, sender_label: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            sender_label: sender_label.into(),
            guild_id: None,
            role: None,
            message: None,
            filter: None,
            status: None,
        }
    }

    pub fn with_guild(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = Some(guild_id.into());
        self
    }

    pub fn with_role(mut self, role: RoleRef) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_status(mut self, status: StatusSnapshot) -> Self {
        self.status = Some(status);
        self
    }
}
