//! Log Entities
//!
//! Records held by the bounded activity log.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Classification of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Success,
    Error,
    Info,
}

impl LogKind {
    /// Wire/display form, lowercase
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogKind {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "info" => Ok(Self::Info),
            other => Err(DomainError::Validation(format!(
                "unknown log kind: {other}"
            ))),
        }
    }
}

/// Filter applied when querying the activity log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFilter {
    /// Sentinel: every entry, regardless of kind
    All,
    /// Only entries of the given kind
    Kind(LogKind),
}

impl fmt::Display for LogFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Kind(kind) => f.write_str(kind.as_str()),
        }
    }
}

impl FromStr for LogFilter {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(Self::All),
            other => other.parse().map(Self::Kind),
        }
    }
}

/// An immutable activity log record
///
/// Created only by `LogStore::append`, never mutated, dropped when the
/// store evicts it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub kind: LogKind,
    pub message: String,
    /// Set at creation time
    pub timestamp: DateTime<Utc>,
}
