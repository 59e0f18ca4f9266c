//! Herald Domain Library
//!
//! Core domain types and interfaces for the Herald role-broadcast bot.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and errors
//!   - `entities/`: Core models (LogEntry, Recipient, DispatchReport, Invocation)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `DirectMessenger`: per-recipient direct-message delivery
//!   - `RoleDirectory`: fresh role-membership lookup
//!   - `ReplyTransport`: interaction reply channel, driven through the
//!     `Reply` state machine
//!
//! - **Services** (`services/`): Domain services
//!   - `LogStore`: bounded activity log
//!   - `BulkDmDispatcher`: bulk delivery with partial-failure accounting
//!   - `CommandRouter`: command dispatch and fault boundary
//!
//! Gateway-specific implementations of the ports live in the bot binary
//! crate, so every service here can be exercised against fakes.

pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types
pub use domain::{
    DispatchOutcome, DispatchReport, DomainError, Invocation, LogEntry, LogFilter, LogKind,
    Recipient, RoleRef, StatusSnapshot,
};
pub use ports::{DirectMessenger, Reply, ReplyState, ReplyTransport, RoleDirectory};
pub use services::{format_uptime, BulkDmDispatcher, CommandRouter, LogStore};
