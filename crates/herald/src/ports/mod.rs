//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer interacts with
//! the gateway: direct-message delivery, role-membership lookup, and the
//! invocation reply channel.
//!
//! Implementations of these traits live in the bot binary crate.

pub mod directory;
pub mod messenger;
pub mod reply;

// Re-exports
pub use directory::*;
pub use messenger::*;
pub use reply::*;
