//! Domain Services
//!
//! - `LogStore`: bounded activity log with eviction
//! - `format_uptime`: elapsed-time rendering for the status command
//! - `BulkDmDispatcher`: bulk delivery with partial-failure accounting
//! - `CommandRouter`: command dispatch and the handler fault boundary

pub mod dispatch;
pub mod log_store;
pub mod router;
pub mod uptime;

// Re-exports
pub use dispatch::*;
pub use log_store::*;
pub use router::*;
pub use uptime::*;
