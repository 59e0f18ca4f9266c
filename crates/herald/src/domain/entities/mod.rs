//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - LogEntry / LogKind / LogFilter: bounded activity log records
//! - Recipient / DispatchReport / DispatchOutcome: bulk delivery
//! - Invocation / RoleRef / StatusSnapshot: inbound command events

mod dispatch;
mod invocation;
mod log;

pub use dispatch::*;
pub use invocation::*;
pub use log::*;
