//! Role Membership Port

use async_trait::async_trait;

use crate::domain::entities::Recipient;
use crate::domain::errors::DomainError;

/// Looks up the current members of a server holding a given role
///
/// Implementations must fetch fresh membership on every call; staleness
/// is the caller's risk and never this port's to cache away. Iteration
/// order of the returned set is unspecified.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    async fn members_with_role(
        &self,
        guild_id: &str,
        role_id: &str,
    ) -> Result<Vec<Recipient>, DomainError>;
}
