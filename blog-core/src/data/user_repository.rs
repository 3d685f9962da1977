use async_trait::async_trait;

use crate::domain::error::DomainError;

/// User identities live outside this crate; the store only owns the content
/// hanging off an author id.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Removes everything authored by the user: their posts (comments on
    /// those posts included) and their comments on other posts. Returns the
    /// number of posts removed.
    async fn delete_user(&self, user_id: i64) -> Result<u64, DomainError>;
}
