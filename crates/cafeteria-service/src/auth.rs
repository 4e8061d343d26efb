//! Session and account adapter surface

use crate::ServiceResult;
use async_trait::async_trait;
use cafeteria_model::{Campus, User};

/// Authentication operations backed by the platform sign-in provider and
/// the backend's auth service
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Run the platform sign-in flow and exchange its credential for a
    /// backend session
    async fn sign_in_with_apple(&self) -> ServiceResult<User>;

    /// End the current session
    async fn sign_out(&self) -> ServiceResult<()>;

    /// Delete the signed-in account and end its session
    async fn delete_account(&self) -> ServiceResult<()>;

    /// Load the persisted session, if any
    async fn restore_session(&self) -> ServiceResult<Option<User>>;

    /// Change the signed-in user's campus affiliation
    async fn update_user_campus(&self, campus: Campus) -> ServiceResult<()>;
}
