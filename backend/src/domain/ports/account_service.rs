//! Driving port for signup, login and profile use-cases.
//!
//! Inbound adapters call this port and keep the returned role in the
//! session; they never probe the profile collections themselves.

use async_trait::async_trait;

use crate::domain::forms::ProfileEdit;
use crate::domain::{
    Error, LoginCredentials, RoleResolution, SignupCredentials, UserId, UserProfile,
};

/// Outcome of a successful login.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedIn {
    pub user_id: UserId,
    pub resolution: RoleResolution,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create the identity and its role profile.
    async fn sign_up(&self, signup: &SignupCredentials) -> Result<UserProfile, Error>;

    async fn log_in(&self, credentials: &LoginCredentials) -> Result<SignedIn, Error>;

    async fn log_out(&self, user_id: &UserId) -> Result<(), Error>;

    /// Probe students, then owners.
    async fn resolve_role(&self, user_id: &UserId) -> Result<RoleResolution, Error>;

    async fn edit_profile(&self, user_id: &UserId, edit: ProfileEdit)
    -> Result<UserProfile, Error>;
}
