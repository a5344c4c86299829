//! Driven port for the external identity provider.

use async_trait::async_trait;

use crate::domain::{AuthContext, LoginCredentials, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// An account already exists for this email.
        EmailInUse { email: String } => "an account already exists for {email}",
        /// Email and password do not match an account.
        InvalidCredentials => "invalid email or password",
        /// The provider could not be reached or failed internally.
        Unavailable { message: String } => "identity provider unavailable: {message}",
    }
}

/// Account creation and sign-in.
///
/// The provider owns the auth state; everyone else observes it through
/// [`IdentityProvider::auth_context`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an identity and sign it in.
    async fn sign_up(&self, credentials: &LoginCredentials) -> Result<UserId, IdentityProviderError>;

    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<UserId, IdentityProviderError>;

    async fn sign_out(&self, user_id: &UserId) -> Result<(), IdentityProviderError>;

    /// Read-only view of who is signed in.
    fn auth_context(&self) -> AuthContext;
}
