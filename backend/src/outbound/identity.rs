//! In-process identity provider.
//!
//! Accounts are keyed by lower-cased email and store an Argon2id PHC string
//! per account. Successful sign-ins and sign-outs are published through the
//! process-wide [`AuthContext`].

use std::collections::HashMap;

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{AuthContext, AuthPublisher, Email, LoginCredentials, UserId};

struct Account {
    user_id: UserId,
    password_hash: String,
}

impl Account {
    fn new(user_id: UserId, password: &str) -> Result<Self, IdentityProviderError> {
        Ok(Self {
            user_id,
            password_hash: hash_password(password)?,
        })
    }

    /// Constant-time check against the stored hash.
    fn verify(&self, password: &str) -> bool {
        PasswordHash::new(&self.password_hash).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
    }
}

fn hash_password(password: &str) -> Result<String, IdentityProviderError> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
        .map_err(|error| IdentityProviderError::unavailable(format!("password salt: {error}")))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|error| IdentityProviderError::unavailable(format!("password hashing: {error}")))
}

/// Identity provider keeping accounts in memory.
pub struct LocalIdentityProvider {
    accounts: Mutex<HashMap<Email, Account>>,
    publisher: AuthPublisher,
}

impl Default for LocalIdentityProvider {
    fn default() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            publisher: AuthPublisher::default(),
        }
    }
}

impl LocalIdentityProvider {
    /// Register an account with a fixed id, used to pair seeded profiles
    /// with credentials.
    pub async fn register(
        &self,
        user_id: UserId,
        credentials: &LoginCredentials,
    ) -> Result<(), IdentityProviderError> {
        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(credentials.email()) {
            return Err(IdentityProviderError::email_in_use(
                credentials.email().as_ref(),
            ));
        }
        let account = Account::new(user_id, credentials.password())?;
        accounts.insert(credentials.email().clone(), account);
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_up(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<UserId, IdentityProviderError> {
        let user_id = UserId::random();
        self.register(user_id.clone(), credentials).await?;
        info!(user_id = %user_id, "account created");
        self.publisher.signed_in(user_id.clone());
        Ok(user_id)
    }

    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<UserId, IdentityProviderError> {
        let user_id = {
            let accounts = self.accounts.lock().await;
            accounts
                .get(credentials.email())
                .filter(|account| account.verify(credentials.password()))
                .map(|account| account.user_id.clone())
        };
        let Some(user_id) = user_id else {
            debug!("sign-in rejected");
            return Err(IdentityProviderError::invalid_credentials());
        };
        self.publisher.signed_in(user_id.clone());
        Ok(user_id)
    }

    async fn sign_out(&self, user_id: &UserId) -> Result<(), IdentityProviderError> {
        self.publisher.signed_out(user_id);
        Ok(())
    }

    fn auth_context(&self) -> AuthContext {
        self.publisher.context()
    }
}
