//! Authentication primitives and the process-wide auth context.
//!
//! Credentials are built by the account forms; plaintext passwords live in
//! [`Zeroizing`] buffers so they are wiped once the request completes.
//! [`AuthContext`] is a read-only view of who is signed in. Only the identity
//! provider holds the publishing half.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::watch;
use zeroize::Zeroizing;

use super::{Email, PersonName, Role, UserId};

/// Minimum accepted password length at signup.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Validated login credentials.
///
/// # Examples
/// ```
/// use campus_connect::domain::{Email, LoginCredentials};
///
/// let creds = LoginCredentials::new(Email::new("asha@example.com").unwrap(), "hunter22");
/// assert_eq!(creds.email().as_ref(), "asha@example.com");
/// assert_eq!(creds.password(), "hunter22");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// The password is kept verbatim, whitespace included.
    pub fn new(email: Email, password: &str) -> Self {
        Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        }
    }

    /// Login email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plaintext password, wiped on drop.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated signup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupCredentials {
    name: PersonName,
    credentials: LoginCredentials,
    role: Role,
}

impl SignupCredentials {
    /// Bundle validated signup fields.
    pub fn new(name: PersonName, credentials: LoginCredentials, role: Role) -> Self {
        Self {
            name,
            credentials,
            role,
        }
    }

    /// Display name for the new profile.
    pub fn name(&self) -> &PersonName {
        &self.name
    }

    /// Credentials handed to the identity provider.
    pub fn credentials(&self) -> &LoginCredentials {
        &self.credentials
    }

    /// Email of the new account.
    pub fn email(&self) -> &Email {
        self.credentials.email()
    }

    /// Role collection the profile is written to.
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Snapshot of the signed-in identities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSnapshot {
    signed_in: BTreeSet<UserId>,
}

impl AuthSnapshot {
    /// Whether `user_id` currently has a sign-in.
    pub fn is_signed_in(&self, user_id: &UserId) -> bool {
        self.signed_in.contains(user_id)
    }

    /// Number of signed-in identities.
    pub fn signed_in_count(&self) -> usize {
        self.signed_in.len()
    }
}

/// Read-only, cloneable handle on the current auth state.
///
/// # Examples
/// ```
/// use campus_connect::domain::{AuthPublisher, UserId};
///
/// let publisher = AuthPublisher::default();
/// let context = publisher.context();
/// let user = UserId::random();
/// publisher.signed_in(user.clone());
/// assert!(context.current().is_signed_in(&user));
/// ```
#[derive(Debug, Clone)]
pub struct AuthContext {
    receiver: watch::Receiver<Arc<AuthSnapshot>>,
}

impl AuthContext {
    /// Latest snapshot.
    pub fn current(&self) -> Arc<AuthSnapshot> {
        Arc::clone(&self.receiver.borrow())
    }

    /// Independent receiver that is notified on every change.
    pub fn subscribe(&self) -> watch::Receiver<Arc<AuthSnapshot>> {
        self.receiver.clone()
    }
}

/// Publishing half of the auth context. Owned by the identity provider.
#[derive(Debug)]
pub struct AuthPublisher {
    sender: watch::Sender<Arc<AuthSnapshot>>,
}

impl Default for AuthPublisher {
    fn default() -> Self {
        let (sender, _receiver) = watch::channel(Arc::new(AuthSnapshot::default()));
        Self { sender }
    }
}

impl AuthPublisher {
    /// Read-only handle observing this publisher.
    pub fn context(&self) -> AuthContext {
        AuthContext {
            receiver: self.sender.subscribe(),
        }
    }

    /// Record a sign-in; observers are notified only on change.
    pub fn signed_in(&self, user_id: UserId) {
        self.sender.send_if_modified(|snapshot| {
            if snapshot.is_signed_in(&user_id) {
                return false;
            }
            Arc::make_mut(snapshot).signed_in.insert(user_id);
            true
        });
    }

    /// Record a sign-out; observers are notified only on change.
    pub fn signed_out(&self, user_id: &UserId) {
        self.sender.send_if_modified(|snapshot| {
            if !snapshot.is_signed_in(user_id) {
                return false;
            }
            Arc::make_mut(snapshot).signed_in.remove(user_id);
            true
        });
    }
}
