//! Session helpers keeping handlers free of cookie details.
//!
//! The session holds the signed-in user id and, once classified, the role
//! discriminant. Handlers never touch raw keys.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Role, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ROLE_KEY: &str = "role";

/// Wrapper exposing typed session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    fn insert(&self, key: &str, value: &str) -> Result<(), Error> {
        self.0
            .insert(key, value)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        self.0
            .get::<String>(key)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// Store the signed-in user and forget any role from a previous login.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0.remove(ROLE_KEY);
        self.insert(USER_ID_KEY, user_id.as_ref())
    }

    /// Store the resolved role discriminant.
    pub fn persist_role(&self, role: Role) -> Result<(), Error> {
        self.insert(ROLE_KEY, role.as_str())
    }

    /// Current user id. A tampered or malformed value counts as signed out.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let Some(raw) = self.read(USER_ID_KEY)? else {
            return Ok(None);
        };
        match UserId::new(raw) {
            Ok(id) => Ok(Some(id)),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                Ok(None)
            }
        }
    }

    /// Role stored at sign-in, if any.
    pub fn role(&self) -> Result<Option<Role>, Error> {
        let Some(raw) = self.read(ROLE_KEY)? else {
            return Ok(None);
        };
        match raw.parse::<Role>() {
            Ok(role) => Ok(Some(role)),
            Err(_) => {
                warn!(value = %raw, "invalid role in session cookie");
                Ok(None)
            }
        }
    }

    /// Drop everything held for the current user.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
