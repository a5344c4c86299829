//! Account use-cases: signup, login, logout and profile edits.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::forms::ProfileEdit;
use crate::domain::ports::{AccountService, IdentityProvider, ProfileRepository, SignedIn};
use crate::domain::{
    Error, LoginCredentials, RoleResolution, SignupCredentials, UserId, UserProfile, port_errors,
};

/// Account service backed by an identity provider and the profile store.
#[derive(Clone)]
pub struct AccountCommandService<I, P> {
    identity: Arc<I>,
    profiles: Arc<P>,
}

impl<I, P> AccountCommandService<I, P> {
    /// Service over the identity provider and profile store.
    pub fn new(identity: Arc<I>, profiles: Arc<P>) -> Self {
        Self { identity, profiles }
    }
}

impl<I, P> AccountCommandService<I, P>
where
    I: IdentityProvider,
    P: ProfileRepository,
{
    async fn lookup(&self, user_id: &UserId) -> Result<RoleResolution, Error> {
        let student = self
            .profiles
            .find_student(user_id)
            .await
            .map_err(port_errors::profile)?;
        let owner = self
            .profiles
            .find_owner(user_id)
            .await
            .map_err(port_errors::profile)?;
        Ok(RoleResolution::from_lookups(user_id, student, owner))
    }
}

#[async_trait]
impl<I, P> AccountService for AccountCommandService<I, P>
where
    I: IdentityProvider,
    P: ProfileRepository,
{
    async fn sign_up(&self, signup: &SignupCredentials) -> Result<UserProfile, Error> {
        let user_id = self
            .identity
            .sign_up(signup.credentials())
            .await
            .map_err(port_errors::identity)?;
        let profile = UserProfile::new_for_signup(
            user_id.clone(),
            signup.name().clone(),
            signup.email().clone(),
            signup.role(),
        );
        if let Err(error) = self.profiles.save(&profile).await {
            // The identity exists without a profile; the role gate sends it
            // to onboarding on the next visit.
            warn!(user_id = %user_id, error = %error, "profile write failed after signup");
            return Err(port_errors::profile(error));
        }
        info!(user_id = %user_id, role = %signup.role(), "account created");
        Ok(profile)
    }

    async fn log_in(&self, credentials: &LoginCredentials) -> Result<SignedIn, Error> {
        let user_id = self
            .identity
            .sign_in(credentials)
            .await
            .map_err(port_errors::identity)?;
        let resolution = self.lookup(&user_id).await?;
        info!(user_id = %user_id, role = ?resolution.role(), "signed in");
        Ok(SignedIn {
            user_id,
            resolution,
        })
    }

    async fn log_out(&self, user_id: &UserId) -> Result<(), Error> {
        self.identity
            .sign_out(user_id)
            .await
            .map_err(port_errors::identity)
    }

    async fn resolve_role(&self, user_id: &UserId) -> Result<RoleResolution, Error> {
        self.lookup(user_id).await
    }

    async fn edit_profile(
        &self,
        user_id: &UserId,
        edit: ProfileEdit,
    ) -> Result<UserProfile, Error> {
        let RoleResolution::Known(profile) = self.lookup(user_id).await? else {
            return Err(Error::not_found("profile not found"));
        };
        let updated = match (profile, edit) {
            (UserProfile::Student(mut student), ProfileEdit::Student { college_name }) => {
                student.college_name = college_name;
                UserProfile::Student(student)
            }
            (UserProfile::Owner(mut owner), ProfileEdit::Owner { contact_number }) => {
                owner.contact_number = contact_number.into();
                UserProfile::Owner(owner)
            }
            (profile, _) => {
                return Err(Error::forbidden(format!(
                    "profile edit does not match the {} role",
                    profile.role()
                )));
            }
        };
        self.profiles
            .save(&updated)
            .await
            .map_err(port_errors::profile)?;
        Ok(updated)
    }
}
