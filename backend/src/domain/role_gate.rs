//! Classification of an authenticated identity into a role.

use tracing::warn;

use super::{OwnerProfile, Role, StudentProfile, UserId, UserProfile};

/// Where an unauthenticated visitor is sent.
pub const LOGIN_PATH: &str = "/login";
/// Where an identity without a usable profile is sent.
pub const ONBOARDING_PATH: &str = "/onboarding";

/// Outcome of the role gate.
#[derive(Debug, Clone, PartialEq)]
pub enum RoleResolution {
    Known(UserProfile),
    /// No profile, or profiles in both collections.
    Unknown,
}

impl RoleResolution {
    /// Combine the lookups from both profile collections.
    ///
    /// A user present in both collections breaks the disjointness invariant;
    /// that case degrades to [`RoleResolution::Unknown`] instead of guessing.
    pub fn from_lookups(
        user_id: &UserId,
        student: Option<StudentProfile>,
        owner: Option<OwnerProfile>,
    ) -> Self {
        match (student, owner) {
            (Some(student), None) => Self::Known(UserProfile::Student(student)),
            (None, Some(owner)) => Self::Known(UserProfile::Owner(owner)),
            (None, None) => Self::Unknown,
            (Some(_), Some(_)) => {
                warn!(user_id = %user_id, "profile found in both role collections");
                Self::Unknown
            }
        }
    }

    /// Role of a known profile.
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Known(profile) => Some(profile.role()),
            Self::Unknown => None,
        }
    }
}
