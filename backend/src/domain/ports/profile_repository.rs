//! Driven port for the `students` and `propertyOwners` collections.

use async_trait::async_trait;

use crate::domain::{OwnerProfile, StudentProfile, UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile store adapters.
    pub enum ProfileRepositoryError {
        Connection { message: String } => "profile store connection failed: {message}",
        Query { message: String } => "profile store query failed: {message}",
    }
}

/// Profile documents keyed by identity id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_student(
        &self,
        id: &UserId,
    ) -> Result<Option<StudentProfile>, ProfileRepositoryError>;

    async fn find_owner(&self, id: &UserId) -> Result<Option<OwnerProfile>, ProfileRepositoryError>;

    /// Write the profile into the collection matching its role.
    async fn save(&self, profile: &UserProfile) -> Result<(), ProfileRepositoryError>;
}
