//! Driven port for the per-owner `suggestions` sub-collections.

use async_trait::async_trait;

use crate::domain::{Suggestion, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by suggestion store adapters.
    pub enum SuggestionRepositoryError {
        Connection { message: String } => "suggestion store connection failed: {message}",
        Query { message: String } => "suggestion store query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuggestionRepository: Send + Sync {
    /// Append to the owner's sub-collection named by `suggestion.owner_id`.
    async fn append(&self, suggestion: Suggestion) -> Result<(), SuggestionRepositoryError>;

    /// The owner's suggestions, newest first.
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Suggestion>, SuggestionRepositoryError>;
}
