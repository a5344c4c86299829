//! Driven port for the append-only `reviews` collection.

use async_trait::async_trait;

use crate::domain::{Review, ReviewTarget};

use super::define_port_error;

define_port_error! {
    /// Errors raised by review store adapters.
    pub enum ReviewRepositoryError {
        Connection { message: String } => "review store connection failed: {message}",
        Query { message: String } => "review store query failed: {message}",
        ReadOnly => "review source is read-only",
    }
}

/// Review storage. Reviews are never edited or deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Reviews attached to `target`, in stored order.
    async fn list_for(&self, target: &ReviewTarget) -> Result<Vec<Review>, ReviewRepositoryError>;

    /// Append a review. Duplicates from the same student are accepted.
    async fn append(&self, review: Review) -> Result<(), ReviewRepositoryError>;
}
