//! Driving port for student reviews and suggestions.

use async_trait::async_trait;

use crate::domain::forms::{NewReview, SuggestionMessage};
use crate::domain::{Error, Review, ReviewTarget, Suggestion, UserId};

/// Append-only feedback writes. Repeat submissions are stored as-is.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackCommand: Send + Sync {
    /// Store the review and fold its rating into the listing aggregate.
    async fn submit_review(
        &self,
        student: &UserId,
        target: ReviewTarget,
        review: NewReview,
    ) -> Result<Review, Error>;

    /// Route a suggestion to the owner of the student's booked property.
    async fn submit_suggestion(
        &self,
        student: &UserId,
        message: SuggestionMessage,
    ) -> Result<Suggestion, Error>;
}
