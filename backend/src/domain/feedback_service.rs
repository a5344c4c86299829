//! Review and suggestion submission.
//!
//! Reviews fold into the listing's rating aggregate after they are stored.
//! Suggestions are routed to the owner of the student's booked property.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::forms::{NewReview, SuggestionMessage};
use crate::domain::ports::{
    FeedbackCommand, MessRepository, ProfileRepository, PropertyRepository, ReviewRepository,
    SuggestionRepository,
};
use crate::domain::{
    Error, Review, ReviewTarget, StudentProfile, Suggestion, SuggestionStatus, UserId,
    port_errors,
};

/// Collaborators of [`FeedbackService`].
#[derive(Clone)]
pub struct FeedbackPorts {
    pub properties: Arc<dyn PropertyRepository>,
    pub messes: Arc<dyn MessRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub suggestions: Arc<dyn SuggestionRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
}

/// Review and suggestion writes, implementing [`FeedbackCommand`].
///
/// Both are append-only. Reviews fold their rating into the listing
/// aggregate; suggestions are routed to the owner of the student's booking
/// and stamped with the injected clock.
#[derive(Clone)]
pub struct FeedbackService {
    ports: FeedbackPorts,
    clock: Arc<dyn Clock>,
}

impl FeedbackService {
    /// Service over `ports`, timestamping with `clock`.
    pub fn new(ports: FeedbackPorts, clock: Arc<dyn Clock>) -> Self {
        Self { ports, clock }
    }

    async fn require_student(&self, user_id: &UserId) -> Result<StudentProfile, Error> {
        self.ports
            .profiles
            .find_student(user_id)
            .await
            .map_err(port_errors::profile)?
            .ok_or_else(|| Error::forbidden("only students can leave feedback"))
    }

    async fn ensure_listing_exists(&self, target: &ReviewTarget) -> Result<(), Error> {
        let found = match target {
            ReviewTarget::Property(id) => self
                .ports
                .properties
                .find(id)
                .await
                .map_err(port_errors::listing)?
                .is_some(),
            ReviewTarget::Mess(id) => self
                .ports
                .messes
                .find(id)
                .await
                .map_err(port_errors::listing)?
                .is_some(),
        };
        if found {
            Ok(())
        } else {
            Err(Error::not_found(format!(
                "listing {} not found",
                target.listing_id()
            )))
        }
    }
}

#[async_trait]
impl FeedbackCommand for FeedbackService {
    async fn submit_review(
        &self,
        student: &UserId,
        target: ReviewTarget,
        review: NewReview,
    ) -> Result<Review, Error> {
        let profile = self.require_student(student).await?;
        self.ensure_listing_exists(&target).await?;

        let stored = Review {
            id: Uuid::new_v4().simple().to_string(),
            target,
            student_id: profile.id,
            student_name: profile.name,
            rating: review.rating,
            comment: review.comment,
            created_at: self.clock.utc(),
        };
        self.ports
            .reviews
            .append(stored.clone())
            .await
            .map_err(port_errors::review)?;

        let aggregate = match &stored.target {
            ReviewTarget::Property(id) => {
                self.ports.properties.record_rating(id, stored.rating).await
            }
            ReviewTarget::Mess(id) => self.ports.messes.record_rating(id, stored.rating).await,
        }
        .map_err(port_errors::listing)?;
        if let Some(aggregate) = aggregate {
            info!(
                listing_id = %stored.target.listing_id(),
                average = aggregate.average,
                count = aggregate.count,
                "review recorded"
            );
        }
        Ok(stored)
    }

    async fn submit_suggestion(
        &self,
        student: &UserId,
        message: SuggestionMessage,
    ) -> Result<Suggestion, Error> {
        let profile = self.require_student(student).await?;
        let Some(property_id) = profile.booked_property_id else {
            return Err(Error::forbidden(
                "suggestions can only be sent for a booked property",
            ));
        };
        let property = self
            .ports
            .properties
            .find(&property_id)
            .await
            .map_err(port_errors::listing)?
            .ok_or_else(|| Error::not_found(format!("property {property_id} not found")))?;

        let suggestion = Suggestion {
            id: Uuid::new_v4().simple().to_string(),
            student_id: profile.id,
            student_name: profile.name,
            property_id,
            property_name: property.name,
            owner_id: property.property_owner_id,
            message: message.into_inner(),
            status: SuggestionStatus::Open,
            created_at: self.clock.utc(),
        };
        self.ports
            .suggestions
            .append(suggestion.clone())
            .await
            .map_err(port_errors::suggestion)?;
        info!(
            property_id = %suggestion.property_id,
            owner_id = %suggestion.owner_id,
            "suggestion sent"
        );
        Ok(suggestion)
    }
}

#[cfg(test)]
#[path = "feedback_service_tests.rs"]
mod tests;
