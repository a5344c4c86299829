//! Driving port for generated recommendations and summaries.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{DataSource, Error, ListingId, Recommendation, RecommendationRequest};

/// Generated summary of one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummary {
    #[schema(value_type = String)]
    pub property_id: ListingId,
    pub summary: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationQuery: Send + Sync {
    /// Engine failures and invalid engine output are `service_unavailable`.
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Recommendation>, Error>;

    async fn summarise(&self, id: &ListingId, source: DataSource)
    -> Result<PropertySummary, Error>;
}
