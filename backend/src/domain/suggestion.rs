//! Suggestions routed from a tenant to the owner of their booked property.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ListingId, PersonName, UserId};

/// Lifecycle state of a suggestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    #[default]
    Open,
    Resolved,
}

/// A suggestion stored under the owner's `suggestions` sub-collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    #[schema(value_type = String, format = "uuid")]
    pub student_id: UserId,
    #[schema(value_type = String)]
    pub student_name: PersonName,
    #[schema(value_type = String)]
    pub property_id: ListingId,
    pub property_name: String,
    #[schema(value_type = String, format = "uuid")]
    pub owner_id: UserId,
    pub message: String,
    pub status: SuggestionStatus,
    pub created_at: DateTime<Utc>,
}

/// Order suggestions newest first, the order owners read them in.
pub fn newest_first(suggestions: &mut [Suggestion]) {
    suggestions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
