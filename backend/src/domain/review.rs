//! Reviews left by students on a single listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ListingId, PersonName, UserId};

/// Listing a review is attached to. Exactly one of property or mess.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReviewTarget {
    Property(ListingId),
    Mess(ListingId),
}

impl ReviewTarget {
    /// Id of the reviewed listing, whatever its kind.
    pub fn listing_id(&self) -> &ListingId {
        match self {
            Self::Property(id) | Self::Mess(id) => id,
        }
    }
}

/// Integer star rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// `None` outside `1..=5`.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Star count.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("rating must be between 1 and 5, got {value}"))
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

/// A stored review.
///
/// Serialises with either `propertyId` or `messId`, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "ReviewDocument", into = "ReviewDocument")]
pub struct Review {
    #[schema(value_type = String)]
    pub id: String,
    #[schema(value_type = String)]
    pub target: ReviewTarget,
    #[schema(value_type = String, format = "uuid")]
    pub student_id: UserId,
    #[schema(value_type = String)]
    pub student_name: PersonName,
    #[schema(value_type = u8)]
    pub rating: Rating,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewDocument {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    property_id: Option<ListingId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mess_id: Option<ListingId>,
    student_id: UserId,
    student_name: PersonName,
    rating: Rating,
    comment: String,
    created_at: DateTime<Utc>,
}

impl From<Review> for ReviewDocument {
    fn from(value: Review) -> Self {
        let (property_id, mess_id) = match value.target {
            ReviewTarget::Property(id) => (Some(id), None),
            ReviewTarget::Mess(id) => (None, Some(id)),
        };
        Self {
            id: value.id,
            property_id,
            mess_id,
            student_id: value.student_id,
            student_name: value.student_name,
            rating: value.rating,
            comment: value.comment,
            created_at: value.created_at,
        }
    }
}

impl TryFrom<ReviewDocument> for Review {
    type Error = String;

    fn try_from(value: ReviewDocument) -> Result<Self, Self::Error> {
        let target = match (value.property_id, value.mess_id) {
            (Some(id), None) => ReviewTarget::Property(id),
            (None, Some(id)) => ReviewTarget::Mess(id),
            _ => return Err("review must reference exactly one listing".to_owned()),
        };
        Ok(Self {
            id: value.id,
            target,
            student_id: value.student_id,
            student_name: value.student_name,
            rating: value.rating,
            comment: value.comment,
            created_at: value.created_at,
        })
    }
}

/// Order reviews newest first. Equal timestamps keep their stored order.
pub fn newest_first(reviews: &mut [Review]) {
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
