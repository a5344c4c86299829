//! Recommendation and summary payloads exchanged with the generative engine.
//!
//! Engine output is untrusted. [`validate_recommendations`] checks every
//! candidate against the request before anything reaches a caller.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ListingId, Property, RoomType};

/// Validated recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub location: String,
    pub max_rent: f64,
    pub desired_amenities: Vec<String>,
}

/// One engine suggestion as received, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationCandidate {
    pub property_id: String,
    pub property_name: String,
    pub rent: f64,
    pub address: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub contact_information: String,
    pub match_score: f64,
}

/// A recommendation that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[schema(value_type = String)]
    pub property_id: ListingId,
    pub property_name: String,
    pub rent: f64,
    pub address: String,
    pub amenities: Vec<String>,
    pub contact_information: String,
    /// Relevance in `[0, 1]`.
    pub match_score: f64,
}

/// Why engine output was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecommendationOutputError {
    #[error("candidate {index} has an invalid property id")]
    InvalidPropertyId { index: usize },
    #[error("candidate {index} has an empty property name")]
    EmptyName { index: usize },
    #[error("candidate {index} has match score {score} outside [0, 1]")]
    ScoreOutOfRange { index: usize, score: f64 },
    #[error("candidate {index} rent {rent} exceeds the requested maximum {max_rent}")]
    RentAboveMaximum { index: usize, rent: f64, max_rent: f64 },
}

/// Validate engine output against the request it answers.
///
/// # Examples
/// ```
/// use campus_connect::domain::{
///     RecommendationCandidate, RecommendationRequest, validate_recommendations,
/// };
///
/// let request = RecommendationRequest {
///     location: "Pune".into(),
///     max_rent: 8000.0,
///     desired_amenities: vec![],
/// };
/// let candidate = RecommendationCandidate {
///     property_id: "prop1".into(),
///     property_name: "Green View".into(),
///     rent: 9000.0,
///     address: "FC Road".into(),
///     amenities: vec![],
///     contact_information: String::new(),
///     match_score: 0.7,
/// };
/// assert!(validate_recommendations(&request, vec![candidate]).is_err());
/// ```
pub fn validate_recommendations(
    request: &RecommendationRequest,
    candidates: Vec<RecommendationCandidate>,
) -> Result<Vec<Recommendation>, RecommendationOutputError> {
    candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| {
            let property_id = ListingId::new(candidate.property_id)
                .map_err(|_| RecommendationOutputError::InvalidPropertyId { index })?;
            if candidate.property_name.trim().is_empty() {
                return Err(RecommendationOutputError::EmptyName { index });
            }
            let score = candidate.match_score;
            if !(0.0..=1.0).contains(&score) {
                return Err(RecommendationOutputError::ScoreOutOfRange { index, score });
            }
            if !candidate.rent.is_finite() || candidate.rent > request.max_rent {
                return Err(RecommendationOutputError::RentAboveMaximum {
                    index,
                    rent: candidate.rent,
                    max_rent: request.max_rent,
                });
            }
            Ok(Recommendation {
                property_id,
                property_name: candidate.property_name,
                rent: candidate.rent,
                address: candidate.address,
                amenities: candidate.amenities,
                contact_information: candidate.contact_information,
                match_score: score,
            })
        })
        .collect()
}

/// Input for a generated property summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub description: String,
    pub location: String,
    pub max_rent: f64,
    pub facilities: Vec<String>,
    pub distance_from_college: f64,
    pub room_type: RoomType,
}

impl From<&Property> for SummaryRequest {
    fn from(property: &Property) -> Self {
        Self {
            description: property.description.clone(),
            location: property.address.clone(),
            max_rent: property.rent,
            facilities: property.facilities.clone(),
            distance_from_college: property.distance_from_college,
            room_type: property.room_type,
        }
    }
}
