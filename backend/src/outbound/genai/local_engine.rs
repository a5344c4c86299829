//! Deterministic engine scoring the live catalogue.
//!
//! Used when no hosted endpoint is configured. Each affordable property is
//! scored on location match, rent headroom and amenity coverage.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{PropertyRepository, RecommendationEngine, RecommendationEngineError};
use crate::domain::{
    Property, RecommendationCandidate, RecommendationRequest, Resource, RoomType, SummaryRequest,
};

/// Maximum number of recommendations returned.
pub const MAX_RECOMMENDATIONS: usize = 5;

const LOCATION_WEIGHT: f64 = 0.4;
const HEADROOM_WEIGHT: f64 = 0.2;
const AMENITY_WEIGHT: f64 = 0.4;

/// Engine that ranks properties from a repository without any network call.
pub struct LocalRecommendationEngine {
    properties: Arc<dyn PropertyRepository>,
}

impl LocalRecommendationEngine {
    /// Engine scoring the properties in `properties`.
    pub fn new(properties: Arc<dyn PropertyRepository>) -> Self {
        Self { properties }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn match_score(property: &Property, request: &RecommendationRequest) -> f64 {
    let location = request.location.trim();
    let location_match = [&property.address, &property.college_name, &property.name]
        .into_iter()
        .any(|field| contains_ignore_case(field, location));
    let location_score = if location_match { 1.0 } else { 0.0 };

    let headroom = if request.max_rent > 0.0 {
        ((request.max_rent - property.rent) / request.max_rent).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let amenity_score = if request.desired_amenities.is_empty() {
        1.0
    } else {
        let covered = request
            .desired_amenities
            .iter()
            .filter(|wanted| {
                property
                    .facilities
                    .iter()
                    .any(|have| have.eq_ignore_ascii_case(wanted.trim()))
            })
            .count();
        covered as f64 / request.desired_amenities.len() as f64
    };

    let score = LOCATION_WEIGHT * location_score
        + HEADROOM_WEIGHT * headroom
        + AMENITY_WEIGHT * amenity_score;
    (score * 100.0).round() / 100.0
}

/// Rank `properties` for `request`, best first.
pub fn rank(properties: &[Property], request: &RecommendationRequest) -> Vec<RecommendationCandidate> {
    let mut scored: Vec<(f64, &Property)> = properties
        .iter()
        .filter(|property| property.rent <= request.max_rent)
        .map(|property| (match_score(property, request), property))
        .collect();
    scored.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    scored
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|(score, property)| RecommendationCandidate {
            property_id: property.id.to_string(),
            property_name: property.name.clone(),
            rent: property.rent,
            address: property.address.clone(),
            amenities: property.facilities.clone(),
            contact_information: property.owner_contact_number.clone(),
            match_score: score,
        })
        .collect()
}

/// Template summary built from the listing facts.
pub fn template_summary(request: &SummaryRequest) -> String {
    let room = match request.room_type {
        RoomType::Single => "single room",
        RoomType::Shared => "shared room",
        RoomType::Studio => "studio",
    };
    let facilities = if request.facilities.is_empty() {
        String::from("basic amenities")
    } else {
        request.facilities.join(", ")
    };
    format!(
        "A {room} in {location}, {distance:.1} km from campus, at {rent:.0} per month with {facilities}.",
        location = request.location,
        distance = request.distance_from_college,
        rent = request.max_rent,
    )
}

#[async_trait]
impl RecommendationEngine for LocalRecommendationEngine {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RecommendationCandidate>, RecommendationEngineError> {
        let snapshot = self.properties.subscribe().borrow().clone();
        match snapshot {
            Resource::Ready(properties) => Ok(rank(&properties, request)),
            Resource::Loading => Err(RecommendationEngineError::transport(
                "property catalogue is still loading",
            )),
            Resource::Failed(error) => {
                Err(RecommendationEngineError::transport(error.message()))
            }
        }
    }

    async fn summarise(&self, request: &SummaryRequest) -> Result<String, RecommendationEngineError> {
        Ok(template_summary(request))
    }
}
