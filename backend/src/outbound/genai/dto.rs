//! Wire shapes for the hosted recommendation endpoint.
//!
//! Requests mirror the prompt inputs; responses are decoded into these DTOs
//! and then handed to the domain, which validates them.

use serde::{Deserialize, Serialize};

use crate::domain::{RecommendationCandidate, RecommendationRequest, RoomType, SummaryRequest};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RecommendationsRequestDto<'a> {
    pub(super) location: &'a str,
    pub(super) max_rent: f64,
    pub(super) desired_amenities: &'a [String],
}

impl<'a> From<&'a RecommendationRequest> for RecommendationsRequestDto<'a> {
    fn from(request: &'a RecommendationRequest) -> Self {
        Self {
            location: &request.location,
            max_rent: request.max_rent,
            desired_amenities: &request.desired_amenities,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RecommendationsResponseDto {
    #[serde(default)]
    pub(super) recommendations: Vec<RecommendationCandidate>,
}

/// Summary prompt input. Facilities travel as one comma-separated string.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SummaryRequestDto<'a> {
    pub(super) description: &'a str,
    pub(super) location: &'a str,
    pub(super) max_rent: f64,
    pub(super) facilities: String,
    pub(super) distance_from_college: f64,
    pub(super) room_type: RoomType,
}

impl<'a> From<&'a SummaryRequest> for SummaryRequestDto<'a> {
    fn from(request: &'a SummaryRequest) -> Self {
        Self {
            description: &request.description,
            location: &request.location,
            max_rent: request.max_rent,
            facilities: request.facilities.join(", "),
            distance_from_college: request.distance_from_college,
            room_type: request.room_type,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SummaryResponseDto {
    pub(super) summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn summary_requests_join_facilities() {
        let request = SummaryRequest {
            description: "Bright rooms".into(),
            location: "Hauz Khas".into(),
            max_rent: 9_500.0,
            facilities: vec!["Wi-Fi".into(), "AC".into()],
            distance_from_college: 0.8,
            room_type: RoomType::Single,
        };
        let encoded = serde_json::to_value(SummaryRequestDto::from(&request)).expect("encode");
        assert_eq!(encoded["facilities"], json!("Wi-Fi, AC"));
        assert_eq!(encoded["roomType"], json!("single"));
        assert_eq!(encoded["distanceFromCollege"], json!(0.8));
    }

    #[rstest]
    fn missing_recommendations_decode_as_empty() {
        let decoded: RecommendationsResponseDto =
            serde_json::from_str("{}").expect("decode");
        assert!(decoded.recommendations.is_empty());
    }
}
