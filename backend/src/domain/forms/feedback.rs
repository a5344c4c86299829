//! Review, suggestion and recommendation request forms.

use serde::Deserialize;
use utoipa::ToSchema;

use super::FieldErrors;
use super::checks;
use crate::domain::{Rating, RecommendationRequest};

pub const REVIEW_COMMENT_MIN_LEN: usize = 10;
pub const SUGGESTION_MIN_LEN: usize = 10;
pub const SUGGESTION_MAX_LEN: usize = 500;
pub const MIN_RECOMMENDATION_RENT: f64 = 100.0;

/// Raw review submission.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ReviewForm {
    #[schema(example = 4)]
    pub rating: Option<f64>,
    pub comment: String,
}

/// Validated review content, before author and target are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub rating: Rating,
    pub comment: String,
}

impl ReviewForm {
    pub fn validate(&self) -> Result<NewReview, FieldErrors> {
        let mut errors = FieldErrors::new();
        let rating = match self.rating {
            Some(value) if value.fract() == 0.0 && (1.0..=5.0).contains(&value) => {
                // Whole number in 1..=5.
                Rating::new(value as u8)
            }
            _ => {
                errors.add("rating", "Rating must be a whole number from 1 to 5.");
                None
            }
        };
        let comment = checks::min_chars(
            &mut errors,
            "comment",
            &self.comment,
            REVIEW_COMMENT_MIN_LEN,
            "Comment must be at least 10 characters.",
        );
        errors.finish(|| {
            Some(NewReview {
                rating: rating?,
                comment: comment?,
            })
        })
    }
}

/// Raw suggestion submission.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SuggestionForm {
    pub message: String,
}

/// Suggestion text between 10 and 500 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionMessage(String);

impl SuggestionMessage {
    /// Trimmed message text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Take the trimmed message.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl SuggestionForm {
    pub fn validate(&self) -> Result<SuggestionMessage, FieldErrors> {
        let mut errors = FieldErrors::new();
        let message = self.message.trim();
        let length = message.chars().count();
        if length < SUGGESTION_MIN_LEN {
            errors.add("message", "Please provide a more detailed message.");
        } else if length > SUGGESTION_MAX_LEN {
            errors.add("message", "Your message is too long (max 500 characters).");
        }
        errors.finish(|| Some(SuggestionMessage(message.to_owned())))
    }
}

/// Raw recommendation request.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RecommendationForm {
    #[schema(example = "Koramangala, Bengaluru")]
    pub location: String,
    #[schema(example = 9000)]
    pub max_rent: Option<f64>,
    pub desired_amenities: Vec<String>,
}

impl RecommendationForm {
    pub fn validate(&self) -> Result<RecommendationRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        let location = checks::required(
            &mut errors,
            "location",
            &self.location,
            "Location is required",
        );
        let max_rent = checks::number_at_least(
            &mut errors,
            "maxRent",
            self.max_rent,
            MIN_RECOMMENDATION_RENT,
            "Rent must be at least 100",
        );
        let desired_amenities = checks::string_list(&self.desired_amenities);
        errors.finish(|| {
            Some(RecommendationRequest {
                location: location?,
                max_rent: max_rent?,
                desired_amenities,
            })
        })
    }
}
