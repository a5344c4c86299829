//! Listing data model: rentable properties and mess (tiffin) services.
//!
//! Field names serialise in camelCase to match the stored documents.
//! Numeric fields are `f64` because stored documents carry JSON numbers; the
//! listing forms enforce the ranges on the way in.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// Validation errors for [`ListingId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingIdError {
    #[error("listing id must not be empty")]
    Empty,
    #[error("listing id must not contain whitespace or '/'")]
    InvalidCharacters,
}

/// Document identifier of a property or mess listing.
///
/// # Examples
/// ```
/// use campus_connect::domain::ListingId;
///
/// assert_eq!(ListingId::new("prop1").unwrap().as_ref(), "prop1");
/// assert!(ListingId::new("").is_err());
/// assert!(ListingId::new("a/b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListingId(String);

impl ListingId {
    /// Reject empty ids and ids with whitespace or `/`.
    pub fn new(id: impl Into<String>) -> Result<Self, ListingIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ListingIdError::Empty);
        }
        if id.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(ListingIdError::InvalidCharacters);
        }
        Ok(Self(id))
    }

    /// Generate a fresh identifier for a newly created document.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }
}

impl AsRef<str> for ListingId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ListingId> for String {
    fn from(value: ListingId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ListingId {
    type Error = ListingIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Room configuration offered by a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Single,
    Shared,
    Studio,
}

impl std::str::FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "shared" => Ok(Self::Shared),
            "studio" => Ok(Self::Studio),
            other => Err(format!("unknown room type: {other}")),
        }
    }
}

/// Diet served by a mess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FoodType {
    Veg,
    NonVeg,
    Both,
}

impl std::str::FromStr for FoodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "veg" => Ok(Self::Veg),
            "non-veg" => Ok(Self::NonVeg),
            "both" => Ok(Self::Both),
            other => Err(format!("unknown food type: {other}")),
        }
    }
}

/// How meals attached to a property are charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PricingModel {
    Included,
    PerMeal,
    Monthly,
}

impl std::str::FromStr for PricingModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "included" => Ok(Self::Included),
            "per-meal" => Ok(Self::PerMeal),
            "monthly" => Ok(Self::Monthly),
            other => Err(format!("unknown pricing model: {other}")),
        }
    }
}

/// Meal service attached to a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessDetails {
    pub available: bool,
    #[serde(rename = "type")]
    pub food_type: FoodType,
    pub pricing_model: PricingModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default)]
    pub meal_plans: Vec<String>,
    pub timings: String,
    /// Walking distance from the rooms, in metres.
    #[serde(default)]
    pub distance_from_room: f64,
}

/// A rentable property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[schema(value_type = String)]
    pub id: ListingId,
    pub name: String,
    pub college_name: String,
    pub address: String,
    pub rent: f64,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub image_ids: Vec<String>,
    /// Kilometres from the college campus.
    pub distance_from_college: f64,
    pub total_capacity: u32,
    pub current_availability: u32,
    pub owner_contact_number: String,
    #[schema(value_type = String, format = "uuid")]
    pub property_owner_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mess_details: Option<MessDetails>,
}

impl Property {
    /// Whether the property advertises an available mess.
    pub fn has_available_mess(&self) -> bool {
        self.mess_details.as_ref().is_some_and(|mess| mess.available)
    }
}

/// Price points advertised by a mess. Any subset may be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessPricing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarterly: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_meal: Option<f64>,
}

/// Meals served on one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DailyMeals {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

/// Seven-day menu keyed by weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeeklyMenu {
    pub monday: DailyMeals,
    pub tuesday: DailyMeals,
    pub wednesday: DailyMeals,
    pub thursday: DailyMeals,
    pub friday: DailyMeals,
    pub saturday: DailyMeals,
    pub sunday: DailyMeals,
}

impl WeeklyMenu {
    /// Days in calendar order, Monday first.
    pub fn days(&self) -> [(&'static str, &DailyMeals); 7] {
        [
            ("monday", &self.monday),
            ("tuesday", &self.tuesday),
            ("wednesday", &self.wednesday),
            ("thursday", &self.thursday),
            ("friday", &self.friday),
            ("saturday", &self.saturday),
            ("sunday", &self.sunday),
        ]
    }
}

/// A mess or tiffin service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessListing {
    #[schema(value_type = String)]
    pub id: ListingId,
    pub name: String,
    pub description: String,
    pub distance_from_college: f64,
    pub food_type: FoodType,
    #[serde(default)]
    pub pricing: MessPricing,
    #[serde(default)]
    pub image_ids: Vec<String>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub daily_menu: WeeklyMenu,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[schema(value_type = String, format = "uuid")]
    pub owner_id: UserId,
}

/// Running rating aggregate of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatingAggregate {
    pub average: f64,
    pub count: u32,
}

impl RatingAggregate {
    /// Aggregate from stored fields; missing values count as zero.
    pub fn new(average: Option<f64>, count: Option<u32>) -> Self {
        Self {
            average: average.unwrap_or(0.0),
            count: count.unwrap_or(0),
        }
    }

    /// Fold one more rating into the aggregate.
    ///
    /// # Examples
    /// ```
    /// use campus_connect::domain::RatingAggregate;
    ///
    /// let next = RatingAggregate { average: 4.0, count: 3 }.fold(2);
    /// assert_eq!(next.count, 4);
    /// assert!((next.average - 3.5).abs() < f64::EPSILON);
    /// ```
    #[must_use]
    pub fn fold(self, rating: u8) -> Self {
        let count = self.count.saturating_add(1);
        let total = self.average * f64::from(self.count) + f64::from(rating);
        Self {
            average: total / f64::from(count),
            count,
        }
    }
}

/// Star layout for a rating: filled, half and empty counts summing to five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StarDisplay {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarDisplay {
    pub const TOTAL: u8 = 5;

    /// Lay out stars for an average rating.
    ///
    /// # Examples
    /// ```
    /// use campus_connect::domain::StarDisplay;
    ///
    /// let stars = StarDisplay::for_rating(3.6);
    /// assert_eq!((stars.full, stars.half, stars.empty), (3, true, 1));
    /// ```
    pub fn for_rating(rating: f64) -> Self {
        let clamped = if rating.is_finite() {
            rating.clamp(0.0, f64::from(Self::TOTAL))
        } else {
            0.0
        };
        let whole = clamped.floor();
        // `whole` lies in 0..=5 after the clamp.
        let full = whole as u8;
        let half = full < Self::TOTAL && clamped - whole >= 0.5;
        let empty = Self::TOTAL - full - u8::from(half);
        Self { full, half, empty }
    }
}
