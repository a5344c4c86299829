//! Listing search: text match, filter predicates and stable sorting.
//!
//! Both entry points are pure. They borrow the collection, never mutate it,
//! and return a fresh vector, so the same inputs always give the same output.
//! An empty result is a normal outcome; callers render the empty state.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{FoodType, MessListing, Property, RoomType};

/// Default maximum distance from college, in kilometres.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 5.0;
/// Default upper rent bound.
pub const DEFAULT_MAX_BUDGET: f64 = 50_000.0;
/// Default cap on a mess's monthly price.
pub const DEFAULT_MAX_MONTHLY_PRICE: f64 = 5_000.0;

/// Facilities offered as filter options.
pub const KNOWN_FACILITIES: [&str; 8] = [
    "Wi-Fi",
    "AC/Heater",
    "Geyser",
    "Power Backup",
    "Laundry",
    "Kitchen",
    "Parking",
    "Gym",
];

/// Inclusive rent range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BudgetRange {
    /// Lowest accepted rent.
    pub min: f64,
    /// Highest accepted rent.
    pub max: f64,
}

impl BudgetRange {
    /// Whether `rent` lies within the range, both bounds included.
    ///
    /// ```
    /// use campus_connect::domain::BudgetRange;
    ///
    /// let budget = BudgetRange { min: 5_000.0, max: 8_000.0 };
    /// assert!(budget.contains(5_000.0) && budget.contains(8_000.0));
    /// assert!(!budget.contains(8_000.5));
    /// ```
    pub fn contains(&self, rent: f64) -> bool {
        rent >= self.min && rent <= self.max
    }
}

impl Default for BudgetRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: DEFAULT_MAX_BUDGET,
        }
    }
}

/// Constraints applied to properties before sorting.
///
/// `room_type: None` means any room type. `mess_available: false` imposes
/// nothing; it does not require the absence of a mess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilters {
    /// Largest accepted distance from college, in kilometres.
    pub max_distance_km: f64,
    pub room_type: Option<RoomType>,
    pub budget: BudgetRange,
    /// Every listed facility must be present.
    pub facilities: Vec<String>,
    pub mess_available: bool,
}

impl PropertyFilters {
    /// Filters that admit every property.
    pub fn unrestricted() -> Self {
        Self {
            max_distance_km: f64::INFINITY,
            room_type: None,
            budget: BudgetRange {
                min: f64::NEG_INFINITY,
                max: f64::INFINITY,
            },
            facilities: Vec::new(),
            mess_available: false,
        }
    }

    /// Whether `property` passes every predicate.
    pub fn admits(&self, property: &Property) -> bool {
        property.distance_from_college <= self.max_distance_km
            && self.room_type.is_none_or(|wanted| property.room_type == wanted)
            && self.budget.contains(property.rent)
            && self
                .facilities
                .iter()
                .all(|wanted| property.facilities.iter().any(|have| have == wanted))
            && (!self.mess_available || property.has_available_mess())
    }
}

impl Default for PropertyFilters {
    fn default() -> Self {
        Self {
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            room_type: None,
            budget: BudgetRange::default(),
            facilities: Vec::new(),
            mess_available: false,
        }
    }
}

/// Constraints applied to messes before sorting.
///
/// A mess without a monthly price always passes the price cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessFilters {
    /// Cap on the monthly price.
    pub max_monthly_price: f64,
    /// `None` means any food type.
    pub food_type: Option<FoodType>,
}

impl MessFilters {
    /// Filters that admit every mess.
    pub fn unrestricted() -> Self {
        Self {
            max_monthly_price: f64::INFINITY,
            food_type: None,
        }
    }

    /// Whether `mess` passes the price cap and food type.
    pub fn admits(&self, mess: &MessListing) -> bool {
        mess.pricing
            .monthly
            .is_none_or(|price| price <= self.max_monthly_price)
            && self.food_type.is_none_or(|wanted| mess.food_type == wanted)
    }
}

impl Default for MessFilters {
    fn default() -> Self {
        Self {
            max_monthly_price: DEFAULT_MAX_MONTHLY_PRICE,
            food_type: None,
        }
    }
}

/// Orderings offered on the property listing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PropertySortKey {
    /// Review count, most reviewed first.
    #[default]
    Popularity,
    RentAsc,
    RentDesc,
    RatingDesc,
    DistanceAsc,
}

impl std::str::FromStr for PropertySortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity" => Ok(Self::Popularity),
            "rent-asc" => Ok(Self::RentAsc),
            "rent-desc" => Ok(Self::RentDesc),
            "rating-desc" => Ok(Self::RatingDesc),
            "distance-asc" => Ok(Self::DistanceAsc),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// Orderings offered on the mess listing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum MessSortKey {
    #[default]
    Popularity,
    /// Monthly price ascending; unpriced messes sort last.
    PriceAsc,
    /// Monthly price descending; unpriced messes count as free.
    PriceDesc,
    RatingDesc,
    DistanceAsc,
}

impl std::str::FromStr for MessSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity" => Ok(Self::Popularity),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "rating-desc" => Ok(Self::RatingDesc),
            "distance-asc" => Ok(Self::DistanceAsc),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

fn matches_text(needle: &str, haystacks: &[&str]) -> bool {
    needle.is_empty()
        || haystacks
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

fn ascending(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Filter and order properties.
///
/// The query matches case-insensitively against name, college name and
/// address. It is not trimmed. `sort_by` is stable, so equal keys keep their input order.
///
/// # Examples
/// ```
/// use campus_connect::domain::{PropertyFilters, PropertySortKey, search_properties};
///
/// let results = search_properties(&[], "", &PropertyFilters::default(), PropertySortKey::Popularity);
/// assert!(results.is_empty());
/// ```
pub fn search_properties(
    properties: &[Property],
    query: &str,
    filters: &PropertyFilters,
    sort: PropertySortKey,
) -> Vec<Property> {
    let needle = query.to_lowercase();
    let mut matched: Vec<Property> = properties
        .iter()
        .filter(|property| {
            matches_text(
                &needle,
                &[&property.name, &property.college_name, &property.address],
            ) && filters.admits(property)
        })
        .cloned()
        .collect();

    matched.sort_by(|a, b| match sort {
        PropertySortKey::Popularity => {
            b.review_count.unwrap_or(0).cmp(&a.review_count.unwrap_or(0))
        }
        PropertySortKey::RentAsc => ascending(a.rent, b.rent),
        PropertySortKey::RentDesc => descending(a.rent, b.rent),
        PropertySortKey::RatingDesc => descending(
            a.average_rating.unwrap_or(0.0),
            b.average_rating.unwrap_or(0.0),
        ),
        PropertySortKey::DistanceAsc => {
            ascending(a.distance_from_college, b.distance_from_college)
        }
    });
    matched
}

/// Filter and order messes.
///
/// The query matches case-insensitively against name and address.
pub fn search_messes(
    messes: &[MessListing],
    query: &str,
    filters: &MessFilters,
    sort: MessSortKey,
) -> Vec<MessListing> {
    let needle = query.to_lowercase();
    let mut matched: Vec<MessListing> = messes
        .iter()
        .filter(|mess| matches_text(&needle, &[&mess.name, &mess.address]) && filters.admits(mess))
        .cloned()
        .collect();

    matched.sort_by(|a, b| match sort {
        MessSortKey::Popularity => b.review_count.cmp(&a.review_count),
        MessSortKey::PriceAsc => ascending(
            a.pricing.monthly.unwrap_or(f64::INFINITY),
            b.pricing.monthly.unwrap_or(f64::INFINITY),
        ),
        MessSortKey::PriceDesc => descending(
            a.pricing.monthly.unwrap_or(0.0),
            b.pricing.monthly.unwrap_or(0.0),
        ),
        MessSortKey::RatingDesc => descending(a.average_rating, b.average_rating),
        MessSortKey::DistanceAsc => ascending(a.distance_from_college, b.distance_from_college),
    });
    matched
}

#[cfg(test)]
mod tests;
