//! Dashboard views and owner portfolio statistics.

use serde::Serialize;
use utoipa::ToSchema;

use super::{OwnerProfile, Property, StudentProfile, Suggestion};

/// Aggregate figures across an owner's properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    pub total_properties: usize,
    pub total_rent: f64,
    pub total_capacity: u64,
    pub total_availability: u64,
    /// Occupied share of capacity, in percent. Zero when capacity is zero.
    pub occupancy_rate: f64,
}

impl PortfolioStats {
    /// # Examples
    /// ```
    /// use campus_connect::domain::PortfolioStats;
    ///
    /// assert_eq!(PortfolioStats::compute(&[]).occupancy_rate, 0.0);
    /// ```
    pub fn compute(properties: &[Property]) -> Self {
        let total_rent = properties.iter().map(|p| p.rent).sum();
        let total_capacity: u64 = properties.iter().map(|p| u64::from(p.total_capacity)).sum();
        let total_availability: u64 = properties
            .iter()
            .map(|p| u64::from(p.current_availability))
            .sum();
        let occupancy_rate = if total_capacity == 0 {
            0.0
        } else {
            // Availability above capacity is not validated, so this may go negative.
            (total_capacity as f64 - total_availability as f64) / total_capacity as f64 * 100.0
        };
        Self {
            total_properties: properties.len(),
            total_rent,
            total_capacity,
            total_availability,
            occupancy_rate,
        }
    }
}

/// One bar of the owner's earnings chart.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EarningsPoint {
    pub name: String,
    pub rent: f64,
}

/// One chart bar per property: its name and rent.
pub fn earnings_series(properties: &[Property]) -> Vec<EarningsPoint> {
    properties
        .iter()
        .map(|p| EarningsPoint {
            name: p.name.clone(),
            rent: p.rent,
        })
        .collect()
}

/// Student dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDashboard {
    pub profile: StudentProfile,
    pub booked_property: Option<Property>,
    /// Whether the live booking resolves. Suggestions always go to that
    /// booking's owner, even when the dashboard shows demo data.
    pub can_submit_suggestions: bool,
}

/// Owner dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDashboard {
    pub profile: OwnerProfile,
    pub properties: Vec<Property>,
    pub stats: PortfolioStats,
    pub earnings: Vec<EarningsPoint>,
    pub suggestions: Vec<Suggestion>,
}

/// Dashboard selected by the role gate.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum DashboardView {
    Student(StudentDashboard),
    Owner(OwnerDashboard),
    #[serde(rename_all = "camelCase")]
    Onboarding { redirect_to: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ListingId, RoomType, UserId};
    use rstest::rstest;

    fn property(name: &str, rent: f64, capacity: u32, availability: u32) -> Property {
        Property {
            id: ListingId::new(name).expect("id"),
            name: name.into(),
            college_name: "NIT Trichy".into(),
            address: "Thuvakudi".into(),
            rent,
            room_type: RoomType::Studio,
            facilities: Vec::new(),
            image_ids: Vec::new(),
            distance_from_college: 1.0,
            total_capacity: capacity,
            current_availability: availability,
            owner_contact_number: "9876543210".into(),
            property_owner_id: UserId::random(),
            average_rating: None,
            review_count: None,
            description: "Studio flats with attached kitchens.".into(),
            mess_details: None,
        }
    }

    #[rstest]
    fn stats_sum_across_portfolio() {
        let stats = PortfolioStats::compute(&[
            property("a", 6_000.0, 10, 2),
            property("b", 9_000.0, 10, 8),
        ]);
        assert_eq!(stats.total_properties, 2);
        assert!((stats.total_rent - 15_000.0).abs() < f64::EPSILON);
        assert_eq!(stats.total_capacity, 20);
        assert_eq!(stats.total_availability, 10);
        assert!((stats.occupancy_rate - 50.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn zero_capacity_means_zero_occupancy() {
        let stats = PortfolioStats::compute(&[property("a", 1.0, 0, 0)]);
        assert_eq!(stats.occupancy_rate, 0.0);
    }

    #[rstest]
    fn earnings_series_follows_property_order() {
        let series = earnings_series(&[property("x", 100.0, 1, 0), property("y", 200.0, 1, 0)]);
        let names: Vec<&str> = series.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["x", "y"]);
    }

    #[rstest]
    fn onboarding_view_serialises_redirect() {
        let view = DashboardView::Onboarding {
            redirect_to: "/onboarding".into(),
        };
        let value = serde_json::to_value(&view).expect("encode");
        assert_eq!(value["view"], "onboarding");
        assert_eq!(value["redirectTo"], "/onboarding");
    }
}
