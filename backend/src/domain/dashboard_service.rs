//! Role dashboards.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::catalogue_service::ListingStores;
use crate::domain::ports::{DashboardQuery, ProfileRepository, SuggestionRepository};
use crate::domain::{
    DEMO_PROPERTY_ID, DashboardView, DataSource, Error, ListingId, ONBOARDING_PATH, OwnerDashboard, OwnerProfile,
    PortfolioStats, Role, StudentDashboard, StudentProfile, UserId, earnings_series,
    port_errors,
};

/// Dashboard service implementing [`DashboardQuery`].
#[derive(Clone)]
pub struct DashboardService {
    live: ListingStores,
    fixture: ListingStores,
    profiles: Arc<dyn ProfileRepository>,
    suggestions: Arc<dyn SuggestionRepository>,
}

impl DashboardService {
    /// Service reading listings from `live` or `fixture` per request.
    pub fn new(
        live: ListingStores,
        fixture: ListingStores,
        profiles: Arc<dyn ProfileRepository>,
        suggestions: Arc<dyn SuggestionRepository>,
    ) -> Self {
        Self {
            live,
            fixture,
            profiles,
            suggestions,
        }
    }

    fn onboarding() -> DashboardView {
        DashboardView::Onboarding {
            redirect_to: ONBOARDING_PATH.to_owned(),
        }
    }

    async fn student_view(
        &self,
        profile: StudentProfile,
        source: DataSource,
    ) -> Result<DashboardView, Error> {
        // Suggestions always go to the live booking, whatever the source.
        let live_booking = match &profile.booked_property_id {
            Some(id) => self
                .live
                .properties
                .find(id)
                .await
                .map_err(port_errors::listing)?,
            None => None,
        };
        let can_submit_suggestions = live_booking.is_some();
        let booked_property = match source {
            DataSource::Live => live_booking,
            DataSource::Fixture => {
                let demo = ListingId::new(DEMO_PROPERTY_ID)
                    .map_err(|error| Error::internal(format!("demo property id: {error}")))?;
                self.fixture
                    .properties
                    .find(&demo)
                    .await
                    .map_err(port_errors::listing)?
            }
        };
        Ok(DashboardView::Student(StudentDashboard {
            profile,
            booked_property,
            can_submit_suggestions,
        }))
    }

    async fn owner_view(&self, profile: OwnerProfile) -> Result<DashboardView, Error> {
        let properties = self
            .live
            .properties
            .list_by_owner(&profile.id)
            .await
            .map_err(port_errors::listing)?;
        let suggestions = self
            .suggestions
            .list_for_owner(&profile.id)
            .await
            .map_err(port_errors::suggestion)?;
        let stats = PortfolioStats::compute(&properties);
        let earnings = earnings_series(&properties);
        Ok(DashboardView::Owner(OwnerDashboard {
            profile,
            properties,
            stats,
            earnings,
            suggestions,
        }))
    }
}

#[async_trait]
impl DashboardQuery for DashboardService {
    async fn dashboard(
        &self,
        user_id: &UserId,
        role: Option<Role>,
        source: DataSource,
    ) -> Result<DashboardView, Error> {
        debug!(user_id = %user_id, role = ?role, source = ?source, "building dashboard");
        match role {
            Some(Role::Student) => {
                match self
                    .profiles
                    .find_student(user_id)
                    .await
                    .map_err(port_errors::profile)?
                {
                    Some(profile) => self.student_view(profile, source).await,
                    None => Ok(Self::onboarding()),
                }
            }
            Some(Role::Owner) => {
                match self
                    .profiles
                    .find_owner(user_id)
                    .await
                    .map_err(port_errors::profile)?
                {
                    Some(profile) => self.owner_view(profile).await,
                    None => Ok(Self::onboarding()),
                }
            }
            None => Ok(Self::onboarding()),
        }
    }
}
