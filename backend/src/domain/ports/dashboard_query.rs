//! Driving port for role dashboards.

use async_trait::async_trait;

use crate::domain::{DashboardView, DataSource, Error, Role, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Build the dashboard for an authenticated user.
    ///
    /// `role` is the discriminant stored in the session. `None`, or a role
    /// whose profile is missing, yields [`DashboardView::Onboarding`].
    async fn dashboard(
        &self,
        user_id: &UserId,
        role: Option<Role>,
        source: DataSource,
    ) -> Result<DashboardView, Error>;
}
