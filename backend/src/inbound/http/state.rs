//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be tested against mocks without any store behind them.

use std::sync::Arc;

use tracing::debug;

use crate::domain::forms::ImageHostAllowList;
use crate::domain::{AuthContext, DataSource, Error, UserId};
use crate::domain::ports::{
    AccountService, CatalogueCommand, CatalogueQuery, DashboardQuery, FeedbackCommand,
    RecommendationQuery,
};
use crate::inbound::http::session::SessionContext;

/// Parameter object bundling the driving ports.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub catalogue: Arc<dyn CatalogueQuery>,
    pub listings: Arc<dyn CatalogueCommand>,
    pub accounts: Arc<dyn AccountService>,
    pub feedback: Arc<dyn FeedbackCommand>,
    pub dashboard: Arc<dyn DashboardQuery>,
    pub recommendations: Arc<dyn RecommendationQuery>,
    /// Read-only view of the identity provider's sign-ins.
    pub auth: AuthContext,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub catalogue: Arc<dyn CatalogueQuery>,
    pub listings: Arc<dyn CatalogueCommand>,
    pub accounts: Arc<dyn AccountService>,
    pub feedback: Arc<dyn FeedbackCommand>,
    pub dashboard: Arc<dyn DashboardQuery>,
    pub recommendations: Arc<dyn RecommendationQuery>,
    pub auth: AuthContext,
    /// Hosts accepted for listing image URLs.
    pub images: ImageHostAllowList,
    /// Source used when a request does not name one.
    pub default_source: DataSource,
}

impl HttpState {
    /// Build state with the default image allow-list and live reads.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            catalogue,
            listings,
            accounts,
            feedback,
            dashboard,
            recommendations,
            auth,
        } = ports;
        Self {
            catalogue,
            listings,
            accounts,
            feedback,
            dashboard,
            recommendations,
            auth,
            images: ImageHostAllowList::default(),
            default_source: DataSource::Live,
        }
    }

    #[must_use]
    pub fn with_images(mut self, images: ImageHostAllowList) -> Self {
        self.images = images;
        self
    }

    #[must_use]
    pub fn with_default_source(mut self, source: DataSource) -> Self {
        self.default_source = source;
        self
    }

    /// Source named by the request, falling back to the configured default.
    pub fn source_or_default(&self, requested: Option<DataSource>) -> DataSource {
        requested.unwrap_or(self.default_source)
    }

    /// User named by the session cookie, provided the identity provider
    /// still has them signed in. A cookie kept after logout counts as no
    /// session.
    pub fn signed_in_user(&self, session: &SessionContext) -> Result<Option<UserId>, Error> {
        let Some(user_id) = session.user_id()? else {
            return Ok(None);
        };
        if self.auth.current().is_signed_in(&user_id) {
            Ok(Some(user_id))
        } else {
            debug!(user_id = %user_id, "session outlived its sign-in");
            Ok(None)
        }
    }

    /// [`Self::signed_in_user`] or `401 Unauthorized`.
    pub fn require_user(&self, session: &SessionContext) -> Result<UserId, Error> {
        self.signed_in_user(session)?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}
