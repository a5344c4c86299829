//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`IdentityProvider`],
//! [`RecommendationEngine`]) are implemented by outbound adapters. Driving
//! ports ([`CatalogueQuery`], [`AccountService`] and friends) are implemented
//! by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod catalogue_command;
mod catalogue_query;
mod dashboard_query;
mod feedback_command;
mod identity_provider;
mod listing_repository;
mod profile_repository;
mod recommendation_engine;
mod recommendation_query;
mod review_repository;
mod suggestion_repository;

#[cfg(test)]
pub use account_service::MockAccountService;
pub use account_service::{AccountService, SignedIn};
#[cfg(test)]
pub use catalogue_command::MockCatalogueCommand;
pub use catalogue_command::CatalogueCommand;
#[cfg(test)]
pub use catalogue_query::MockCatalogueQuery;
pub use catalogue_query::{
    CatalogueQuery, FeaturedListings, MessDetail, MessResults, MessSearchRequest, PropertyDetail,
    PropertyResults, PropertySearchRequest,
};
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::DashboardQuery;
#[cfg(test)]
pub use feedback_command::MockFeedbackCommand;
pub use feedback_command::FeedbackCommand;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use listing_repository::{MockMessRepository, MockPropertyRepository};
pub use listing_repository::{
    ListingFeed, ListingRepositoryError, MessRepository, PropertyRepository, ready_feed,
};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use recommendation_engine::MockRecommendationEngine;
pub use recommendation_engine::{RecommendationEngine, RecommendationEngineError};
#[cfg(test)]
pub use recommendation_query::MockRecommendationQuery;
pub use recommendation_query::{PropertySummary, RecommendationQuery};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{ReviewRepository, ReviewRepositoryError};
#[cfg(test)]
pub use suggestion_repository::MockSuggestionRepository;
pub use suggestion_repository::{SuggestionRepository, SuggestionRepositoryError};
