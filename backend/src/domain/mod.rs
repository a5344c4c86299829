//! Domain primitives, aggregates and services.
//!
//! Purpose: define the listing, profile and feedback types the API and the
//! stores exchange, the pure search pipeline, form validation, and the
//! services behind the driving ports. Nothing here performs I/O directly;
//! all external collaborators are reached through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable identifier.
//! - Property / MessListing: the two listing kinds.
//! - UserProfile: role-tagged student or owner profile.
//! - search_properties / search_messes: the filter and sort pipeline.
//! - Resource: loading / ready / failed result of a data-access call.

pub mod auth;
pub mod dashboard;
pub mod data_source;
pub mod error;
pub mod forms;
pub mod listing;
pub mod ports;
pub mod recommendation;
pub mod resource;
pub mod review;
pub mod role_gate;
pub mod search;
pub mod suggestion;
pub mod trace_id;
pub mod user;

mod account_service;
mod catalogue_service;
mod dashboard_service;
mod feedback_service;
mod port_errors;
mod recommendation_service;
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::account_service::AccountCommandService;
pub use self::auth::{
    AuthContext, AuthPublisher, AuthSnapshot, LoginCredentials, PASSWORD_MIN_LEN,
    SignupCredentials,
};
pub use self::catalogue_service::{CatalogueService, FEATURED_LIMIT, ListingStores};
pub use self::dashboard::{
    DashboardView, EarningsPoint, OwnerDashboard, PortfolioStats, StudentDashboard,
    earnings_series,
};
pub use self::dashboard_service::DashboardService;
pub use self::data_source::{DEMO_PROPERTY_ID, DataSource};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feedback_service::{FeedbackPorts, FeedbackService};
pub use self::listing::{
    DailyMeals, FoodType, ListingId, ListingIdError, MessDetails, MessListing, MessPricing,
    PricingModel, Property, RatingAggregate, RoomType, StarDisplay, WeeklyMenu,
};
pub use self::recommendation::{
    Recommendation, RecommendationCandidate, RecommendationOutputError, RecommendationRequest,
    SummaryRequest, validate_recommendations,
};
pub use self::recommendation_service::RecommendationService;
pub use self::resource::Resource;
pub use self::review::{Rating, Review, ReviewTarget};
pub use self::role_gate::{LOGIN_PATH, ONBOARDING_PATH, RoleResolution};
pub use self::search::{
    BudgetRange, DEFAULT_MAX_BUDGET, DEFAULT_MAX_DISTANCE_KM, DEFAULT_MAX_MONTHLY_PRICE,
    KNOWN_FACILITIES, MessFilters, MessSortKey, PropertyFilters, PropertySortKey, search_messes,
    search_properties,
};
pub use self::suggestion::{Suggestion, SuggestionStatus};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    ContactNumber, Email, NOT_SPECIFIED, OwnerProfile, PersonName, Role, StudentProfile, UserId,
    UserProfile, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use campus_connect::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("owners only"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
