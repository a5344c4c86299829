//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the health probes, the
//! payload schemas, and the session cookie security scheme. Swagger UI
//! serves it in debug builds and `openapi-dump` prints it for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::forms::{
    LoginForm, MessForm, MessPricingForm, ProfileEditForm, PropertyForm, RecommendationForm,
    ReviewForm, SignupForm, SuggestionForm,
};
use crate::domain::ports::{
    FeaturedListings, MessDetail, MessResults, PropertyDetail, PropertyResults, PropertySummary,
};
use crate::domain::{
    DailyMeals, DashboardView, DataSource, EarningsPoint, Error, ErrorCode, FoodType,
    MessDetails, MessListing, MessPricing, OwnerDashboard, OwnerProfile, PortfolioStats,
    PricingModel, Property, Recommendation, Review, Role, RoomType, StarDisplay,
    StudentDashboard, StudentProfile, Suggestion, SuggestionStatus, UserProfile, WeeklyMenu,
};
use crate::inbound::http::accounts::LoginResponse;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login or /api/v1/signup.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Campus Connect API",
        description = "Student housing and mess listings, reviews, dashboards and recommendations.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::signup,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::current_user,
        crate::inbound::http::accounts::update_profile,
        crate::inbound::http::listings::home,
        crate::inbound::http::listings::search_properties,
        crate::inbound::http::listings::property_detail,
        crate::inbound::http::listings::create_property,
        crate::inbound::http::listings::search_messes,
        crate::inbound::http::listings::mess_detail,
        crate::inbound::http::listings::create_mess,
        crate::inbound::http::reviews::review_property,
        crate::inbound::http::reviews::review_mess,
        crate::inbound::http::suggestions::submit_suggestion,
        crate::inbound::http::dashboard::dashboard,
        crate::inbound::http::recommendations::recommend,
        crate::inbound::http::recommendations::summarise_property,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error, ErrorCode, DataSource,
        UserProfile, StudentProfile, OwnerProfile, Role, LoginResponse,
        Property, MessListing, MessDetails, MessPricing, WeeklyMenu, DailyMeals,
        RoomType, FoodType, PricingModel, StarDisplay,
        PropertyResults, MessResults, PropertyDetail, MessDetail, FeaturedListings,
        Review, Suggestion, SuggestionStatus,
        DashboardView, StudentDashboard, OwnerDashboard, PortfolioStats, EarningsPoint,
        Recommendation, PropertySummary,
        SignupForm, LoginForm, ProfileEditForm, PropertyForm, MessForm, MessPricingForm,
        ReviewForm, SuggestionForm, RecommendationForm,
    )),
    tags(
        (name = "accounts", description = "Signup, login and profiles"),
        (name = "listings", description = "Property and mess listings"),
        (name = "feedback", description = "Reviews and suggestions"),
        (name = "dashboard", description = "Role dashboards"),
        (name = "recommendations", description = "Generated recommendations and summaries"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
/// OpenAPI document for the `/api/v1` surface and the health probes.
pub struct ApiDoc;
