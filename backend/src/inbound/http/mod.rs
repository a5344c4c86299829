//! HTTP inbound adapter exposing the REST endpoints under `/api/v1`.
//!
//! Handlers parse and validate input, pick the [`crate::domain::DataSource`]
//! once, then call a driving port held in [`state::HttpState`].

pub mod accounts;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod listings;
pub mod recommendations;
pub mod reviews;
pub mod session;
pub mod session_config;
pub mod state;
pub mod suggestions;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
pub fn configure_api(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(accounts::signup)
        .service(accounts::login)
        .service(accounts::logout)
        .service(accounts::current_user)
        .service(accounts::update_profile)
        .service(listings::home)
        .service(listings::search_properties)
        .service(listings::create_property)
        .service(reviews::review_property)
        .service(recommendations::summarise_property)
        .service(listings::property_detail)
        .service(listings::search_messes)
        .service(listings::create_mess)
        .service(reviews::review_mess)
        .service(listings::mess_detail)
        .service(suggestions::submit_suggestion)
        .service(dashboard::dashboard)
        .service(recommendations::recommend);
}
