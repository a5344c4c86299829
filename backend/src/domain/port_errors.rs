//! Translation of driven-port failures into domain errors.
//!
//! Connectivity problems become `service_unavailable` so callers see a
//! transient failure; anything else inside a store is an internal error.

use serde_json::json;
use tracing::warn;

use super::Error;
use super::ports::{
    IdentityProviderError, ListingRepositoryError, ProfileRepositoryError,
    RecommendationEngineError, ReviewRepositoryError, SuggestionRepositoryError,
};

pub(crate) fn listing(error: ListingRepositoryError) -> Error {
    match error {
        ListingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("listing store unavailable: {message}"))
        }
        ListingRepositoryError::Query { message } => {
            Error::internal(format!("listing store error: {message}"))
        }
        ListingRepositoryError::Duplicate { id } => {
            Error::conflict(format!("listing {id} already exists"))
        }
        ListingRepositoryError::ReadOnly => Error::forbidden("listing source is read-only"),
    }
}

pub(crate) fn review(error: ReviewRepositoryError) -> Error {
    match error {
        ReviewRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("review store unavailable: {message}"))
        }
        ReviewRepositoryError::Query { message } => {
            Error::internal(format!("review store error: {message}"))
        }
        ReviewRepositoryError::ReadOnly => Error::forbidden("review source is read-only"),
    }
}

pub(crate) fn profile(error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile store unavailable: {message}"))
        }
        ProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile store error: {message}"))
        }
    }
}

pub(crate) fn suggestion(error: SuggestionRepositoryError) -> Error {
    match error {
        SuggestionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("suggestion store unavailable: {message}"))
        }
        SuggestionRepositoryError::Query { message } => {
            Error::internal(format!("suggestion store error: {message}"))
        }
    }
}

pub(crate) fn identity(error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::EmailInUse { email } => {
            Error::conflict(format!("an account already exists for {email}"))
                .with_details(json!({ "fields": { "email": "Email is already in use." } }))
        }
        IdentityProviderError::InvalidCredentials => {
            Error::unauthorized("invalid email or password")
        }
        IdentityProviderError::Unavailable { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
    }
}

/// Engine failures are logged in full and reported as transient.
pub(crate) fn engine(error: RecommendationEngineError) -> Error {
    warn!(error = %error, "recommendation engine call failed");
    Error::service_unavailable("recommendation service is unavailable, try again later")
}
