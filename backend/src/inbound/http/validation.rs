//! Shared validation helpers for inbound HTTP adapters.
//!
//! Form failures become `invalid_request` errors whose details hold the
//! per-field messages under `fields`. Query and path values get their own
//! single-field detail shape.

use std::str::FromStr;

use serde_json::json;

use crate::domain::forms::FieldErrors;
use crate::domain::{DataSource, Error, ListingId};

/// Detail codes for query and path failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QueryErrorCode {
    UnknownChoice,
    InvalidListingId,
}

impl QueryErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::UnknownChoice => "unknown_choice",
            Self::InvalidListingId => "invalid_listing_id",
        }
    }
}

fn value_details(field: &str, value: &str, code: QueryErrorCode) -> serde_json::Value {
    json!({
        "field": field,
        "value": value,
        "code": code.as_str(),
    })
}

/// Turn form validation messages into a `400` error.
///
/// # Examples
/// ```
/// use campus_connect::domain::forms::LoginForm;
/// use campus_connect::inbound::http::validation::form_error;
///
/// let errors = LoginForm::default().validate().unwrap_err();
/// let error = form_error(errors);
/// assert_eq!(error.details().unwrap()["fields"]["password"], "Password is required.");
/// ```
pub fn form_error(errors: FieldErrors) -> Error {
    Error::invalid_request("validation failed").with_details(json!({ "fields": errors }))
}

/// Parse an optional enumerated query value; blank counts as absent.
pub(crate) fn parse_choice<T: FromStr>(field: &str, raw: Option<&str>) -> Result<Option<T>, Error> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    value.parse::<T>().map(Some).map_err(|_| {
        Error::invalid_request(format!("unsupported {field}: {value}"))
            .with_details(value_details(field, value, QueryErrorCode::UnknownChoice))
    })
}

/// The `source` query parameter.
pub(crate) fn parse_source(raw: Option<&str>) -> Result<Option<DataSource>, Error> {
    parse_choice("source", raw)
}

/// Split a comma-separated list, dropping blanks.
pub(crate) fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

/// Listing id from a path segment.
///
/// Ids that could never have been issued are reported as missing listings.
pub(crate) fn parse_listing_id(raw: &str) -> Result<ListingId, Error> {
    ListingId::new(raw).map_err(|_| {
        Error::not_found(format!("listing not found: {raw}"))
            .with_details(value_details("id", raw, QueryErrorCode::InvalidListingId))
    })
}
