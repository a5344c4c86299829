//! Declarative form validation.
//!
//! Every form validates its whole input in one pass and returns either a
//! typed value ready for a write or a [`FieldErrors`] map with one message
//! per failing field. Forms check field shape only; business rules such as
//! availability versus capacity are out of scope.

use std::collections::BTreeMap;

use serde::Serialize;

mod account;
mod feedback;
mod images;
mod listing;

pub use account::{LoginForm, ProfileEdit, ProfileEditForm, SignupForm};
pub use feedback::{
    NewReview, RecommendationForm, ReviewForm, SuggestionForm, SuggestionMessage,
    SUGGESTION_MAX_LEN, SUGGESTION_MIN_LEN,
};
pub use images::{DEFAULT_IMAGE_HOSTS, ImageHostAllowList};
pub use listing::{MessForm, MessPricingForm, NewMess, NewProperty, PropertyForm};

/// Per-field validation messages keyed by the form's field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Empty map; validation starts here.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message; the first message for a field wins.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Message recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether every field validated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Field and message pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Finish validation: build the value only when no field failed.
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, Self> {
        if !self.is_empty() {
            return Err(self);
        }
        // `build` only sees fields that validated, so `None` means a field
        // failed without recording a message.
        build().ok_or_else(|| {
            let mut errors = self;
            errors.add("form", "Form is incomplete");
            errors
        })
    }
}

/// Shared field checks.
pub(crate) mod checks {
    use super::FieldErrors;

    pub fn required(
        errors: &mut FieldErrors,
        field: &str,
        value: &str,
        message: &str,
    ) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            errors.add(field, message);
            return None;
        }
        Some(trimmed.to_owned())
    }

    pub fn min_chars(
        errors: &mut FieldErrors,
        field: &str,
        value: &str,
        min: usize,
        message: &str,
    ) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.chars().count() < min {
            errors.add(field, message);
            return None;
        }
        Some(trimmed.to_owned())
    }

    pub fn number_at_least(
        errors: &mut FieldErrors,
        field: &str,
        value: Option<f64>,
        min: f64,
        message: &str,
    ) -> Option<f64> {
        match value {
            Some(number) if number.is_finite() && number >= min => Some(number),
            Some(_) => {
                errors.add(field, message);
                None
            }
            None => {
                errors.add(field, format!("{field} is required"));
                None
            }
        }
    }

    pub fn whole_number_at_least(
        errors: &mut FieldErrors,
        field: &str,
        value: Option<f64>,
        min: u32,
        message: &str,
    ) -> Option<u32> {
        let number = number_at_least(errors, field, value, f64::from(min), message)?;
        if number.fract() != 0.0 || number > f64::from(u32::MAX) {
            errors.add(field, format!("{field} must be a whole number"));
            return None;
        }
        // Range checked above.
        Some(number as u32)
    }

    pub fn parse_choice<T: std::str::FromStr>(
        errors: &mut FieldErrors,
        field: &str,
        value: Option<&str>,
        message: &str,
    ) -> Option<T> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => match raw.parse::<T>() {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    errors.add(field, message);
                    None
                }
            },
            None => {
                errors.add(field, message);
                None
            }
        }
    }

    /// Trim entries and drop blanks, keeping first occurrences only.
    pub fn string_list(values: &[String]) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(values.len());
        for value in values {
            let trimmed = value.trim();
            if !trimmed.is_empty() && !out.iter().any(|seen| seen == trimmed) {
                out.push(trimmed.to_owned());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn first_message_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.add("rent", "Rent must be at least 1");
        errors.add("rent", "rent is required");
        assert_eq!(errors.get("rent"), Some("Rent must be at least 1"));
        assert_eq!(errors.len(), 1);
    }

    #[rstest]
    fn finish_reports_errors_before_building() {
        let mut errors = FieldErrors::new();
        errors.add("name", "Name is required.");
        let result = errors.finish(|| -> Option<u8> { panic!("must not build") });
        assert!(result.is_err());
    }

    #[rstest]
    fn serialises_as_plain_map() {
        let mut errors = FieldErrors::new();
        errors.add("email", "Please enter a valid email address.");
        let value = serde_json::to_value(&errors).expect("encode");
        assert_eq!(value["email"], "Please enter a valid email address.");
    }

    #[rstest]
    #[case(Some(0.5), 1, false)]
    #[case(Some(2.0), 1, true)]
    #[case(Some(2.5), 1, false)]
    #[case(None, 1, false)]
    fn whole_number_check(#[case] raw: Option<f64>, #[case] min: u32, #[case] ok: bool) {
        let mut errors = FieldErrors::new();
        let parsed =
            checks::whole_number_at_least(&mut errors, "totalCapacity", raw, min, "too small");
        assert_eq!(parsed.is_some(), ok);
        assert_eq!(errors.is_empty(), ok);
    }

    #[rstest]
    fn string_list_trims_and_dedups() {
        let raw = vec![" Wi-Fi ".to_owned(), "".to_owned(), "Wi-Fi".to_owned(), "Gym".to_owned()];
        assert_eq!(checks::string_list(&raw), ["Wi-Fi", "Gym"]);
    }
}
