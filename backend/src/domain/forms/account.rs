//! Signup, login and profile edit forms.

use serde::Deserialize;
use utoipa::ToSchema;

use super::FieldErrors;
use super::checks;
use crate::domain::{
    ContactNumber, Email, LoginCredentials, PASSWORD_MIN_LEN, PersonName, Role, SignupCredentials,
};

/// Raw signup submission.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SignupForm {
    #[schema(example = "Asha Verma")]
    pub name: String,
    #[schema(example = "asha@example.com")]
    pub email: String,
    pub password: String,
    #[schema(example = "student")]
    pub role: String,
}

impl SignupForm {
    /// # Examples
    /// ```
    /// use campus_connect::domain::forms::SignupForm;
    ///
    /// let form = SignupForm {
    ///     name: "Asha".into(),
    ///     email: "asha@example.com".into(),
    ///     password: "short".into(),
    ///     role: "student".into(),
    /// };
    /// let errors = form.validate().unwrap_err();
    /// assert_eq!(errors.get("password"), Some("Password must be at least 8 characters long."));
    /// ```
    pub fn validate(&self) -> Result<SignupCredentials, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = PersonName::new(self.name.as_str())
            .map_err(|_| errors.add("name", "Name is required."))
            .ok();
        let email = Email::new(&self.email)
            .map_err(|_| errors.add("email", "Please enter a valid email address."))
            .ok();
        let password_ok = self.password.chars().count() >= PASSWORD_MIN_LEN;
        if !password_ok {
            errors.add("password", "Password must be at least 8 characters long.");
        }
        let role = checks::parse_choice::<Role>(
            &mut errors,
            "role",
            Some(self.role.as_str()),
            "You need to select a role.",
        );
        errors.finish(|| {
            let credentials = LoginCredentials::new(email?, &self.password);
            Some(SignupCredentials::new(name?, credentials, role?))
        })
    }
}

/// Raw login submission.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginCredentials, FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = Email::new(&self.email)
            .map_err(|_| errors.add("email", "Please enter a valid email address."))
            .ok();
        if self.password.is_empty() {
            errors.add("password", "Password is required.");
        }
        errors.finish(|| Some(LoginCredentials::new(email?, &self.password)))
    }
}

/// Raw profile edit submission. Which field is read depends on the role.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileEditForm {
    pub college_name: Option<String>,
    pub contact_number: Option<String>,
}

/// Validated, role-specific profile change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEdit {
    Student { college_name: String },
    Owner { contact_number: ContactNumber },
}

impl ProfileEditForm {
    pub fn validate(&self, role: Role) -> Result<ProfileEdit, FieldErrors> {
        let mut errors = FieldErrors::new();
        match role {
            Role::Student => {
                let college_name = checks::required(
                    &mut errors,
                    "collegeName",
                    self.college_name.as_deref().unwrap_or_default(),
                    "College name is required.",
                );
                errors.finish(|| Some(ProfileEdit::Student { college_name: college_name? }))
            }
            Role::Owner => {
                let contact_number = ContactNumber::new(
                    self.contact_number.as_deref().unwrap_or_default(),
                )
                .map_err(|_| {
                    errors.add("contactNumber", "Please enter a valid 10-digit phone number.")
                })
                .ok();
                errors.finish(|| {
                    Some(ProfileEdit::Owner {
                        contact_number: contact_number?,
                    })
                })
            }
        }
    }
}
