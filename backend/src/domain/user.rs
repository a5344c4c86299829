//! User identity and role-tagged profiles.
//!
//! A user's role is carried explicitly by [`UserProfile`]; the profile store
//! still keeps students and owners in separate collections, but callers never
//! infer the role from which lookup happened to succeed.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::ListingId;

/// Placeholder stored for profile fields the user has not filled in yet.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Validation errors raised by the user newtypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyName,
    NameTooLong { max: usize },
    InvalidEmail,
    InvalidContactNumber,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyName => write!(f, "Name is required"),
            Self::NameTooLong { max } => write!(f, "Name must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "Invalid email address"),
            Self::InvalidContactNumber => write!(f, "Contact number must be 10 digits"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use campus_connect::domain::UserId;
    ///
    /// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
    /// assert_eq!(id.as_ref(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    /// assert!(UserId::new("owner1").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.1)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.1
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// A person's display name as entered at signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    pub const MAX: usize = 100;

    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if trimmed.chars().count() > Self::MAX {
            return Err(UserValidationError::NameTooLong { max: Self::MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<PersonName> for String {
    fn from(value: PersonName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PersonName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Deliberately loose: one `@`, no whitespace, a dotted domain.
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address, lower-cased for lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// # Examples
    /// ```
    /// use campus_connect::domain::Email;
    ///
    /// assert_eq!(Email::new(" Asha@Example.com ").unwrap().as_ref(), "asha@example.com");
    /// assert!(Email::new("asha@").is_err());
    /// ```
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = email.as_ref().trim().to_lowercase();
        if !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static CONTACT_RE: OnceLock<Regex> = OnceLock::new();

fn contact_regex() -> &'static Regex {
    CONTACT_RE.get_or_init(|| {
        Regex::new(r"^\d{10}$")
            .unwrap_or_else(|error| panic!("contact number regex failed to compile: {error}"))
    })
}

/// Ten-digit phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct ContactNumber(String);

impl ContactNumber {
    pub fn new(number: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let number = number.as_ref().trim();
        if !contact_regex().is_match(number) {
            return Err(UserValidationError::InvalidContactNumber);
        }
        Ok(Self(number.to_owned()))
    }
}

impl AsRef<str> for ContactNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<ContactNumber> for String {
    fn from(value: ContactNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for ContactNumber {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Explicit role discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Owner,
}

impl Role {
    /// Session and wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Owner => "owner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "owner" => Ok(Self::Owner),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Profile document stored in the `students` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[schema(value_type = String, format = "uuid")]
    pub id: UserId,
    #[schema(value_type = String)]
    pub name: PersonName,
    #[schema(value_type = String)]
    pub email: Email,
    pub college_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub booked_property_id: Option<ListingId>,
}

/// Profile document stored in the `propertyOwners` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerProfile {
    #[schema(value_type = String, format = "uuid")]
    pub id: UserId,
    #[schema(value_type = String)]
    pub name: PersonName,
    #[schema(value_type = String)]
    pub email: Email,
    pub contact_number: String,
}

/// A user profile tagged with its role.
///
/// # Examples
/// ```
/// use campus_connect::domain::{Email, PersonName, Role, StudentProfile, UserId, UserProfile};
///
/// let profile = UserProfile::Student(StudentProfile {
///     id: UserId::random(),
///     name: PersonName::new("Asha").unwrap(),
///     email: Email::new("asha@example.com").unwrap(),
///     college_name: "IIT Delhi".into(),
///     booked_property_id: None,
/// });
/// assert_eq!(profile.role(), Role::Student);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum UserProfile {
    Student(StudentProfile),
    Owner(OwnerProfile),
}

impl UserProfile {
    /// Fresh profile written at signup with placeholder role fields.
    pub fn new_for_signup(id: UserId, name: PersonName, email: Email, role: Role) -> Self {
        match role {
            Role::Student => Self::Student(StudentProfile {
                id,
                name,
                email,
                college_name: NOT_SPECIFIED.to_owned(),
                booked_property_id: None,
            }),
            Role::Owner => Self::Owner(OwnerProfile {
                id,
                name,
                email,
                contact_number: NOT_SPECIFIED.to_owned(),
            }),
        }
    }

    /// Role discriminant stored in the session.
    pub fn role(&self) -> Role {
        match self {
            Self::Student(_) => Role::Student,
            Self::Owner(_) => Role::Owner,
        }
    }

    /// Identity provider id.
    pub fn id(&self) -> &UserId {
        match self {
            Self::Student(profile) => &profile.id,
            Self::Owner(profile) => &profile.id,
        }
    }

    /// Display name.
    pub fn name(&self) -> &PersonName {
        match self {
            Self::Student(profile) => &profile.name,
            Self::Owner(profile) => &profile.name,
        }
    }
}
