//! User identity model.
//!
//! [`User`] is the public projection of an account. The password hash is not
//! a field of this type; it only travels inside [`UserCredentials`], which
//! never leaves the authentication service and its repositories.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::auth::PasswordHash;

/// Validation errors returned by the identity value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was blank.
    EmptyId,
    /// The identifier was not a UUID.
    InvalidId,
    /// The username was blank once trimmed.
    EmptyUsername,
    /// The username is shorter than the minimum.
    UsernameTooShort {
        /// Minimum number of characters.
        min: usize,
    },
    /// The email address was blank once trimmed.
    EmptyEmail,
    /// The email address does not look like `local@domain.tld`.
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from string input.
    ///
    /// # Examples
    /// ```
    /// use taskdeck::domain::UserId;
    ///
    /// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
    /// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    /// assert!(UserId::new("not-a-uuid").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;

/// Unique login handle chosen at registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Trim and validate a username.
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Case-normalised email address.
///
/// ## Invariants
/// - Stored trimmed and lower-cased, so equality is case-insensitive.
///
/// # Examples
/// ```
/// use taskdeck::domain::EmailAddress;
///
/// let email = EmailAddress::new("  Ada@Example.COM ").expect("valid email");
/// assert_eq!(email.as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate an email address.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = email.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered account, safe to serialise to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    created_at: DateTime<Utc>,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(
        id: UserId,
        username: Username,
        email: EmailAddress,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            created_at,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique login handle.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Normalised email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Account creation instant.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A user together with the stored password hash.
///
/// Only the authentication service and credential repositories handle this
/// type; HTTP adapters receive [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    user: User,
    password_hash: PasswordHash,
}

impl UserCredentials {
    /// Pair a user with its stored hash.
    pub fn new(user: User, password_hash: PasswordHash) -> Self {
        Self {
            user,
            password_hash,
        }
    }

    /// Public projection of the account.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Stored one-way hash of the secret.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Drop the hash and keep the public projection.
    pub fn into_user(self) -> User {
        self.user
    }
}
