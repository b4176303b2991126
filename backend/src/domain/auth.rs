//! Authentication primitives: credentials, hashes, and bearer tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use zeroize::Zeroizing;

use super::user::{EmailAddress, User, UserId, UserValidationError, Username};

/// Minimum allowed length for a password.
pub const PASSWORD_MIN: usize = 6;

/// Default validity window of an issued bearer token.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;

/// Raw secret supplied by a caller. Zeroed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Accept any non-empty secret; used on the login path.
    pub fn any(password: &str) -> Result<Self, CredentialValidationError> {
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(password.to_owned())))
    }

    /// Accept a new secret that satisfies the registration policy.
    pub fn new_secret(password: &str) -> Result<Self, CredentialValidationError> {
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        if password.chars().count() < PASSWORD_MIN {
            return Err(CredentialValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self(Zeroizing::new(password.to_owned())))
    }

    /// Borrow the secret for hashing or verification.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Validation failures for registration and login payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialValidationError {
    /// Username, email, or id failed identity validation.
    #[error(transparent)]
    Identity(#[from] UserValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Password is shorter than the registration minimum.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum number of characters.
        min: usize,
    },
}

impl CredentialValidationError {
    /// Name of the offending payload field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Identity(
                UserValidationError::EmptyUsername | UserValidationError::UsernameTooShort { .. },
            ) => "username",
            Self::Identity(UserValidationError::EmptyEmail | UserValidationError::InvalidEmail) => {
                "email"
            }
            Self::Identity(UserValidationError::EmptyId | UserValidationError::InvalidId) => "id",
            Self::EmptyPassword | Self::PasswordTooShort { .. } => "password",
        }
    }

    /// Stable machine-readable code for the violation.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Identity(UserValidationError::EmptyUsername) => "empty_username",
            Self::Identity(UserValidationError::UsernameTooShort { .. }) => "username_too_short",
            Self::Identity(UserValidationError::EmptyEmail) => "empty_email",
            Self::Identity(UserValidationError::InvalidEmail) => "invalid_email",
            Self::Identity(UserValidationError::EmptyId | UserValidationError::InvalidId) => {
                "invalid_id"
            }
            Self::EmptyPassword => "empty_password",
            Self::PasswordTooShort { .. } => "password_too_short",
        }
    }
}

/// Validated registration request.
///
/// Fields are validated in order (username, email, password) and the first
/// violation is reported.
///
/// # Examples
/// ```
/// use taskdeck::domain::Registration;
///
/// let reg = Registration::try_from_parts("ada", "Ada@Example.com", "secret1").unwrap();
/// assert_eq!(reg.email().as_ref(), "ada@example.com");
///
/// let err = Registration::try_from_parts("ab", "bad", "1").unwrap_err();
/// assert_eq!(err.field(), "username");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    email: EmailAddress,
    password: Password,
}

impl Registration {
    /// Validate raw registration inputs.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialValidationError> {
        let username = Username::new(username)?;
        let email = EmailAddress::new(email)?;
        let password = Password::new_secret(password)?;
        Ok(Self {
            username,
            email,
            password,
        })
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Secret to hash.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and lower-cased but not pattern-checked: a malformed
///   address simply fails to match any account.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialValidationError> {
        let normalised = email.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(UserValidationError::EmptyEmail.into());
        }
        let password = Password::any(password)?;
        Ok(Self {
            email: normalised,
            password,
        })
    }

    /// Normalised email used for the account lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// One-way salted hash of a secret, in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a stored PHC string.
    pub fn new(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = phc.into();
        if phc.trim().is_empty() {
            return Err(PasswordHashError::Empty);
        }
        Ok(Self(phc))
    }

    /// Borrow the PHC string for persistence or verification.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Errors raised when wrapping stored hashes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The stored hash was blank.
    #[error("password hash must not be empty")]
    Empty,
}

/// Claims bound into a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    subject: UserId,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl TokenClaims {
    /// Claims for `subject`, valid for `ttl` from `issued_at`.
    ///
    /// Expiry saturates at the latest representable instant.
    pub fn new(subject: UserId, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            subject,
            issued_at,
            expires_at: issued_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Rebuild claims decoded from a token.
    pub fn from_parts(subject: UserId, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            subject,
            issued_at,
            expires_at,
        }
    }

    /// Identity the token was issued to.
    pub fn subject(&self) -> &UserId {
        &self.subject
    }

    /// Issue instant.
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Expiry instant.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// A token is dead at and after its expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Opaque bearer credential handed to clients.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap an encoded token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Borrow the encoded token.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Result of a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    user: User,
    token: SessionToken,
}

impl AuthSession {
    /// Pair an authenticated user with the token issued for them.
    pub fn new(user: User, token: SessionToken) -> Self {
        Self { user, token }
    }

    /// Authenticated user.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Bearer token for subsequent requests.
    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Split into parts.
    pub fn into_parts(self) -> (User, SessionToken) {
        (self.user, self.token)
    }
}
