//! Token signing key configuration.
//!
//! The HMAC key is read from the file named by `TOKEN_KEY_FILE`. Development
//! builds fall back to a random per-process key, which invalidates every
//! issued token on restart.

use std::path::PathBuf;

use mockable::Env;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::warn;
use zeroize::Zeroizing;

const TOKEN_KEY_DEFAULT_PATH: &str = "/var/run/secrets/token_key";
/// Minimum key length accepted by release builds.
pub const TOKEN_KEY_MIN_LEN: usize = 32;
const EPHEMERAL_KEY_LEN: usize = 64;
const KEY_FILE_ENV: &str = "TOKEN_KEY_FILE";
const ALLOW_EPHEMERAL_ENV: &str = "TOKEN_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Build mode for key validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate short or missing keys and emit warnings.
    Debug,
    /// Release builds require a readable key of at least [`TOKEN_KEY_MIN_LEN`] bytes.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use taskdeck::inbound::http::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while loading the token signing key.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the key file failed.
    #[error("failed to read token key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The key file exists but is too short for release builds.
    #[error("token key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// Release builds must not allow ephemeral keys.
    #[error("TOKEN_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Load the token signing key from the environment.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use taskdeck::inbound::http::token_config::{BuildMode, token_key_from_env};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("token_key_example");
/// std::fs::write(&key_path, vec![b'k'; 32])?;
///
/// let key_path = key_path.to_string_lossy().into_owned();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "TOKEN_KEY_FILE" => Some(key_path.clone()),
///     _ => None,
/// });
///
/// let key = token_key_from_env(&env, BuildMode::Release)?;
/// assert_eq!(key.len(), 32);
/// # Ok(())
/// # }
/// ```
pub fn token_key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<Zeroizing<Vec<u8>>, TokenConfigError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| TOKEN_KEY_DEFAULT_PATH.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            let length = bytes.len();
            if length < TOKEN_KEY_MIN_LEN {
                if !mode.is_debug() {
                    return Err(TokenConfigError::KeyTooShort {
                        path,
                        length,
                        min_len: TOKEN_KEY_MIN_LEN,
                    });
                }
                warn!(
                    path = %path.display(),
                    length,
                    "token key shorter than {TOKEN_KEY_MIN_LEN} bytes (dev only)"
                );
            }
            Ok(bytes)
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary token key; tokens will not survive a restart (dev only)"
            );
            Ok(ephemeral_key())
        }
        Err(error) => Err(TokenConfigError::KeyRead {
            path,
            source: error,
        }),
    }
}

fn ephemeral_key() -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0_u8; EPHEMERAL_KEY_LEN]);
    OsRng.fill_bytes(key.as_mut_slice());
    key
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, TokenConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return Ok(false);
    };
    match parse_bool(&value) {
        Some(true) if mode.is_debug() => Ok(true),
        Some(true) => Err(TokenConfigError::EphemeralNotAllowed),
        Some(false) => Ok(false),
        None if mode.is_debug() => {
            warn!(value = %value, "invalid TOKEN_ALLOW_EPHEMERAL; defaulting to disabled");
            Ok(false)
        }
        None => Err(TokenConfigError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
