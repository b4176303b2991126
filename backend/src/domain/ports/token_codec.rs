//! Port for encoding and decoding signed bearer tokens.

use crate::domain::{SessionToken, TokenClaims};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token codecs.
    pub enum TokenCodecError {
        /// Token is not three well-formed segments.
        Malformed => "token is malformed",
        /// Signature did not verify against the server key.
        BadSignature => "token signature is invalid",
        /// Claims could not be serialised.
        Encoding { message: String } => "token encoding failed: {message}",
    }
}

/// Stateless signed-token codec.
///
/// `decode` only checks integrity; expiry is judged by the caller against its
/// own clock.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Sign `claims` into a compact token.
    fn encode(&self, claims: &TokenClaims) -> Result<SessionToken, TokenCodecError>;

    /// Verify the signature of `token` and return its claims.
    fn decode(&self, token: &str) -> Result<TokenClaims, TokenCodecError>;
}
