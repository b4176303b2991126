//! HS256 compact-JWS implementation of the `TokenCodec` port.
//!
//! Tokens are `base64url(header).base64url(claims).base64url(mac)` without
//! padding, with header `{"alg":"HS256","typ":"JWT"}` and claims
//! `{"sub","iat","exp"}` (seconds since the epoch). The MAC is checked in
//! constant time before any claim is parsed.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeZone, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::domain::ports::{TokenCodec, TokenCodecError};
use crate::domain::{SessionToken, TokenClaims, UserId};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

#[derive(Serialize, Deserialize)]
struct Header<'a> {
    alg: &'a str,
    typ: &'a str,
}

#[derive(Serialize, Deserialize)]
struct WireClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// HMAC-SHA256 token codec holding the server signing key.
#[derive(Clone)]
pub struct HmacTokenCodec {
    key: Zeroizing<Vec<u8>>,
}

impl HmacTokenCodec {
    /// Create a codec signing with `key`.
    pub fn new(key: Zeroizing<Vec<u8>>) -> Self {
        Self { key }
    }

    /// Short, non-reversible identifier of the signing key for logs.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.key.as_slice());
        hex::encode(digest.get(..8).unwrap_or_default())
    }

    fn mac(&self) -> Result<HmacSha256, TokenCodecError> {
        HmacSha256::new_from_slice(&self.key)
            .map_err(|err| TokenCodecError::encoding(format!("invalid signing key: {err}")))
    }
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, TokenCodecError> {
    let json =
        serde_json::to_vec(value).map_err(|err| TokenCodecError::encoding(err.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenCodecError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenCodecError::malformed())
}

fn instant(seconds: i64) -> Result<DateTime<Utc>, TokenCodecError> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(TokenCodecError::malformed)
}

impl TokenCodec for HmacTokenCodec {
    fn encode(&self, claims: &TokenClaims) -> Result<SessionToken, TokenCodecError> {
        let header = encode_segment(&Header {
            alg: ALGORITHM,
            typ: "JWT",
        })?;
        let payload = encode_segment(&WireClaims {
            sub: claims.subject().to_string(),
            iat: claims.issued_at().timestamp(),
            exp: claims.expires_at().timestamp(),
        })?;
        let signing_input = format!("{header}.{payload}");

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(SessionToken::new(format!("{signing_input}.{signature}")))
    }

    fn decode(&self, token: &str) -> Result<TokenClaims, TokenCodecError> {
        let mut segments = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenCodecError::malformed());
        };

        let signature = decode_segment(signature)?;
        let mut mac = self.mac()?;
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenCodecError::bad_signature())?;

        let header_bytes = decode_segment(header)?;
        let header: Header<'_> =
            serde_json::from_slice(&header_bytes).map_err(|_| TokenCodecError::malformed())?;
        if header.alg != ALGORITHM {
            return Err(TokenCodecError::malformed());
        }
        let claims: WireClaims = serde_json::from_slice(&decode_segment(payload)?)
            .map_err(|_| TokenCodecError::malformed())?;
        let subject = UserId::new(&claims.sub).map_err(|_| TokenCodecError::malformed())?;

        Ok(TokenClaims::from_parts(
            subject,
            instant(claims.iat)?,
            instant(claims.exp)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::Duration;
    use rstest::{fixture, rstest};

    use super::*;

    fn key(byte: u8) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(vec![byte; 32])
    }

    #[fixture]
    fn codec() -> HmacTokenCodec {
        HmacTokenCodec::new(key(7))
    }

    fn claims() -> TokenClaims {
        let issued = Utc
            .timestamp_opt(1_700_000_000, 0)
            .single()
            .expect("valid timestamp");
        TokenClaims::new(UserId::random(), issued, Duration::days(30))
    }

    #[rstest]
    fn decode_recovers_encoded_claims(codec: HmacTokenCodec) {
        let claims = claims();
        let token = codec.encode(&claims).expect("encode");
        assert_eq!(codec.decode(token.as_str()).expect("decode"), claims);
    }

    #[rstest]
    fn header_is_standard_hs256(codec: HmacTokenCodec) {
        let token = codec.encode(&claims()).expect("encode");
        let header = token.as_str().split('.').next().expect("header segment");
        let json = URL_SAFE_NO_PAD.decode(header).expect("base64url");
        assert_eq!(json, br#"{"alg":"HS256","typ":"JWT"}"#);
    }

    #[rstest]
    fn token_from_another_key_is_rejected(codec: HmacTokenCodec) {
        let foreign = HmacTokenCodec::new(key(9))
            .encode(&claims())
            .expect("encode");
        assert_eq!(
            codec.decode(foreign.as_str()),
            Err(TokenCodecError::BadSignature)
        );
    }

    #[rstest]
    fn tampered_claims_fail_signature_check(codec: HmacTokenCodec) {
        let token = codec.encode(&claims()).expect("encode");
        let mut parts: Vec<String> = token.as_str().split('.').map(str::to_owned).collect();
        let forged = WireClaims {
            sub: UserId::random().to_string(),
            iat: 0,
            exp: i64::from(i32::MAX),
        };
        parts[1] = encode_segment(&forged).expect("encode forged claims");
        assert_eq!(
            codec.decode(&parts.join(".")),
            Err(TokenCodecError::BadSignature)
        );
    }

    #[rstest]
    #[case("")]
    #[case("only.two")]
    #[case("a.b.c.d")]
    #[case("a.b.!!!")]
    fn malformed_tokens_are_rejected(codec: HmacTokenCodec, #[case] token: &str) {
        assert_eq!(codec.decode(token), Err(TokenCodecError::Malformed));
    }

    #[rstest]
    fn fingerprint_identifies_key_without_revealing_it(codec: HmacTokenCodec) {
        let fingerprint = codec.fingerprint();
        assert_eq!(fingerprint.len(), 16);
        assert_eq!(fingerprint, HmacTokenCodec::new(key(7)).fingerprint());
        assert_ne!(fingerprint, HmacTokenCodec::new(key(8)).fingerprint());
    }
}
