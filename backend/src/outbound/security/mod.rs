//! Cryptographic adapters: secret hashing and bearer token signing.

mod argon2_hasher;
mod blocking;
mod hmac_token_codec;

pub use argon2_hasher::{Argon2PasswordHasher, HashCost};
pub use hmac_token_codec::HmacTokenCodec;
