//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashes are PHC strings with an embedded random salt. Verification of an
//! unknown account runs against a decoy hash computed once at construction, so
//! both login failure paths pay for one verification.

use std::sync::Arc;

use argon2::password_hash::{self, PasswordHash as PhcHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier as _, Version};
use async_trait::async_trait;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{Password, PasswordHash};

use super::blocking::run_blocking;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
        }
    }
}

/// Argon2id-backed secret hasher.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
    decoy: Arc<str>,
}

impl Argon2PasswordHasher {
    /// Build a hasher with the given cost and prepare the decoy hash.
    ///
    /// # Errors
    ///
    /// Fails when the cost parameters are outside Argon2's accepted range.
    pub fn new(cost: HashCost) -> Result<Self, PasswordHasherError> {
        let params = Params::new(
            cost.memory_kib,
            cost.iterations,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|err| PasswordHasherError::hash(format!("invalid argon2 parameters: {err}")))?;
        let decoy = hash_with(&params, b"decoy secret never issued")?;
        Ok(Self {
            params,
            decoy: Arc::from(decoy),
        })
    }
}

fn argon2(params: &Params) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone())
}

fn hash_with(params: &Params, secret: &[u8]) -> Result<String, PasswordHasherError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2(params)
        .hash_password(secret, &salt)
        .map(|phc| phc.to_string())
        .map_err(|err| PasswordHasherError::hash(err.to_string()))
}

fn verify_with(params: &Params, secret: &[u8], phc: &str) -> Result<bool, PasswordHasherError> {
    let parsed =
        PhcHash::new(phc).map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
    match argon2(params).verify_password(secret, &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHasherError::hash(err.to_string())),
    }
}

fn join_failure(err: tokio::task::JoinError) -> PasswordHasherError {
    PasswordHasherError::hash(format!("hashing task aborted: {err}"))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError> {
        let params = self.params.clone();
        let secret = Zeroizing::new(password.expose().as_bytes().to_vec());
        let phc = run_blocking(move || hash_with(&params, &secret))
            .await
            .map_err(join_failure)??;
        PasswordHash::new(phc).map_err(|err| PasswordHasherError::hash(err.to_string()))
    }

    async fn verify(
        &self,
        password: &Password,
        stored: Option<&PasswordHash>,
    ) -> Result<bool, PasswordHasherError> {
        let params = self.params.clone();
        let secret = Zeroizing::new(password.expose().as_bytes().to_vec());
        let known = stored.is_some();
        let target = stored.map_or_else(|| self.decoy.to_string(), |h| h.as_str().to_owned());
        let matched = run_blocking(move || verify_with(&params, &secret, &target))
            .await
            .map_err(join_failure)??;
        Ok(known && matched)
    }
}
