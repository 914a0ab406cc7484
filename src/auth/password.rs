//! Password Hashing
//! Mission: Salted bcrypt hashing kept off the request-handling threads

use anyhow::{bail, Context, Result};
use tracing::warn;

pub const DEFAULT_BCRYPT_COST: u32 = 10;
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// bcrypt hasher with a fixed work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            bail!(
                "bcrypt cost {} out of range {}..={}",
                cost,
                MIN_BCRYPT_COST,
                MAX_BCRYPT_COST
            );
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash on the blocking pool so concurrent requests keep flowing
    pub async fn hash(&self, password: &str) -> Result<String> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .context("Hashing task panicked")?
            .context("Failed to hash password")
    }

    /// Verify on the blocking pool. Any failure counts as a mismatch.
    pub async fn verify(&self, password: &str, digest: &str) -> bool {
        let password = password.to_string();
        let digest = digest.to_string();

        match tokio::task::spawn_blocking(move || verify_blocking(&password, &digest)).await {
            Ok(valid) => valid,
            Err(e) => {
                warn!("Password verification task failed: {}", e);
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}

fn verify_blocking(password: &str, digest: &str) -> bool {
    match bcrypt::verify(password, digest) {
        Ok(valid) => valid,
        Err(e) => {
            warn!("Password verification error: {}", e);
            false
        }
    }
}
