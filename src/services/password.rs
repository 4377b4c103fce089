// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Salted password hashing (PBKDF2-HMAC-SHA256).
//!
//! Salt and derived key are stored hex-encoded on the user document, together
//! with the iteration count used to derive them.

use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use std::num::NonZeroU32;

use crate::error::AppError;

/// Salt length in bytes.
pub const SALT_LENGTH: usize = 16;

/// Iterations used for newly hashed passwords.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

const HASH_LENGTH: usize = 32;

static PBKDF2_ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

/// Hex-encoded password record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash {
    pub salt_hex: String,
    pub hash_hex: String,
    pub iterations: u32,
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<PasswordHash, AppError> {
    hash_password_with_iterations(password, PBKDF2_ITERATIONS)
}

fn hash_password_with_iterations(
    password: &str,
    iterations: u32,
) -> Result<PasswordHash, AppError> {
    let rounds = NonZeroU32::new(iterations)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("PBKDF2 iterations must be > 0")))?;

    let mut salt = [0u8; SALT_LENGTH];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to generate password salt")))?;

    let mut derived = [0u8; HASH_LENGTH];
    pbkdf2::derive(
        PBKDF2_ALGORITHM,
        rounds,
        &salt,
        password.as_bytes(),
        &mut derived,
    );

    Ok(PasswordHash {
        salt_hex: hex::encode(salt),
        hash_hex: hex::encode(derived),
        iterations,
    })
}

/// Check a password against a stored record.
///
/// Returns `false` for malformed records (missing or non-hex salt/hash).
pub fn verify_password(password: &str, salt_hex: &str, hash_hex: &str, iterations: u32) -> bool {
    let Some(rounds) = NonZeroU32::new(iterations) else {
        return false;
    };
    if salt_hex.is_empty() || hash_hex.is_empty() {
        return false;
    }

    let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(hash_hex)) else {
        tracing::warn!("Stored password record is not valid hex");
        return false;
    };

    // Constant-time comparison inside ring
    pbkdf2::verify(
        PBKDF2_ALGORITHM,
        rounds,
        &salt,
        password.as_bytes(),
        &expected,
    )
    .is_ok()
}
