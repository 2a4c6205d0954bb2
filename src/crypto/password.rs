use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder,
};
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroize;

use crate::error::{AppError, Result};

/// The memory cost for Argon2 in MB.
const ARGON2_MEMORY_MB: u32 = 19;
/// The number of iterations for Argon2.
const ARGON2_ITERATIONS: u32 = 3;
/// The parallelism factor for Argon2.
const ARGON2_PARALLELISM: u32 = 6;
/// The salt length in bytes.
const SALT_LEN: usize = 16;

/// Hashes a password using Argon2id with a fresh random salt.
///
/// # Arguments
///
/// * `password` - The password to hash.
///
/// # Returns
///
/// A `Result` containing the PHC-encoded digest.
pub fn hash_password(password: &str) -> Result<String> {
    let mut password_bytes = password.as_bytes().to_vec();

    let mut salt_bytes = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt_bytes)
        .map_err(|e| AppError::Crypto(format!("Failed to generate salt: {}", e)))?;

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::Crypto(format!("Salt encoding error: {}", e)))?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        ParamsBuilder::new()
            .m_cost(ARGON2_MEMORY_MB * 1024)
            .t_cost(ARGON2_ITERATIONS)
            .p_cost(ARGON2_PARALLELISM)
            .build()
            .map_err(|e| AppError::Crypto(format!("Argon2 params: {}", e)))?,
    );

    let result = argon2
        .hash_password(&password_bytes, &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Crypto(format!("Argon2 hash error: {}", e)));

    password_bytes.zeroize();
    salt_bytes.zeroize();
    tracing::debug!("Password hashed successfully with Argon2");
    result
}

/// Verifies a password against a digest produced by [`hash_password`].
///
/// The Argon2 parameters and salt are read back out of the digest itself.
///
/// # Returns
///
/// `Ok(true)` on a match, `Ok(false)` on a mismatch, and an error only if
/// the digest cannot be parsed.
pub fn verify_password(password: &str, digest: &str) -> Result<bool> {
    let mut password_bytes = password.as_bytes().to_vec();
    let parsed_hash = PasswordHash::new(digest)
        .map_err(|e| AppError::Crypto(format!("Hash parse error: {}", e)))?;
    let result = Argon2::default()
        .verify_password(&password_bytes, &parsed_hash)
        .is_ok();

    password_bytes.zeroize();
    tracing::debug!("Password verification completed");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_verifies_original_password_only() {
        let digest = hash_password("pw1").unwrap();

        assert_ne!(digest, "pw1");
        assert!(digest.starts_with("$argon2id$"));
        assert!(verify_password("pw1", &digest).unwrap());
        assert!(!verify_password("pw2", &digest).unwrap());
    }

    #[test]
    fn salts_differ_between_calls() {
        let first = hash_password("same password").unwrap();
        let second = hash_password("same password").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("same password", &first).unwrap());
        assert!(verify_password("same password", &second).unwrap());
    }

    #[test]
    fn malformed_digest_is_an_error() {
        assert!(matches!(
            verify_password("pw1", "not-a-phc-string"),
            Err(AppError::Crypto(_))
        ));
    }
}
