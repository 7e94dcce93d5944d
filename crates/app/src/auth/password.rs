//! Password hashing.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use once_cell::sync::Lazy;
use thiserror::Error;

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordError(argon2::password_hash::Error);

/// Hash a password into an argon2 PHC string with a fresh salt.
///
/// # Errors
///
/// Returns an error if argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError)
}

/// Check `password` against a stored PHC string. Unparseable hashes never match.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Stand-in hash verified when no account matches, so both misses cost one argon2 run.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("vitrine-no-such-account").ok());

/// Verify against `hash`, or against a dummy hash when there is none.
///
/// A missing hash never matches.
#[must_use]
pub fn verify_password_or_dummy(password: &str, hash: Option<&str>) -> bool {
    match hash {
        Some(hash) => verify_password(password, hash),
        None => {
            let _dummy_matched = DUMMY_HASH
                .as_deref()
                .is_some_and(|dummy| verify_password(password, dummy));

            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("correct horse").expect("hashing should succeed");

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let first = hash_password("same").expect("hashing should succeed");
        let second = hash_password("same").expect("hashing should succeed");

        assert_ne!(first, second);
    }

    #[test]
    fn missing_hash_still_runs_argon2_and_never_matches() {
        assert!(DUMMY_HASH.as_deref().is_some_and(|hash| hash.starts_with("$argon2")));
        assert!(!verify_password_or_dummy("vitrine-no-such-account", None));

        let hash = hash_password("correct horse").expect("hashing should succeed");

        assert!(verify_password_or_dummy("correct horse", Some(&hash)));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
