//! Write-only password digests.
//!
//! A [`PasswordDigest`] wraps a PHC-format Argon2id hash. The plaintext is
//! consumed during derivation and is never stored; the only capabilities the
//! type exposes are deriving a new digest and verifying a candidate against
//! an existing one. There is deliberately no accessor returning the secret.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

const SALT_LEN: usize = 16;

/// Failure while deriving a digest from a plaintext password.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password digest derivation failed: {0}")]
pub struct DigestError(String);

/// Salted one-way digest of a user's password in PHC string format.
///
/// ## Invariants
/// - The wrapped string never equals the plaintext it was derived from.
/// - Verification fails closed: any parse or comparison failure is a
///   mismatch, never a panic.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Derive a digest from a plaintext password with a fresh random salt.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::PasswordDigest;
    ///
    /// let digest = PasswordDigest::derive("correct horse battery staple")?;
    /// assert!(digest.verify("correct horse battery staple"));
    /// assert!(!digest.verify("tr0ub4dor&3"));
    /// # Ok::<(), backend::domain::DigestError>(())
    /// ```
    pub fn derive(plaintext: &str) -> Result<Self, DigestError> {
        let mut salt_bytes = [0u8; SALT_LEN];
        getrandom::getrandom(&mut salt_bytes).map_err(|err| DigestError(err.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|err| DigestError(err.to_string()))?;

        let digest = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| DigestError(err.to_string()))?;
        Ok(Self(digest.to_string()))
    }

    /// Rehydrate a digest previously produced by [`PasswordDigest::derive`].
    ///
    /// Malformed input is accepted here and rejected at verification time so
    /// corrupt rows read from storage degrade to failed logins rather than
    /// read errors.
    pub(crate) fn from_phc(phc: String) -> Self {
        Self(phc)
    }

    /// PHC string handed to persistence adapters when writing a user.
    pub(crate) fn phc_string(&self) -> &str {
        self.0.as_str()
    }

    /// Compare a candidate plaintext against the stored digest.
    ///
    /// Returns `false` on any mismatch, including an unparseable digest.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        PasswordHash::new(&self.0)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(candidate.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn derive_then_verify_round_trips() {
        let digest = PasswordDigest::derive("pw1").expect("derivation succeeds");
        assert!(digest.verify("pw1"));
        assert!(!digest.verify("pw2"));
    }

    #[rstest]
    fn digest_never_equals_plaintext() {
        let digest = PasswordDigest::derive("pw1").expect("derivation succeeds");
        assert_ne!(digest.phc_string(), "pw1");
        assert!(digest.phc_string().starts_with("$argon2"));
    }

    #[rstest]
    fn empty_password_is_digestable() {
        let digest = PasswordDigest::derive("").expect("derivation succeeds");
        assert!(digest.verify(""));
        assert!(!digest.verify("anything"));
    }

    #[rstest]
    fn distinct_salts_produce_distinct_digests() {
        let first = PasswordDigest::derive("pw1").expect("derivation succeeds");
        let second = PasswordDigest::derive("pw1").expect("derivation succeeds");
        assert_ne!(first.phc_string(), second.phc_string());
    }

    #[rstest]
    fn malformed_digest_fails_closed() {
        let digest = PasswordDigest::from_phc("not-a-phc-string".to_owned());
        assert!(!digest.verify("pw1"));
    }

    #[rstest]
    fn debug_redacts_the_digest() {
        let digest = PasswordDigest::derive("pw1").expect("derivation succeeds");
        assert_eq!(format!("{digest:?}"), "PasswordDigest(..)");
    }
}
