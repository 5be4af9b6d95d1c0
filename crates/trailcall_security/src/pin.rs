//! Admin PIN hashing and verification.

use sha2::{Digest, Sha256};
use tracing::{debug, warn};
use trailcall_error::{AuthError, AuthErrorKind};

/// Hex-encoded SHA-256 digest of a PIN, the form stored in configuration.
///
/// # Examples
///
/// ```
/// use trailcall_security::hash_pin;
///
/// let digest = hash_pin("1234");
/// assert_eq!(digest.len(), 64);
/// assert_eq!(digest, hash_pin("1234"));
/// ```
pub fn hash_pin(pin: &str) -> String {
    format!("{:x}", Sha256::digest(pin.as_bytes()))
}

/// Checks submitted PINs against the configured digest.
#[derive(Debug, Clone, Default)]
pub struct PinVerifier {
    pin_hash: Option<String>,
}

impl PinVerifier {
    /// A verifier for `pin_hash`; a blank hash leaves admin login disabled.
    pub fn new(pin_hash: Option<String>) -> Self {
        let pin_hash = pin_hash
            .map(|h| h.trim().to_lowercase())
            .filter(|h| !h.is_empty());
        Self { pin_hash }
    }

    /// True when a PIN hash is configured.
    pub fn is_configured(&self) -> bool {
        self.pin_hash.is_some()
    }

    /// Accepts `pin` when its digest equals the configured one.
    ///
    /// # Errors
    ///
    /// `PinNotConfigured` when no hash is set, `InvalidPin` on mismatch.
    pub fn verify(&self, pin: &str) -> Result<(), AuthError> {
        let Some(expected) = &self.pin_hash else {
            warn!("Admin login attempted without a configured PIN");
            return Err(AuthError::new(AuthErrorKind::PinNotConfigured));
        };
        if digests_match(&hash_pin(pin), expected) {
            debug!("Admin PIN accepted");
            Ok(())
        } else {
            warn!("Admin PIN rejected");
            Err(AuthError::new(AuthErrorKind::InvalidPin))
        }
    }
}

/// Compares every byte so timing does not reveal the matching prefix.
fn digests_match(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a.bytes()
            .zip(b.bytes())
            .fold(0u8, |acc, (x, y)| acc | (x ^ y))
            == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_lowercase_hex_sha256() {
        assert_eq!(
            hash_pin("1234"),
            "03ac674216f3e15c761ee1a5e255f067953623c8b388b4459e13f978d7c846f4"
        );
    }

    #[test]
    fn test_verify_accepts_matching_pin() {
        let verifier = PinVerifier::new(Some(hash_pin("1234")));
        assert!(verifier.verify("1234").is_ok());
    }

    #[test]
    fn test_verify_rejects_wrong_pin() {
        let verifier = PinVerifier::new(Some(hash_pin("1234")));
        let err = verifier.verify("4321").unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::InvalidPin);
    }

    #[test]
    fn test_uppercase_configured_hash_still_matches() {
        let verifier = PinVerifier::new(Some(hash_pin("1234").to_uppercase()));
        assert!(verifier.verify("1234").is_ok());
    }

    #[test]
    fn test_blank_hash_means_not_configured() {
        let verifier = PinVerifier::new(Some("   ".to_string()));
        assert!(!verifier.is_configured());
        let err = verifier.verify("1234").unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::PinNotConfigured);
    }

    #[test]
    fn test_digest_comparison_requires_equal_length() {
        assert!(!digests_match("abc", "abcd"));
        assert!(digests_match("abcd", "abcd"));
    }
}
