//! Admin gate for the submissions view.
//!
//! A single shared passphrase compared in constant time. This is a UI
//! convenience, not an access-control mechanism: the list endpoints answer
//! without any credential.

use subtle::ConstantTimeEq;

use crate::errors::AppError;

/// Perform constant-time string comparison.
pub fn verify_passphrase(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Gate in front of the admin submissions view.
pub struct AdminGate {
    passphrase: String,
}

impl AdminGate {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }

    /// Check a passphrase attempt.
    pub fn unlock(&self, provided: &str) -> bool {
        verify_passphrase(provided, &self.passphrase)
    }

    /// Check a passphrase attempt, failing with an error the view can show.
    pub fn require(&self, provided: &str) -> Result<(), AppError> {
        if self.unlock(provided) {
            Ok(())
        } else {
            Err(AppError::Unauthorized(
                "Incorrect password, please try again.".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_passphrase_equal() {
        assert!(verify_passphrase("98760", "98760"));
    }

    #[test]
    fn test_verify_passphrase_not_equal() {
        assert!(!verify_passphrase("98761", "98760"));
    }

    #[test]
    fn test_verify_passphrase_different_lengths() {
        assert!(!verify_passphrase("short", "much-longer-passphrase"));
    }

    #[test]
    fn test_verify_passphrase_empty() {
        assert!(verify_passphrase("", ""));
        assert!(!verify_passphrase("", "not-empty"));
    }

    #[test]
    fn test_admin_gate() {
        let gate = AdminGate::new("98760");
        assert!(gate.unlock("98760"));
        assert!(!gate.unlock("guess"));
    }

    #[test]
    fn test_admin_gate_require() {
        let gate = AdminGate::new("98760");
        assert!(gate.require("98760").is_ok());
        assert!(matches!(
            gate.require("guess"),
            Err(AppError::Unauthorized(_))
        ));
    }
}
