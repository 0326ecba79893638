//! Password strength policy port.

use thiserror::Error;

/// A rejected password, carrying the user-facing reason.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct PasswordPolicyViolation(pub String);

/// Opaque password strength predicate delegated to the credential service.
pub trait PasswordPolicy: Send + Sync {
    /// Checks a candidate password against the policy.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordPolicyViolation`] with the user-facing message when
    /// the candidate is too weak.
    fn validate(&self, candidate: &str) -> Result<(), PasswordPolicyViolation>;
}

/// Default policy: a minimum length and not entirely numeric.
#[derive(Debug, Clone, Copy)]
pub struct BasicPasswordPolicy {
    min_length: usize,
}

impl BasicPasswordPolicy {
    /// Creates a policy with the given minimum character count.
    #[must_use]
    pub const fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Default for BasicPasswordPolicy {
    fn default() -> Self {
        Self::new(8)
    }
}

impl PasswordPolicy for BasicPasswordPolicy {
    fn validate(&self, candidate: &str) -> Result<(), PasswordPolicyViolation> {
        if candidate.chars().count() < self.min_length {
            return Err(PasswordPolicyViolation(format!(
                "This password is too short. It must contain at least {} characters.",
                self.min_length
            )));
        }
        if candidate.chars().all(|character| character.is_ascii_digit()) {
            return Err(PasswordPolicyViolation(
                "This password is entirely numeric.".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn accepts_a_long_mixed_password() {
        assert!(
            BasicPasswordPolicy::default()
                .validate("correct-horse-battery")
                .is_ok()
        );
    }

    #[rstest]
    fn rejects_short_passwords_with_the_length_message() {
        let violation = BasicPasswordPolicy::default()
            .validate("short")
            .expect_err("short password should be rejected");
        assert_eq!(
            violation.to_string(),
            "This password is too short. It must contain at least 8 characters."
        );
    }

    #[rstest]
    fn rejects_entirely_numeric_passwords() {
        let violation = BasicPasswordPolicy::default()
            .validate("123456789")
            .expect_err("numeric password should be rejected");
        assert_eq!(violation.to_string(), "This password is entirely numeric.");
    }

    #[rstest]
    fn honours_a_custom_minimum_length() {
        assert!(BasicPasswordPolicy::new(4).validate("ab1!").is_ok());
    }
}
