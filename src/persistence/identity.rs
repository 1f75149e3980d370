//! Identity provider. The game has no real auth: the owner comes from config.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

pub trait IdentityProvider {
    fn current_user(&self) -> Result<User, IdentityError>;
}

/// Always answers with the configured owner.
#[derive(Debug, Clone)]
pub struct ConfiguredIdentity {
    email: String,
}

impl ConfiguredIdentity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

impl IdentityProvider for ConfiguredIdentity {
    fn current_user(&self) -> Result<User, IdentityError> {
        if self.email.trim().is_empty() {
            return Err(IdentityError::Unavailable("no owner configured".to_string()));
        }
        Ok(User {
            email: self.email.clone(),
        })
    }
}

/// Never resolves a user; the session plays offline.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineIdentity;

impl IdentityProvider for OfflineIdentity {
    fn current_user(&self) -> Result<User, IdentityError> {
        Err(IdentityError::Unavailable("offline mode".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_identity_returns_owner() {
        let id = ConfiguredIdentity::new("angler@example.com");
        assert_eq!(id.current_user().unwrap().email, "angler@example.com");
    }

    #[test]
    fn test_blank_owner_is_unavailable() {
        assert!(ConfiguredIdentity::new("  ").current_user().is_err());
        assert!(OfflineIdentity.current_user().is_err());
    }
}
