//! Write authorization for posts.
//!
//! Any authenticated principal may create and edit posts. Anonymous writes are
//! rejected; reads are never gated.

use crate::domain::Principal;
use crate::error::DomainError;

/// Resolve the principal allowed to write, or fail with `Unauthorized`.
pub fn authorize_write(principal: Option<&Principal>) -> Result<&Principal, DomainError> {
    principal.ok_or(DomainError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_anonymous_is_rejected() {
        assert!(matches!(
            authorize_write(None),
            Err(DomainError::Unauthorized)
        ));
    }

    #[test]
    fn test_authenticated_is_allowed() {
        let paul = Principal {
            user_id: Uuid::new_v4(),
            username: "paul".to_string(),
        };
        assert_eq!(authorize_write(Some(&paul)).unwrap(), &paul);
    }
}
