//! UUID utilities for recipe identifiers.
//!
//! Recipes are keyed by UUIDv7, which embeds a millisecond timestamp in the
//! first 48 bits. Identifiers arrive from clients as path strings, so parsing
//! lives here alongside generation.

use uuid::Uuid;

use crate::error::{Error, Result};

/// Generate a new UUIDv7 identifier.
///
/// # Example
///
/// ```
/// use recipe_core::uuid_utils::new_v7;
///
/// let id = new_v7();
/// assert_eq!(id.get_version_num(), 7);
/// ```
#[inline]
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}

/// Parse a client-supplied recipe identifier.
///
/// Accepts any RFC 9562 textual form the `uuid` crate understands (hyphenated,
/// simple, braced, urn). Anything else is [`Error::InvalidIdentifier`].
pub fn parse_recipe_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|e| Error::InvalidIdentifier(format!("'{}' is not a valid recipe id: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_v7_is_version_7() {
        assert_eq!(new_v7().get_version_num(), 7);
    }

    #[test]
    fn test_new_v7_is_time_ordered() {
        let a = new_v7();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = new_v7();
        assert!(a < b);
    }

    #[test]
    fn test_parse_recipe_id_roundtrip() {
        let id = new_v7();
        assert_eq!(parse_recipe_id(&id.to_string()).unwrap(), id);
        assert_eq!(parse_recipe_id(&id.simple().to_string()).unwrap(), id);
    }

    #[test]
    fn test_parse_recipe_id_rejects_garbage() {
        for bad in ["", "123", "64f1c2e9a1b2c3d4e5f60718", "not-a-uuid"] {
            let err = parse_recipe_id(bad).unwrap_err();
            assert!(
                matches!(err, Error::InvalidIdentifier(_)),
                "expected InvalidIdentifier for {:?}",
                bad
            );
        }
    }
}
