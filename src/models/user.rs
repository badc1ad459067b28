//! User model
//!
//! A dashboard account: an email address and a password hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity representing a registered dashboard account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Email address (unique)
    pub email: String,
    /// Password hash (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User.
    ///
    /// The password must already be hashed with `services::password::hash_password()`.
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = User::new("a@example.com".to_string(), "$argon2id$secret".to_string());
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["email"], "a@example.com");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("createdAt").is_some());
    }
}
