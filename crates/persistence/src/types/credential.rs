//! Persisted login records.

use serde::{Deserialize, Serialize};

/// A user's stored credential.
///
/// The password is only ever held as a PHC-format hash. Field names match
/// the documents in the user collection.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredential {
    /// Unique login key.
    pub email: String,
    /// Display name given at signup.
    #[serde(rename = "firstname", default)]
    pub first_name: String,
    /// Salted one-way hash of the password.
    pub password_hash: String,
}

impl std::fmt::Debug for UserCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredential")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_hash() {
        let user = UserCredential {
            email: "ada@example.org".to_string(),
            first_name: "Ada".to_string(),
            password_hash: "$argon2id$secret".to_string(),
        };
        let rendered = format!("{:?}", user);
        assert!(rendered.contains("ada@example.org"));
        assert!(!rendered.contains("argon2id"));
    }

    #[test]
    fn test_serializes_with_collection_field_names() {
        let user = UserCredential {
            email: "ada@example.org".to_string(),
            first_name: "Ada".to_string(),
            password_hash: "h".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["firstname"], "Ada");
        assert!(json.get("first_name").is_none());
    }
}
