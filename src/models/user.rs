use serde::{Deserialize, Serialize};

pub const ADMIN_GROUP: &str = "admin";

/// A user record as persisted in the JSON store, password hash included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub disabled: bool,
    pub password: String,
}

impl UserRecord {
    pub fn is_admin(&self) -> bool {
        self.groups.iter().any(|group| group == ADMIN_GROUP)
    }

    pub fn public(&self) -> User {
        User {
            username: self.username.clone(),
            groups: self.groups.clone(),
            disabled: self.disabled,
        }
    }
}

/// The user view returned over the wire; never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub username: String,
    pub groups: Vec<String>,
    pub disabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_detection() {
        let record = UserRecord {
            username: "root".to_string(),
            groups: vec!["admin".to_string(), "staff".to_string()],
            disabled: false,
            password: "hash".to_string(),
        };
        assert!(record.is_admin());

        let record = UserRecord {
            groups: vec!["staff".to_string()],
            ..record
        };
        assert!(!record.is_admin());
    }

    #[test]
    fn test_public_view_drops_password() {
        let record = UserRecord {
            username: "alice".to_string(),
            groups: vec![],
            disabled: false,
            password: "hash".to_string(),
        };
        let body = serde_json::to_value(record.public()).unwrap();
        assert!(body.get("password").is_none());
        assert_eq!(body["username"], "alice");
    }
}
