use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_ADMIN_ID: &str = "admin-001";
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_NAME: &str = "Administrator";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Cashier,
}

/// Stored account. Passwords are compared in plain text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
    pub name: String,
}

/// The shape every API response exposes: a user without the password.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub name: String,
}

impl User {
    pub fn new(name: &str, username: &str, password: &str, role: Role) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password: Some(password.to_string()),
            role,
            name: name.to_string(),
        }
    }

    pub fn default_admin(password: &str) -> Self {
        Self {
            id: DEFAULT_ADMIN_ID.to_string(),
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: Some(password.to_string()),
            role: Role::Admin,
            name: DEFAULT_ADMIN_NAME.to_string(),
        }
    }

    pub fn is_default_admin(&self) -> bool {
        self.id == DEFAULT_ADMIN_ID
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password.as_deref() == Some(candidate)
    }

    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            username: self.username.clone(),
            role: self.role,
            name: self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_view_drops_password() {
        let user = User::new("Casey", "casey", "secret1", Role::Cashier);
        let json = serde_json::to_value(user.public()).unwrap();

        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "cashier");
    }

    #[test]
    fn user_without_password_never_matches() {
        let mut user = User::new("Casey", "casey", "secret1", Role::Cashier);
        assert!(user.password_matches("secret1"));
        assert!(!user.password_matches("secret2"));

        user.password = None;
        assert!(!user.password_matches(""));
    }

    #[test]
    fn parses_stored_shape() {
        let user: User = serde_json::from_str(
            r#"{"id":"admin-001","username":"admin","password":"password","role":"admin","name":"Administrator"}"#,
        )
        .unwrap();

        assert!(user.is_default_admin());
        assert!(user.is_admin());
    }
}
