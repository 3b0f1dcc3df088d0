use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const ADMIN_ROLE: &str = "admin";

/// User record as returned by the auth API and kept in client storage.
///
/// Fields the client does not use are carried in `extra` so that a stored
/// record round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Token and user held together after a successful login.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignupDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub phone: String,
}

impl ProfileUpdate {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            phone: user.phone.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = json!({
            "_id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "role": "admin",
            "createdAt": "2024-01-01"
        });
        let user: User = serde_json::from_value(raw.clone()).unwrap();
        assert!(user.is_admin());
        assert_eq!(user.phone, None);
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn missing_role_is_not_admin() {
        let user: User = serde_json::from_value(json!({"name": "Bo"})).unwrap();
        assert!(!user.is_admin());
    }

    #[test]
    fn profile_update_starts_from_user() {
        let user = User {
            name: "Ada".into(),
            phone: Some("555".into()),
            ..User::default()
        };
        let update = ProfileUpdate::from_user(&user);
        assert_eq!(update.phone, "555");
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"name": "Ada", "phone": "555"})
        );
    }
}
