use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The subset of a remote user record the login flow reads.
/// Any other columns the table carries are ignored; the read columns keep
/// whatever JSON type the table holds.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredUser {
    #[serde(rename = "objectId")]
    pub object_id: String,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub username: Option<Value>,
    #[serde(default)]
    pub password: Option<Value>,
}

/// User summary returned by a successful login. Never carries the password.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    #[serde(rename = "objectId")]
    pub object_id: String,
    pub username: Option<Value>,
    pub email: Option<Value>,
    pub last_login: String,
}

impl SessionUser {
    pub fn from_stored(user: StoredUser, last_login: String) -> Self {
        Self {
            object_id: user.object_id,
            username: user.username,
            email: user.email,
            last_login,
        }
    }
}
