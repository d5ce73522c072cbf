use serde::Serialize;
use serde_json::Value;

use crate::models::user::SessionUser;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub message: &'static str,
    /// The remote store's body for the new record, relayed as-is.
    pub user: Value,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: SessionUser,
}
