//! Account rules layered over the remote table: duplicate-email check on signup,
//! plaintext credential check on login, and the detached `last_login` write.
//!
//! The existence check and the write that follows it are two separate remote
//! calls, so two concurrent signups for one email can both succeed.

use std::sync::Arc;

use chrono::Local;
use serde_json::{json, Map, Value};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::models::user::StoredUser;
use crate::table_client::{Filter, UserTable};
use crate::users::validation::{lookup_text, missing_fields, SIGNUP_FIELDS};

/// Local wall-clock time as ISO-8601 with microseconds and no offset,
/// e.g. `2025-10-25T14:03:09.512034`.
pub fn now_timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Creates a user record after checking that no record holds the same email.
/// Returns the remote store's body for the created record.
pub async fn register(
    table: &dyn UserTable,
    mut record: Map<String, Value>,
) -> Result<Value, AppError> {
    let missing = missing_fields(&record, &SIGNUP_FIELDS);
    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    let email = record.get("email").map(lookup_text).unwrap_or_default();

    let existing = table.find(&Filter::eq("email", email.as_str())).await?;
    if !existing.is_success() {
        return Err(AppError::remote(
            existing.status,
            "error querying the database",
        ));
    }
    let matches: Vec<Value> = serde_json::from_value(existing.body)?;
    if !matches.is_empty() {
        warn!(email = %email, "signup for an email that is already registered");
        return Err(AppError::EmailTaken);
    }

    record.insert("created_at".to_string(), json!(now_timestamp()));
    record.insert("last_login".to_string(), Value::Null);

    let created = table.create(&Value::Object(record)).await?;
    if !matches!(created.status, 200 | 201) {
        return Err(AppError::remote(created.status, "failed to create user"));
    }

    info!(email = %email, "user created");
    Ok(created.body)
}

/// Looks the user up by email and compares the stored password verbatim.
pub async fn authenticate(
    table: &dyn UserTable,
    email: &str,
    password: &str,
) -> Result<StoredUser, AppError> {
    let response = match table.find(&Filter::eq("email", email)).await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "user lookup unreachable");
            return Err(AppError::remote(500, "database access error"));
        }
    };
    if !response.is_success() {
        warn!(status = response.status, "user lookup failed");
        return Err(AppError::remote(500, "database access error"));
    }

    let records: Vec<Value> = serde_json::from_value(response.body)?;
    let Some(first) = records.into_iter().next() else {
        warn!(email = %email, "login for unknown email");
        return Err(AppError::UserNotFound);
    };

    let user: StoredUser = serde_json::from_value(first)?;
    if user.password.as_ref().and_then(Value::as_str) != Some(password) {
        warn!(email = %email, object_id = %user.object_id, "login with incorrect password");
        return Err(AppError::IncorrectPassword);
    }

    Ok(user)
}

/// Writes `last_login` on a detached task. The outcome is logged and never
/// reaches the caller, so readers of `last_login` see it eventually.
pub fn record_login(table: Arc<dyn UserTable>, object_id: String, at: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        let changes = json!({ "last_login": at });
        match table.update(&object_id, &changes).await {
            Ok(response) if response.is_success() => {
                debug!(object_id = %object_id, "last_login recorded");
            }
            Ok(response) => {
                warn!(object_id = %object_id, status = response.status, "last_login update rejected");
            }
            Err(e) => {
                warn!(object_id = %object_id, error = %e, "last_login update failed");
            }
        }
    })
}
