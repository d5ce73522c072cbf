//! Axum route handlers for the user endpoints.
//!
//! `GET /users`, `GET /users/:id` and `PUT /users/:id` relay the remote status and
//! body untouched. Delete, signup and login wrap remote failures in `{"error": ...}`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::models::user::SessionUser;
use crate::state::AppState;
use crate::table_client::TableResponse;
use crate::users::accounts::{authenticate, now_timestamp, record_login, register};
use crate::users::dto::{CreateUserResponse, LoginResponse, MessageResponse};
use crate::users::validation::non_empty_str;

/// A remote response re-emitted with its own status and body.
pub struct Relayed(pub TableResponse);

impl IntoResponse for Relayed {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::BAD_GATEWAY);
        (status, Json(self.0.body)).into_response()
    }
}

/// GET /users
#[instrument(skip(state))]
pub async fn handle_list_users(State(state): State<AppState>) -> Result<Relayed, AppError> {
    Ok(Relayed(state.users.list().await?))
}

/// GET /users/:id
#[instrument(skip(state))]
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
) -> Result<Relayed, AppError> {
    Ok(Relayed(state.users.get(&object_id).await?))
}

/// PUT /users/:id
///
/// The body is forwarded without validation; the remote store applies it as a partial update.
#[instrument(skip(state, changes))]
pub async fn handle_update_user(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
    Json(changes): Json<Value>,
) -> Result<Relayed, AppError> {
    Ok(Relayed(state.users.update(&object_id, &changes).await?))
}

/// DELETE /users/:id
#[instrument(skip(state))]
pub async fn handle_delete_user(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let response = state.users.delete(&object_id).await?;
    if !matches!(response.status, 200 | 204) {
        return Err(AppError::remote(response.status, "failed to delete user"));
    }

    info!(object_id = %object_id, "user deleted");
    Ok(Json(MessageResponse {
        message: "user deleted",
    }))
}

/// POST /create_user
#[instrument(skip(state, body))]
pub async fn handle_create_user(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<CreateUserResponse>), AppError> {
    let user = register(state.users.as_ref(), body).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            message: "user created successfully",
            user,
        }),
    ))
}

/// POST /login
///
/// The `last_login` write is detached: the response carries the new timestamp
/// even if the remote update later fails.
#[instrument(skip(state, body))]
pub async fn handle_login(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<LoginResponse>, AppError> {
    let (Some(email), Some(password)) =
        (non_empty_str(&body, "email"), non_empty_str(&body, "password"))
    else {
        warn!("login without email or password");
        return Err(AppError::MissingCredentials);
    };

    let user = authenticate(state.users.as_ref(), email, password).await?;

    let last_login = now_timestamp();
    drop(record_login(
        state.users.clone(),
        user.object_id.clone(),
        last_login.clone(),
    ));

    info!(object_id = %user.object_id, "user logged in");
    Ok(Json(LoginResponse {
        message: "login successful",
        user: SessionUser::from_stored(user, last_login),
    }))
}
