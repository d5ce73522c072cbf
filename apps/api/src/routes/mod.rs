pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::users::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/users", get(handlers::handle_list_users))
        .route(
            "/users/:id",
            get(handlers::handle_get_user)
                .put(handlers::handle_update_user)
                .delete(handlers::handle_delete_user),
        )
        .route("/create_user", post(handlers::handle_create_user))
        .route("/login", post(handlers::handle_login))
        .with_state(state)
}

/// Router plus the HTTP layers the server runs with. Any origin may call the gateway.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
