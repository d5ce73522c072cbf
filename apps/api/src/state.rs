use std::sync::Arc;

use crate::table_client::UserTable;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Remote user table. Production: `TableClient`; tests swap in an in-memory table.
    pub users: Arc<dyn UserTable>,
}
