//! Remote table client — the single point of entry for all calls to the hosted user table.
//!
//! Handlers depend on the `UserTable` trait, never on reqwest directly.
//! Every call is attempted exactly once; the caller decides what a status means.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

pub mod filter;
#[cfg(test)]
pub mod memory;

pub use filter::Filter;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid table URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Raw outcome of a remote call: the status code and the decoded body.
///
/// An empty body decodes to `null`; a body that is not JSON is kept as a JSON string.
#[derive(Debug, Clone, PartialEq)]
pub struct TableResponse {
    pub status: u16,
    pub body: Value,
}

impl TableResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Operations the gateway needs from the remote user table.
///
/// Carried in `AppState` as `Arc<dyn UserTable>`.
#[async_trait]
pub trait UserTable: Send + Sync {
    async fn list(&self) -> Result<TableResponse, TableError>;

    async fn find(&self, filter: &Filter) -> Result<TableResponse, TableError>;

    async fn get(&self, object_id: &str) -> Result<TableResponse, TableError>;

    async fn create(&self, record: &Value) -> Result<TableResponse, TableError>;

    /// Partial update: only the keys present in `changes` are written.
    async fn update(&self, object_id: &str, changes: &Value) -> Result<TableResponse, TableError>;

    async fn delete(&self, object_id: &str) -> Result<TableResponse, TableError>;
}

/// reqwest-backed client for a Backendless-style data table.
#[derive(Clone)]
pub struct TableClient {
    client: Client,
    base_url: Url,
    app_id: Option<String>,
    api_key: Option<String>,
}

impl TableClient {
    pub fn new(config: &Config) -> Result<Self, TableError> {
        let base_url =
            Url::parse(&config.users_table_url).map_err(|e| TableError::InvalidBaseUrl {
                url: config.users_table_url.clone(),
                reason: e.to_string(),
            })?;
        if base_url.cannot_be_a_base() {
            return Err(TableError::InvalidBaseUrl {
                url: config.users_table_url.clone(),
                reason: "URL cannot carry path segments".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.remote_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            app_id: config.backendless_app_id.clone(),
            api_key: config.backendless_api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `base/{id}` with the id pushed as a single escaped path segment.
    fn record_url(&self, object_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(object_id);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header("content-type", "application/json");
        if let Some(app_id) = &self.app_id {
            builder = builder.header("application-id", app_id);
        }
        if let Some(api_key) = &self.api_key {
            builder = builder.header("secret-key", api_key);
        }
        builder
    }

    async fn send(&self, op: &'static str, builder: RequestBuilder) -> Result<TableResponse, TableError> {
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        debug!(op, status, "remote table call finished");

        Ok(TableResponse::new(status, decode_body(&text)))
    }
}

#[async_trait]
impl UserTable for TableClient {
    async fn list(&self) -> Result<TableResponse, TableError> {
        let builder = self.request(Method::GET, self.base_url.clone());
        self.send("list", builder).await
    }

    async fn find(&self, filter: &Filter) -> Result<TableResponse, TableError> {
        debug!(filter = %filter, "filtered list-read");
        let builder = self
            .request(Method::GET, self.base_url.clone())
            .query(&[("where", filter.to_where_clause())]);
        self.send("find", builder).await
    }

    async fn get(&self, object_id: &str) -> Result<TableResponse, TableError> {
        let builder = self.request(Method::GET, self.record_url(object_id));
        self.send("get", builder).await
    }

    async fn create(&self, record: &Value) -> Result<TableResponse, TableError> {
        let builder = self
            .request(Method::POST, self.base_url.clone())
            .json(record);
        self.send("create", builder).await
    }

    async fn update(&self, object_id: &str, changes: &Value) -> Result<TableResponse, TableError> {
        let builder = self
            .request(Method::PUT, self.record_url(object_id))
            .json(changes);
        self.send("update", builder).await
    }

    async fn delete(&self, object_id: &str) -> Result<TableResponse, TableError> {
        let builder = self.request(Method::DELETE, self.record_url(object_id));
        self.send("delete", builder).await
    }
}

fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
