//! In-memory `UserTable` used by handler tests. Mimics the remote store's statuses.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use super::{Filter, TableError, TableResponse, UserTable};

#[derive(Default)]
pub struct MemoryTable {
    records: Mutex<Vec<Map<String, Value>>>,
    calls: Mutex<Vec<&'static str>>,
    find_status: Mutex<Option<u16>>,
    create_status: Mutex<Option<u16>>,
    delete_status: Mutex<Option<u16>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record directly, assigning an `objectId`. Returns the id.
    pub fn seed(&self, record: Value) -> String {
        let mut record = record.as_object().cloned().unwrap_or_default();
        let id = uuid::Uuid::new_v4().to_string();
        record.insert("objectId".to_string(), json!(id));
        self.records.lock().unwrap().push(record);
        id
    }

    pub fn record(&self, object_id: &str) -> Option<Map<String, Value>> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.get("objectId").and_then(Value::as_str) == Some(object_id))
            .cloned()
    }

    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_find_with(&self, status: u16) {
        *self.find_status.lock().unwrap() = Some(status);
    }

    pub fn fail_create_with(&self, status: u16) {
        *self.create_status.lock().unwrap() = Some(status);
    }

    pub fn fail_delete_with(&self, status: u16) {
        *self.delete_status.lock().unwrap() = Some(status);
    }

    fn track(&self, op: &'static str) {
        self.calls.lock().unwrap().push(op);
    }

    fn not_found(object_id: &str) -> TableResponse {
        TableResponse::new(
            404,
            json!({
                "code": 1000,
                "message": format!("Entity with ID {object_id} not found"),
            }),
        )
    }

    fn failure(status: u16) -> TableResponse {
        TableResponse::new(status, json!({"code": 0, "message": "simulated failure"}))
    }
}

#[async_trait]
impl UserTable for MemoryTable {
    async fn list(&self) -> Result<TableResponse, TableError> {
        self.track("list");
        let records = self.records.lock().unwrap().clone();
        Ok(TableResponse::new(200, json!(records)))
    }

    async fn find(&self, filter: &Filter) -> Result<TableResponse, TableError> {
        self.track("find");
        if let Some(status) = *self.find_status.lock().unwrap() {
            return Ok(Self::failure(status));
        }
        let matches: Vec<_> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.get(filter.field()).and_then(Value::as_str) == Some(filter.value()))
            .cloned()
            .collect();
        Ok(TableResponse::new(200, json!(matches)))
    }

    async fn get(&self, object_id: &str) -> Result<TableResponse, TableError> {
        self.track("get");
        Ok(match self.record(object_id) {
            Some(record) => TableResponse::new(200, Value::Object(record)),
            None => Self::not_found(object_id),
        })
    }

    async fn create(&self, record: &Value) -> Result<TableResponse, TableError> {
        self.track("create");
        if let Some(status) = *self.create_status.lock().unwrap() {
            return Ok(Self::failure(status));
        }
        let id = self.seed(record.clone());
        let stored = self.record(&id).unwrap_or_default();
        Ok(TableResponse::new(200, Value::Object(stored)))
    }

    async fn update(&self, object_id: &str, changes: &Value) -> Result<TableResponse, TableError> {
        self.track("update");
        let mut records = self.records.lock().unwrap();
        let Some(record) = records
            .iter_mut()
            .find(|r| r.get("objectId").and_then(Value::as_str) == Some(object_id))
        else {
            return Ok(Self::not_found(object_id));
        };
        if let Some(changes) = changes.as_object() {
            for (key, value) in changes {
                record.insert(key.clone(), value.clone());
            }
        }
        Ok(TableResponse::new(200, Value::Object(record.clone())))
    }

    async fn delete(&self, object_id: &str) -> Result<TableResponse, TableError> {
        self.track("delete");
        if let Some(status) = *self.delete_status.lock().unwrap() {
            return Ok(Self::failure(status));
        }
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.get("objectId").and_then(Value::as_str) != Some(object_id));
        if records.len() == before {
            return Ok(Self::not_found(object_id));
        }
        Ok(TableResponse::new(200, json!({"deletionTime": 1_761_400_000_000_u64})))
    }
}
