//! Mock resource client for tests.
//!
//! Records every call and hands out incrementing server ids so orchestration
//! tests can assert call order, call counts, and short-circuit behavior
//! without a network.

use super::{ApiFailure, ApiResult, ResourceClient};
use serde_json::Value;
use std::collections::BTreeMap;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

/// One observed call against the mock.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static str,
    pub resource: String,
    pub body: Value,
}

/// Configurable in-memory resource client.
#[derive(Default)]
pub struct MockResourceClient {
    calls: Mutex<Vec<RecordedCall>>,
    failures: Mutex<BTreeMap<String, VecDeque<ApiFailure>>>,
    next_id: AtomicI64,
}

impl MockResourceClient {
    /// Create a mock that succeeds on every call.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(0),
        }
    }

    /// Queue a scripted failure for the next call against `resource`.
    pub fn with_failure(self, resource: &str, message: &str) -> Self {
        self.queue_failure(resource, ApiFailure::new(message));
        self
    }

    /// Queue a scripted failure (non-consuming form).
    pub fn queue_failure(&self, resource: &str, failure: ApiFailure) {
        self.failures
            .lock()
            .expect("mock failures lock")
            .entry(resource.to_string())
            .or_default()
            .push_back(failure);
    }

    /// Total number of calls observed.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock calls lock").len()
    }

    /// Number of calls observed against one resource.
    pub fn calls_for(&self, resource: &str) -> usize {
        self.calls
            .lock()
            .expect("mock calls lock")
            .iter()
            .filter(|call| call.resource == resource)
            .count()
    }

    /// Snapshot of every observed call, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("mock calls lock").clone()
    }

    /// Resources hit by create calls, in order.
    pub fn created_resources(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("mock calls lock")
            .iter()
            .filter(|call| call.method == "create")
            .map(|call| call.resource.clone())
            .collect()
    }

    fn record(&self, method: &'static str, resource: &str, body: Value) {
        self.calls.lock().expect("mock calls lock").push(RecordedCall {
            method,
            resource: resource.to_string(),
            body,
        });
    }

    fn scripted_failure(&self, resource: &str) -> Option<ApiFailure> {
        self.failures
            .lock()
            .expect("mock failures lock")
            .get_mut(resource)
            .and_then(VecDeque::pop_front)
    }

    fn assign_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl ResourceClient for MockResourceClient {
    fn create(&self, resource: &str, body: &Value) -> ApiResult {
        self.record("create", resource, body.clone());
        if let Some(failure) = self.scripted_failure(resource) {
            return Err(failure);
        }
        let id = self.assign_id();
        let mut record = match body {
            Value::Object(map) => map.clone(),
            other => {
                let mut map = serde_json::Map::new();
                map.insert("payload".to_string(), other.clone());
                map
            }
        };
        record.insert("id".to_string(), Value::from(id));
        Ok(Value::Object(record))
    }

    fn get_by_id(&self, resource: &str, id: i64) -> ApiResult {
        self.record("get", resource, Value::from(id));
        if let Some(failure) = self.scripted_failure(resource) {
            return Err(failure);
        }
        Ok(serde_json::json!({ "id": id }))
    }

    fn update(&self, resource: &str, id: i64, body: &Value) -> ApiResult {
        self.record("update", resource, body.clone());
        if let Some(failure) = self.scripted_failure(resource) {
            return Err(failure);
        }
        let mut record = match body {
            Value::Object(map) => map.clone(),
            other => {
                let mut map = serde_json::Map::new();
                map.insert("payload".to_string(), other.clone());
                map
            }
        };
        record.insert("id".to_string(), Value::from(id));
        Ok(Value::Object(record))
    }
}
