use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Unidad de trabajo: clave estable + payload de entrada.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub key: String,
    pub payload: Value,
}

impl WorkItem {
    pub fn new(key: impl Into<String>, payload: Value) -> Self {
        Self { key: key.into(),
               payload }
    }
}
