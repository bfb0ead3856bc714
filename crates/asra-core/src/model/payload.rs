//! Payloads tipados por item.
//!
//! `PayloadSpec` describe la forma de un payload concreto que viaja dentro de
//! un artifact; el core sólo ve `serde_json::Value`.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::errors::ItemTransformError;

/// Payload con forma conocida y validación ligera.
pub trait PayloadSpec: Serialize + DeserializeOwned {
    /// Validación semántica (sin efectos secundarios).
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// Serializa a JSON neutro tras validar.
    fn into_payload(self) -> Result<Value, ItemTransformError> {
        self.validate().map_err(ItemTransformError::NonConforming)?;
        serde_json::to_value(&self).map_err(|e| ItemTransformError::NonConforming(e.to_string()))
    }

    /// Decodifica desde JSON neutro (sin validar).
    fn from_payload(value: &Value) -> Result<Self, ItemTransformError> {
        serde_json::from_value(value.clone()).map_err(|e| ItemTransformError::Decode(e.to_string()))
    }
}

impl PayloadSpec for String {
    fn validate(&self) -> Result<(), String> {
        if self.trim().is_empty() { Err("empty string".into()) } else { Ok(()) }
    }
}

impl PayloadSpec for Value {}

/// Un payload "vacío" cuenta como fallo del item: `null`, `false`, `0`,
/// `""`, `[]` y `{}`.
pub fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
