//! Artifact: documento JSON nombrado, mapa `key -> payload`.
//!
//! - El orden de inserción se conserva (`IndexMap`) para que dos ejecuciones
//!   deterministas serialicen exactamente los mismos bytes.
//! - El orden no tiene semántica: el fingerprint se calcula sobre el JSON
//!   canónico.
use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::hashing::hash_value;

/// Contenido de un artifact.
pub type ArtifactMap = IndexMap<String, Value>;

/// Nombre (ruta relativa al directorio de outputs) de un artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactName(Cow<'static, str>);

impl ArtifactName {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&'static str> for ArtifactName {
    fn from(value: &'static str) -> Self {
        Self::from_static(value)
    }
}

/// Hash canónico del contenido completo de un artifact.
pub fn artifact_fingerprint(map: &ArtifactMap) -> String {
    let obj: serde_json::Map<String, Value> = map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    hash_value(&Value::Object(obj))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fingerprint_ignores_insertion_order() {
        let mut a = ArtifactMap::new();
        a.insert("PaperA".into(), json!({"x": 1}));
        a.insert("PaperB".into(), json!({"x": 2}));
        let mut b = ArtifactMap::new();
        b.insert("PaperB".into(), json!({"x": 2}));
        b.insert("PaperA".into(), json!({"x": 1}));
        assert_eq!(artifact_fingerprint(&a), artifact_fingerprint(&b));
    }

    #[test]
    fn empty_artifact_has_stable_fingerprint() {
        assert_eq!(artifact_fingerprint(&ArtifactMap::new()), hash_value(&json!({})));
    }
}
