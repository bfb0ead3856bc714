use dashmap::DashMap;

use super::ArtifactStore;
use crate::errors::StoreError;
use crate::model::{ArtifactMap, ArtifactName};

/// Store en memoria. Guarda los artifacts serializados, igual que lo haría el
/// store de ficheros, para que `load` ejercite la misma decodificación.
#[derive(Debug, Default)]
pub struct InMemoryArtifactStore {
    documents: DashMap<String, Vec<u8>>,
    blobs: DashMap<String, Vec<u8>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserta bytes arbitrarios bajo `name` (útil para simular ficheros corruptos).
    pub fn put_raw(&self, name: &ArtifactName, bytes: impl Into<Vec<u8>>) {
        self.documents.insert(name.as_str().to_string(), bytes.into());
    }

    /// Bytes tal y como quedaron escritos.
    pub fn raw(&self, name: &ArtifactName) -> Option<Vec<u8>> {
        self.documents.get(name.as_str()).map(|v| v.value().clone())
    }

    pub fn blob(&self, relative_path: &str) -> Option<Vec<u8>> {
        self.blobs.get(relative_path).map(|v| v.value().clone())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl ArtifactStore for InMemoryArtifactStore {
    fn load(&self, name: &ArtifactName) -> Result<ArtifactMap, StoreError> {
        let bytes = self.documents
                        .get(name.as_str())
                        .map(|v| v.value().clone())
                        .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        serde_json::from_slice::<ArtifactMap>(&bytes).map_err(|e| StoreError::Format { name: name.to_string(),
                                                                                        detail: e.to_string() })
    }

    fn save(&self, name: &ArtifactName, artifact: &ArtifactMap) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(artifact).map_err(|e| StoreError::Io { name: name.to_string(),
                                                                                     detail: e.to_string() })?;
        self.documents.insert(name.as_str().to_string(), bytes);
        Ok(())
    }

    fn exists(&self, name: &ArtifactName) -> bool {
        self.documents.contains_key(name.as_str())
    }

    fn write_blob(&self, relative_path: &str, bytes: &[u8]) -> Result<String, StoreError> {
        self.blobs.insert(relative_path.to_string(), bytes.to_vec());
        Ok(relative_path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn load_missing_is_not_found() {
        let store = InMemoryArtifactStore::new();
        let err = store.load(&ArtifactName::from_static("nope.json")).unwrap_err();
        assert_eq!(err, StoreError::NotFound("nope.json".into()));
    }

    #[test]
    fn load_non_object_is_format_error() {
        let store = InMemoryArtifactStore::new();
        let name = ArtifactName::from_static("list.json");
        store.put_raw(&name, "[1, 2, 3]");
        assert!(matches!(store.load(&name), Err(StoreError::Format { .. })));
        store.put_raw(&name, "{\"a\": 1");
        assert!(matches!(store.load(&name), Err(StoreError::Format { .. })));
    }

    #[test]
    fn save_replaces_instead_of_merging() {
        let store = InMemoryArtifactStore::new();
        let name = ArtifactName::from_static("a.json");
        let mut first = ArtifactMap::new();
        first.insert("x".into(), json!(1));
        first.insert("y".into(), json!(2));
        store.save(&name, &first).unwrap();

        let mut second = ArtifactMap::new();
        second.insert("z".into(), json!(3));
        store.save(&name, &second).unwrap();

        let loaded = store.load(&name).unwrap();
        assert_eq!(loaded.keys().collect::<Vec<_>>(), vec!["z"]);
    }
}
