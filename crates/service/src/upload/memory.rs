use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::store::ObjectStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// Process-local store for tests and local development.
pub struct InMemoryObjectStore {
    base_url: String,
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl InMemoryObjectStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), objects: Mutex::new(HashMap::new()) }
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().ok().and_then(|m| m.get(key).cloned())
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().map(|m| m.keys().cloned().collect()).unwrap_or_default()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put_object(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), String> {
        let mut objects = self.objects.lock().map_err(|_| "object map lock poisoned".to_string())?;
        objects.insert(key.to_string(), StoredObject { body, content_type: content_type.to_string() });
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}
