//! Adapter de almacenamiento en memoria (tests y demos).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use wizard_core::StorageAdapter;

#[derive(Debug, Default)]
pub struct MemoryStorageAdapter {
    inner: Mutex<HashMap<String, Value>>,
}

impl MemoryStorageAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copia del contenido actual (inspección en tests).
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.inner.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl StorageAdapter for MemoryStorageAdapter {
    async fn save_step(&self, step_id: &str, data: &Value) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.insert(step_id.to_string(), data.clone());
        }
    }

    async fn get_step(&self, step_id: &str) -> Option<Value> {
        self.inner.lock().ok()?.get(step_id).cloned()
    }

    async fn clear(&self) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.clear();
        }
    }
}
