//! Adapter de almacenamiento respaldado por un único documento JSON en
//! disco: un objeto top-level con una clave por `step_id` (más la clave
//! reservada de metadata).
//!
//! Contrato del adapter: infalible hacia el motor. Los fallos de IO o de
//! parseo se loguean con tag y se degradan (lectura vacía / escritura
//! perdida); el coordinador no reintenta.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use wizard_core::StorageAdapter;

pub struct JsonFileStorageAdapter {
    path: PathBuf,
    // serializa lecturas-modificaciones-escrituras concurrentes del documento
    lock: Mutex<()>,
}

impl JsonFileStorageAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    async fn read_document(&self) -> Map<String, Value> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice::<Value>(&bytes) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    eprintln!("[persist][file] {} is not a JSON object, starting empty", self.path.display());
                    Map::new()
                }
                Err(e) => {
                    eprintln!("[persist][file] parse failed for {}: {e}", self.path.display());
                    Map::new()
                }
            },
            // archivo inexistente: sesión nueva
            Err(_) => Map::new(),
        }
    }

    async fn write_document(&self, document: &Map<String, Value>) {
        let payload = match serde_json::to_vec_pretty(&Value::Object(document.clone())) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("[persist][file] serialization failed: {e}");
                return;
            }
        };
        if let Err(e) = tokio::fs::write(&self.path, payload).await {
            eprintln!("[persist][file] write failed for {}: {e}", self.path.display());
        }
    }
}

#[async_trait]
impl StorageAdapter for JsonFileStorageAdapter {
    async fn save_step(&self, step_id: &str, data: &Value) {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await;
        document.insert(step_id.to_string(), data.clone());
        self.write_document(&document).await;
    }

    async fn get_step(&self, step_id: &str) -> Option<Value> {
        let _guard = self.lock.lock().await;
        self.read_document().await.remove(step_id)
    }

    async fn clear(&self) {
        let _guard = self.lock.lock().await;
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                eprintln!("[persist][file] clear failed for {}: {e}", self.path.display());
            }
        }
    }
}
