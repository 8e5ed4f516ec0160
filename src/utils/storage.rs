// ============================================================================
// STORAGE - Puerto clave/valor para persistencia durable
// ============================================================================
// LocalStorage en el navegador, MemoryStorage como fallback y para tests
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};
use web_sys::{window, Storage};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("No se pudo acceder a localStorage")]
    Unavailable,
    #[error("Error guardando '{0}' en storage")]
    Write(String),
    #[error("Error serializando datos: {0}")]
    Serialize(String),
    #[error("Datos corruptos en '{key}': {reason}")]
    Corrupt { key: String, reason: String },
}

/// Persistencia clave/valor de strings
pub trait StoragePort {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// localStorage del navegador
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Abrir localStorage; `None` si el navegador no lo expone (modo privado, SSR)
    pub fn open() -> Option<Self> {
        let storage = window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl StoragePort for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|_| StorageError::Unavailable)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|_| StorageError::Write(key.to_string()))
    }
}

/// Storage en memoria (no sobrevive a un reload)
#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

pub fn save_json<T: Serialize>(
    storage: &dyn StoragePort,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|e| StorageError::Serialize(e.to_string()))?;
    storage.set(key, &json)
}

pub fn load_json<T: DeserializeOwned>(
    storage: &dyn StoragePort,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match storage.get(key)? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}
