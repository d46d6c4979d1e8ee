//! Persistent key-value storage for auth tokens
//!
//! In the browser tokens live in `localStorage` under two fixed keys. Tests and
//! the server render use the in-memory backend.

use std::collections::HashMap;
use std::sync::Mutex;

/// Storage key for the access token
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Storage key for the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Minimal string key-value store
pub trait TokenStorage: Send + Sync + 'static {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), String>;

    fn remove(&self, key: &str) -> Result<(), String>;
}

/// Process-local storage backed by a map
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.entries
            .lock()
            .map_err(|_| "storage lock poisoned".to_string())?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.entries
            .lock()
            .map_err(|_| "storage lock poisoned".to_string())?
            .remove(key);
        Ok(())
    }
}

impl<T: TokenStorage> TokenStorage for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        (**self).remove(key)
    }
}

/// Browser `localStorage`.
///
/// The `Storage` handle is looked up on every call so the type stays `Send`.
#[cfg(not(feature = "ssr"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

#[cfg(not(feature = "ssr"))]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, String> {
        let window = web_sys::window().ok_or("No window available")?;
        window
            .local_storage()
            .map_err(|_| "Failed to get localStorage".to_string())?
            .ok_or_else(|| "localStorage not available".to_string())
    }
}

#[cfg(not(feature = "ssr"))]
impl TokenStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| format!("Failed to set {key}"))
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        Self::storage()?
            .remove_item(key)
            .map_err(|_| format!("Failed to remove {key}"))
    }
}

/// Storage used by the running application
#[cfg(not(feature = "ssr"))]
pub type AppStorage = LocalStorage;

/// Storage used by the running application
#[cfg(feature = "ssr")]
pub type AppStorage = MemoryStorage;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert!(storage.get(ACCESS_TOKEN_KEY).is_none());

        storage.set(ACCESS_TOKEN_KEY, "t1").unwrap();
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).as_deref(), Some("t1"));

        storage.set(ACCESS_TOKEN_KEY, "t2").unwrap();
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).as_deref(), Some("t2"));
        assert_eq!(storage.len(), 1);

        storage.remove(ACCESS_TOKEN_KEY).unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_removing_missing_key_is_ok() {
        let storage = MemoryStorage::new();
        assert!(storage.remove(REFRESH_TOKEN_KEY).is_ok());
    }

    #[test]
    fn test_shared_storage_through_arc() {
        let storage = std::sync::Arc::new(MemoryStorage::new());
        let handle = storage.clone();
        handle.set(REFRESH_TOKEN_KEY, "r").unwrap();
        assert_eq!(storage.get(REFRESH_TOKEN_KEY).as_deref(), Some("r"));
    }
}
