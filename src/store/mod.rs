//! Persistence port.
//!
//! Every collection lives under one logical key as a serialized text blob. Reads return
//! absent-or-default and writes overwrite the whole value.

#[cfg(test)]
mod memory;
mod sqlite;

#[cfg(test)]
pub use memory::MemoryStore;
pub use sqlite::{init_database, SqliteStore};

use std::future::Future;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::AppError;

/// Logical keys of the key-value store.
pub mod keys {
    pub const STREAMS: &str = "streams";
    pub const GOALS: &str = "goals";
    pub const IDEAS: &str = "ideas";
    pub const GROWTH_HISTORY: &str = "growthHistory";
    pub const THEME: &str = "theme";
}

/// Key-value persistence port used by every tracker.
pub trait KvStore: Send + Sync + 'static {
    /// Read the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, AppError>> + Send;

    /// Overwrite the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// Load a JSON blob, falling back to the default when absent or unreadable.
pub async fn load_json<S, T>(store: &S, key: &str) -> Result<T, AppError>
where
    S: KvStore,
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(T::default());
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Stored value is unreadable, treating it as empty");
            Ok(T::default())
        }
    }
}

/// Serialize `value` as JSON and overwrite `key` with it.
pub async fn save_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), AppError>
where
    S: KvStore,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_missing_key_is_default() {
        let store = MemoryStore::new();
        let values: Vec<u64> = load_json(&store, "nothing").await.unwrap();
        assert!(values.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupted_value_is_default() {
        let store = MemoryStore::new();
        store.set(keys::GOALS, "{not json").await.unwrap();

        let values: Vec<u64> = load_json(&store, keys::GOALS).await.unwrap();
        assert!(values.is_empty());

        store.set(keys::GOALS, "null").await.unwrap();
        let values: Vec<u64> = load_json(&store, keys::GOALS).await.unwrap();
        assert!(values.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryStore::new();
        save_json(&store, keys::IDEAS, &vec![1u64, 2, 3]).await.unwrap();

        assert_eq!(
            store.get(keys::IDEAS).await.unwrap().as_deref(),
            Some("[1,2,3]")
        );
        let values: Vec<u64> = load_json(&store, keys::IDEAS).await.unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }
}
