pub mod json_backend;
pub mod memory;

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::{Result, SpendError};

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

/// Synchronous string key-value persistence. Each key is independent; no
/// cross-key atomicity is promised.
pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// The four records the application persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Profile,
    Transactions,
    Settings,
    CustomCategories,
}

impl StorageKey {
    pub const ALL: [StorageKey; 4] = [
        StorageKey::Profile,
        StorageKey::Transactions,
        StorageKey::Settings,
        StorageKey::CustomCategories,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::Profile => "spendwise_user",
            StorageKey::Transactions => "spendwise_tx",
            StorageKey::Settings => "spendwise_settings",
            StorageKey::CustomCategories => "spendwise_cats",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of reading one record.
#[derive(Debug)]
pub enum Loaded<T> {
    Present(T),
    Absent,
    /// The stored text did not decode; callers treat it as absent.
    Corrupt(SpendError),
}

impl<T> Loaded<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Loaded::Present(value) => Some(value),
            Loaded::Absent | Loaded::Corrupt(_) => None,
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Loaded::Corrupt(_))
    }
}

/// Reads and decodes a record, failing closed on malformed data.
pub fn load_record<T, S>(store: &S, key: StorageKey) -> Result<Loaded<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.load(key.as_str())? else {
        return Ok(Loaded::Absent);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Loaded::Present(value)),
        Err(err) => {
            tracing::warn!(key = %key, error = %err, "discarding malformed record");
            Ok(Loaded::Corrupt(SpendError::CorruptState {
                key: key.to_string(),
                reason: err.to_string(),
            }))
        }
    }
}

/// Serializes a record and writes it under `key`.
pub fn save_record<T, S>(store: &S, key: StorageKey, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.save(key.as_str(), &json)
}

pub fn remove_record<S>(store: &S, key: StorageKey) -> Result<()>
where
    S: KeyValueStore + ?Sized,
{
    store.remove(key.as_str())
}
