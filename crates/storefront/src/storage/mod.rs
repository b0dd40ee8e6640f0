//! Durable key-value storage for persisted store state.
//!
//! Both stores snapshot their state into a [`Storage`] backend after every
//! change and read it back once at startup:
//!
//! - `shopfront.cart` - JSON array of cart lines
//! - `shopfront.user` - JSON object for the signed-in identity
//!
//! Absence of a key means "no prior state". A record that cannot be parsed
//! or fails validation is corrupt: it is logged, removed, and treated as
//! absent (see [`load_or_discard`]).
//!
//! # Backends
//!
//! - [`MemoryStorage`] - in-process map, for tests and throwaway sessions
//! - [`FileStorage`] - one JSON file per key, written atomically

mod file;
mod memory;

use std::fmt::Display;
use std::io;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backend failed.
    #[error("storage I/O error for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    /// A persisted record is malformed.
    #[error("corrupt persisted state under {key}: {reason}")]
    Corrupt { key: String, reason: String },

    /// A value could not be encoded.
    #[error("failed to serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The key contains characters the backend cannot store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

impl StorageError {
    /// Whether this error is the corrupt-record condition.
    #[must_use]
    pub const fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}

/// A durable string key-value store.
///
/// Implementations must be safe to share between the cart and session
/// stores.
pub trait Storage: Send + Sync {
    /// Read the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Serialize `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns `StorageError::Serialize` if encoding fails, or the backend's
/// error if the write fails.
pub fn save_json<T: Serialize + ?Sized>(
    storage: &dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_owned(),
        source,
    })?;
    storage.set(key, &json)
}

/// Read and parse the JSON record under `key`.
///
/// # Errors
///
/// Returns `StorageError::Corrupt` if the record is not valid JSON for `T`,
/// or the backend's error if the read fails.
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StorageError::Corrupt {
            key: key.to_owned(),
            reason: e.to_string(),
        })
}

/// Rehydrate a record, discarding it if it is corrupt.
///
/// Parse failures and `validate` failures are logged, the record is removed
/// from `storage`, and `None` is returned. Backend read failures are logged
/// and also yield `None`, but leave the record in place.
pub fn load_or_discard<T, E, F>(storage: &dyn Storage, key: &str, validate: F) -> Option<T>
where
    T: DeserializeOwned,
    E: Display,
    F: FnOnce(&T) -> Result<(), E>,
{
    let result = load_json::<T>(storage, key).and_then(|value| match value {
        Some(value) => match validate(&value) {
            Ok(()) => Ok(Some(value)),
            Err(e) => Err(StorageError::Corrupt {
                key: key.to_owned(),
                reason: e.to_string(),
            }),
        },
        None => Ok(None),
    });

    match result {
        Ok(value) => value,
        Err(e) if e.is_corrupt() => {
            tracing::warn!(key, error = %e, "discarding corrupt persisted state");
            if let Err(e) = storage.remove(key) {
                tracing::warn!(key, error = %e, "failed to remove corrupt record");
            }
            None
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read persisted state");
            None
        }
    }
}
