//! Persistent key-value store boundary.
//!
//! # Responsibility
//! - Model the environment-provided string store (browser `localStorage`,
//!   or a SQLite table on native hosts) behind one small trait.
//! - Report unavailable stores and rejected writes as explicit errors.
//!
//! # Invariants
//! - A missing key is `Ok(None)`, never an error.
//! - A failed `set_item` leaves the previous value for that key untouched.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
#[cfg(not(target_arch = "wasm32"))]
mod sqlite;

pub use memory::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub use sqlite::SqliteKvStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a key-value store backend.
#[derive(Debug)]
pub enum StoreError {
    /// Store cannot be reached at all (disabled storage, missing window).
    Unavailable(String),
    /// Write refused because it would exceed the store's quota.
    QuotaExceeded {
        key: String,
        bytes: usize,
        quota: usize,
    },
    /// Backend rejected the operation for another reason.
    Rejected(String),
    #[cfg(not(target_arch = "wasm32"))]
    Db(crate::db::DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(details) => write!(f, "storage unavailable: {details}"),
            Self::QuotaExceeded { key, bytes, quota } => write!(
                f,
                "storage quota exceeded writing `{key}`: {bytes} bytes over quota {quota}"
            ),
            Self::Rejected(details) => write!(f, "storage write rejected: {details}"),
            #[cfg(not(target_arch = "wasm32"))]
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            #[cfg(not(target_arch = "wasm32"))]
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<crate::db::DbError> for StoreError {
    fn from(value: crate::db::DbError) -> Self {
        Self::Db(value)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(crate::db::DbError::Sqlite(value))
    }
}

/// String-keyed persistent store, shaped after the Web Storage API.
pub trait KeyValueStore {
    /// Reads the value stored under `key`.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes `key`. Removing a missing key succeeds.
    fn remove_item(&mut self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }
}
