//! Core domain logic for Rollcall, a student record manager.
//! This crate is the single source of truth for record-store invariants.

pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::RollcallConfig;
pub use logging::default_log_level;
#[cfg(not(target_arch = "wasm32"))]
pub use logging::{init_logging, logging_status};
pub use model::student::{Student, StudentFields, StudentId, StudentValidationError};
pub use repo::student_repo::{
    deserialize_students, serialize_students, KvStudentRepository, StudentRepository,
    STUDENTS_STORAGE_KEY,
};
pub use repo::{RepoError, RepoResult};
pub use service::record_controller::{ControllerError, EditState, RecordController};
#[cfg(not(target_arch = "wasm32"))]
pub use store::SqliteKvStore;
pub use store::{KeyValueStore, MemoryStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
