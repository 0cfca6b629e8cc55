//! Browser boundary for Rollcall.
//!
//! `api` is plain Rust and testable natively; `local_storage` and `bindings`
//! only exist on `wasm32` targets.

pub mod api;
#[cfg(target_arch = "wasm32")]
mod bindings;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

pub use api::{StudentActionResponse, StudentSession};
#[cfg(target_arch = "wasm32")]
pub use bindings::{init_logging, WebStudentApp};
