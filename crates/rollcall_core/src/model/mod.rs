//! Domain model for student records.
//!
//! # Responsibility
//! - Define the record shape shared by the store, controller and UI boundary.
//! - Keep the form contract next to the data it guards.
//!
//! # Invariants
//! - Every record is identified by a stable `StudentId`.
//! - Deletion is a hard removal; no tombstones are kept.

pub mod student;
