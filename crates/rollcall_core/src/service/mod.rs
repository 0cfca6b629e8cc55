//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into session-level APIs.
//! - Keep UI layers decoupled from storage details.

pub mod record_controller;
