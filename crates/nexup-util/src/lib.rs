//! Shared utilities for nexup.
//!
//! This crate provides cross-cutting concerns used by all other nexup crates:
//! the unified error type, filesystem helpers, checksum hashing, and terminal
//! progress indicators.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod progress;
