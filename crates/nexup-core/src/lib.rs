//! Core data types for nexup.
//!
//! This crate defines the artifact description shared by every layer and the
//! `Nexup.toml` configuration model. It does no network I/O.

pub mod artifact;
pub mod config;
