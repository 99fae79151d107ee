//! High-level operations wiring CLI commands to the upload session.

pub mod ops_upload;
