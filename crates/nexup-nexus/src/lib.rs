//! Nexus repository protocol: repository URL layout, POM coordinates,
//! checksum sidecars, the HTTP transport seam and the upload session.

pub mod auth;
pub mod checksum;
pub mod client;
pub mod pom;
pub mod repository;
pub mod transport;
pub mod upload;
