use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all nexup operations.
#[derive(Debug, Error, Diagnostic)]
pub enum NexusError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration parameter or artifact description was rejected.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Upload attempted before a required configuration call.
    #[error("the upload session needs to be configured by calling {step} first")]
    #[diagnostic(help("Pass the missing value on the command line or in Nexup.toml"))]
    NotConfigured { step: &'static str },

    /// Upload attempted with nothing registered.
    #[error("no artifacts to upload, call add_artifact() or add_artifacts_from_json() first")]
    #[diagnostic(help("Use --artifact, --artifacts-json, --pom or [[artifacts.files]]"))]
    NoArtifacts,

    /// A PUT request failed or was rejected by the server.
    #[error("Upload of {url} failed: {message}")]
    Upload { url: String, message: String },

    /// The local artifact file could not be read.
    #[error("Failed to read artifact file {}: {source}", path.display())]
    ReadArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A pom.xml could not be parsed or lacks required coordinates.
    #[error("POM error: {message}")]
    Pom { message: String },

    /// Invalid or unreadable configuration file.
    #[error("Config error: {message}")]
    #[diagnostic(help("Check your Nexup.toml for syntax errors"))]
    Config { message: String },

    /// HTTP client setup failed.
    #[error("Network error: {message}")]
    Network { message: String },
}

impl NexusError {
    /// Shorthand for a [`NexusError::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Result alias used by the library crates.
pub type NexusResult<T> = Result<T, NexusError>;
