//! The upload session: configure, register artifacts, then PUT them.
//!
//! A session is filled in two phases. [`Upload::set_base_url`] and
//! [`Upload::set_artifacts_version`] configure where artifacts go, and
//! [`Upload::add_artifact`] registers what goes there. [`Upload::upload`]
//! then sends, for every artifact in registration order:
//!
//! ```text
//! PUT <url>.md5   md5 hex digest
//! PUT <url>.sha1  sha1 hex digest
//! PUT <url>       file contents
//! ```
//!
//! The first failed request ends the run. Nothing is rolled back and the
//! registered artifacts are left untouched, so calling `upload` again
//! re-sends everything.

use reqwest::header::HeaderMap;
use reqwest::Method;

use nexup_core::artifact::ArtifactDescription;
use nexup_util::errors::{NexusError, NexusResult};

use crate::checksum::{self, Checksums};
use crate::repository;
use crate::transport::{ClientOptions, Sender};

/// A registered artifact together with the URL it will be uploaded to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUpload {
    pub artifact: ArtifactDescription,
    pub url: String,
}

/// Collects the parameters and artifacts of one Nexus upload.
#[derive(Debug, Clone, Default)]
pub struct Upload {
    base_url: String,
    version: String,
    artifacts: Vec<ArtifactDescription>,
}

impl Upload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the connection parameters and store the derived base URL.
    ///
    /// `nexus_version` must be `"nexus2"` or `"nexus3"`. On error the
    /// previous base URL is kept.
    pub fn set_base_url(
        &mut self,
        host: &str,
        nexus_version: &str,
        repository: &str,
        group_id: &str,
    ) -> NexusResult<()> {
        self.base_url = repository::base_url(host, nexus_version, repository, group_id)?;
        Ok(())
    }

    pub fn set_artifacts_version(&mut self, version: &str) -> NexusResult<()> {
        if version.is_empty() {
            return Err(NexusError::validation("artifacts version must not be empty"));
        }
        self.version = version.to_string();
        Ok(())
    }

    /// Empty until [`set_base_url`](Self::set_base_url) succeeded.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Empty until [`set_artifacts_version`](Self::set_artifacts_version) succeeded.
    pub fn artifacts_version(&self) -> &str {
        &self.version
    }

    /// Register an artifact. Adding an id that is already registered is a
    /// no-op and keeps the first description.
    pub fn add_artifact(&mut self, artifact: ArtifactDescription) -> NexusResult<()> {
        if artifact.id.is_empty() {
            return Err(NexusError::validation("artifact id must not be empty"));
        }
        if artifact.file.as_os_str().is_empty() {
            return Err(NexusError::validation(format!(
                "artifact '{}' has no file",
                artifact.id
            )));
        }
        if self.artifacts.iter().any(|a| a.id == artifact.id) {
            return Ok(());
        }
        self.artifacts.push(artifact);
        Ok(())
    }

    /// Register every entry of a JSON array of artifact descriptions, in
    /// order. Stops at the first invalid entry; earlier entries stay
    /// registered.
    pub fn add_artifacts_from_json(&mut self, json: &str) -> NexusResult<()> {
        let artifacts: Vec<ArtifactDescription> = serde_json::from_str(json)
            .map_err(|e| NexusError::validation(format!("invalid artifact list: {e}")))?;
        for artifact in artifacts {
            self.add_artifact(artifact)?;
        }
        Ok(())
    }

    /// A copy of the registered artifacts, in registration order.
    pub fn artifacts(&self) -> Vec<ArtifactDescription> {
        self.artifacts.clone()
    }

    pub fn artifact_count(&self) -> usize {
        self.artifacts.len()
    }

    /// Upload URL of one artifact under the configured base URL and version.
    pub fn upload_url(&self, artifact: &ArtifactDescription) -> String {
        repository::artifact_url(
            &self.base_url,
            &artifact.id,
            &self.version,
            &artifact.remote_file_name(&self.version),
        )
    }

    /// Where every registered artifact would go, after the same checks
    /// [`upload_artifacts`](Self::upload_artifacts) makes. Sends nothing.
    pub fn planned_uploads(&self) -> NexusResult<Vec<PlannedUpload>> {
        self.check_ready()?;
        Ok(self
            .artifacts
            .iter()
            .map(|artifact| PlannedUpload {
                artifact: artifact.clone(),
                url: self.upload_url(artifact),
            })
            .collect())
    }

    /// Pass credentials to the transport, then upload all artifacts.
    pub fn upload(&self, transport: &mut dyn Sender, options: ClientOptions) -> NexusResult<()> {
        transport.set_options(options);
        self.upload_artifacts(transport)
    }

    /// Upload all registered artifacts with their checksums, stopping at the
    /// first failure.
    pub fn upload_artifacts(&self, transport: &mut dyn Sender) -> NexusResult<()> {
        self.check_ready()?;

        for artifact in &self.artifacts {
            let url = self.upload_url(artifact);
            let data = nexup_util::fs::read_file(&artifact.file)?;
            let sums = Checksums::compute(&data);

            put(transport, &checksum::md5_url(&url), sums.md5.into_bytes())?;
            put(transport, &checksum::sha1_url(&url), sums.sha1.into_bytes())?;
            put(transport, &url, data)?;
        }
        Ok(())
    }

    fn check_ready(&self) -> NexusResult<()> {
        if self.base_url.is_empty() {
            return Err(NexusError::NotConfigured {
                step: "set_base_url()",
            });
        }
        if self.version.is_empty() {
            return Err(NexusError::NotConfigured {
                step: "set_artifacts_version()",
            });
        }
        if self.artifacts.is_empty() {
            return Err(NexusError::NoArtifacts);
        }
        Ok(())
    }
}

fn put(transport: &mut dyn Sender, url: &str, body: Vec<u8>) -> NexusResult<()> {
    let response = transport
        .send_request(Method::PUT, url, body, &HeaderMap::new())
        .map_err(|e| NexusError::Upload {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    if !response.status.is_success() {
        return Err(NexusError::Upload {
            url: url.to_string(),
            message: format!("HTTP {}", response.status),
        });
    }
    Ok(())
}
