//! Nexus repository layout: base URLs and per-artifact upload URLs.

use std::str::FromStr;

use nexup_util::errors::{NexusError, NexusResult};

/// The two URL conventions a Nexus repository manager uses for Maven
/// repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NexusVersion {
    Nexus2,
    Nexus3,
}

impl NexusVersion {
    /// Path segment between the host and the repository name.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Nexus2 => "content/repositories",
            Self::Nexus3 => "repository",
        }
    }
}

impl FromStr for NexusVersion {
    type Err = NexusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nexus2" => Ok(Self::Nexus2),
            "nexus3" => Ok(Self::Nexus3),
            other => Err(NexusError::validation(format!(
                "unsupported nexus version '{other}', expected 'nexus2' or 'nexus3'"
            ))),
        }
    }
}

impl std::fmt::Display for NexusVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nexus2 => f.write_str("nexus2"),
            Self::Nexus3 => f.write_str("nexus3"),
        }
    }
}

/// Group path for a Maven group id.
///
/// `org.jetbrains.kotlinx` becomes `org/jetbrains/kotlinx`
pub fn group_path(group_id: &str) -> String {
    group_id.replace('.', "/")
}

/// Base URL for all artifacts of a group in one repository, always ending
/// in `/`.
///
/// ```text
/// nexus2: <host>/content/repositories/<repository>/<group/path>/
/// nexus3: <host>/repository/<repository>/<group/path>/
/// ```
pub fn base_url(
    host: &str,
    nexus_version: &str,
    repository: &str,
    group_id: &str,
) -> NexusResult<String> {
    if host.is_empty() {
        return Err(NexusError::validation("host must not be empty"));
    }
    let nexus_version: NexusVersion = nexus_version.parse()?;
    if repository.is_empty() {
        return Err(NexusError::validation("repository must not be empty"));
    }
    if group_id.is_empty() {
        return Err(NexusError::validation("group id must not be empty"));
    }

    Ok(format!(
        "{host}/{}/{repository}/{}/",
        nexus_version.path_segment(),
        group_path(group_id)
    ))
}

/// Full upload URL of one artifact file below `base_url`.
///
/// `http://` is prepended unless the base URL already carries a scheme.
pub fn artifact_url(base_url: &str, artifact_id: &str, version: &str, file_name: &str) -> String {
    let scheme = if has_scheme(base_url) { "" } else { "http://" };
    format!("{scheme}{base_url}{artifact_id}/{version}/{file_name}")
}

fn has_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len()).is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}
