use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactDescription;

/// Default name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "Nexup.toml";

/// Upload configuration loaded from `Nexup.toml`.
///
/// Every field is optional so that command-line flags can fill in or
/// override any part of it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub artifacts: ArtifactsConfig,
}

/// Repository manager connection settings from `[server]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "nexus-version")]
    pub nexus_version: Option<String>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default, rename = "group-id")]
    pub group_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: None,
            nexus_version: None,
            repository: None,
            group_id: None,
            username: None,
            password: None,
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    120
}

/// What to publish, from `[artifacts]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    #[serde(default)]
    pub version: Option<String>,
    /// A pom.xml to read coordinates from and publish alongside the files.
    #[serde(default)]
    pub pom: Option<PathBuf>,
    #[serde(default)]
    pub files: Vec<ArtifactDescription>,
}

impl UploadConfig {
    /// Load and parse a config file.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            nexup_util::errors::NexusError::Config {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        Self::parse(&content)
    }

    /// Parse config from TOML text.
    pub fn parse(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            nexup_util::errors::NexusError::Config {
                message: format!("Failed to parse config: {e}"),
            }
            .into()
        })
    }

    /// Load `Nexup.toml` from `dir` if present, otherwise defaults.
    pub fn load_or_default(dir: &Path) -> miette::Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::from_path(&path)
        } else {
            Ok(Self::default())
        }
    }
}
