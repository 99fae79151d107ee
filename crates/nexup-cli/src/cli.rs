//! CLI argument definitions for nexup.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use nexup_core::artifact::ArtifactDescription;

#[derive(Parser, Debug)]
#[command(
    name = "nexup",
    version,
    about = "Upload Maven artifacts and their checksums to Nexus",
    long_about = "nexup publishes build artifacts to a Nexus 2 or Nexus 3 repository manager. \
                  Every artifact is sent as three HTTP PUTs: its MD5 sidecar, its SHA-1 \
                  sidecar and the file itself."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload artifacts to a Nexus repository
    Upload(UploadCommand),
}

#[derive(Args, Debug)]
pub struct UploadCommand {
    /// Config file (defaults to ./Nexup.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Repository manager host, e.g. localhost:8081/nexus
    #[arg(long, env = "NEXUS_URL")]
    pub url: Option<String>,

    /// Repository manager flavour: nexus2 or nexus3
    #[arg(long, env = "NEXUS_VERSION")]
    pub nexus_version: Option<String>,

    /// Repository name, e.g. maven-releases
    #[arg(short, long)]
    pub repository: Option<String>,

    /// Maven group id, e.g. com.example
    #[arg(short, long)]
    pub group_id: Option<String>,

    /// Version shared by all uploaded artifacts
    #[arg(long = "artifacts-version")]
    pub version: Option<String>,

    /// Repository user
    #[arg(short, long, env = "NEXUS_USERNAME")]
    pub username: Option<String>,

    /// Repository password (or token when no user is given)
    #[arg(short, long, env = "NEXUS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// pom.xml to take group id and version from; it is uploaded as well
    #[arg(long)]
    pub pom: Option<PathBuf>,

    /// Artifact as id:type:file or id:type:file:classifier (repeatable)
    #[arg(short, long = "artifact", value_parser = parse_artifact)]
    pub artifacts: Vec<ArtifactDescription>,

    /// JSON file holding a list of artifact descriptions
    #[arg(long)]
    pub artifacts_json: Option<PathBuf>,

    /// Print the upload URLs without sending anything
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_artifact(s: &str) -> Result<ArtifactDescription, String> {
    ArtifactDescription::parse(s)
        .ok_or_else(|| format!("expected id:type:file[:classifier], got '{s}'"))
}

pub fn parse() -> Cli {
    Cli::parse()
}
