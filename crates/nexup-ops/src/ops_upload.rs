//! Operation: publish artifacts to a Nexus repository.

use std::path::{Path, PathBuf};
use std::time::Duration;

use nexup_core::artifact::ArtifactDescription;
use nexup_core::config::UploadConfig;
use nexup_nexus::client::HttpClient;
use nexup_nexus::pom;
use nexup_nexus::transport::{ClientOptions, Sender};
use nexup_nexus::upload::{PlannedUpload, Upload};
use nexup_util::errors::NexusError;
use nexup_util::fs::resolve_against;

/// Values given on the command line. Each one overrides the matching
/// `Nexup.toml` entry.
#[derive(Debug, Clone, Default)]
pub struct UploadArgs {
    pub config: Option<PathBuf>,
    pub url: Option<String>,
    pub nexus_version: Option<String>,
    pub repository: Option<String>,
    pub group_id: Option<String>,
    pub version: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub pom: Option<PathBuf>,
    pub artifacts: Vec<ArtifactDescription>,
    pub artifacts_json: Option<PathBuf>,
    pub dry_run: bool,
}

/// Result of an upload operation.
pub enum UploadOutcome {
    Uploaded { count: usize, base_url: String },
    DryRun(Vec<PlannedUpload>),
}

/// Build the session from config and arguments, then upload everything
/// through a reqwest client (or only list the URLs on a dry run).
pub fn upload(project_root: &Path, args: &UploadArgs) -> miette::Result<UploadOutcome> {
    let (config, config_dir) = load_config(project_root, args)?;
    let session = build_session(project_root, &config_dir, &config, args)?;

    if args.dry_run {
        return Ok(UploadOutcome::DryRun(session.planned_uploads()?));
    }

    let mut client = HttpClient::new()?;
    run(&session, &mut client, client_options(&config, args))?;

    Ok(UploadOutcome::Uploaded {
        count: session.artifact_count(),
        base_url: session.base_url().to_string(),
    })
}

/// Upload a prepared session through `transport`.
pub fn run(
    session: &Upload,
    transport: &mut dyn Sender,
    options: ClientOptions,
) -> miette::Result<()> {
    use nexup_util::progress::spinner;

    tracing::info!(
        "Uploading {} artifact(s) to {}",
        session.artifact_count(),
        session.base_url()
    );
    let sp = spinner(&format!(
        "Uploading {} artifact(s)...",
        session.artifact_count()
    ));
    let result = session.upload(transport, options);
    sp.finish_and_clear();
    result.map_err(Into::into)
}

fn load_config(
    project_root: &Path,
    args: &UploadArgs,
) -> miette::Result<(UploadConfig, PathBuf)> {
    match &args.config {
        Some(path) => {
            let path = resolve_against(project_root, path);
            let dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| project_root.to_path_buf());
            Ok((UploadConfig::from_path(&path)?, dir))
        }
        None => Ok((
            UploadConfig::load_or_default(project_root)?,
            project_root.to_path_buf(),
        )),
    }
}

/// Assemble an [`Upload`] from the config file and the command line.
///
/// Artifacts are registered in this order: the POM, `[[artifacts.files]]`,
/// `--artifact` flags, then the `--artifacts-json` list. An artifactId seen
/// twice across these sources is a validation error. Paths from the config
/// file are relative to its directory and command-line paths to
/// `project_root`. Files named inside the JSON list are used as written.
pub fn build_session(
    project_root: &Path,
    config_dir: &Path,
    config: &UploadConfig,
    args: &UploadArgs,
) -> miette::Result<Upload> {
    let mut session = Upload::new();

    let pom_path = args
        .pom
        .as_ref()
        .map(|p| resolve_against(project_root, p))
        .or_else(|| {
            config
                .artifacts
                .pom
                .as_ref()
                .map(|p| resolve_against(config_dir, p))
        });
    let pom = match &pom_path {
        Some(path) => Some(pom::read_coordinates(path)?),
        None => None,
    };

    let server = &config.server;
    let url = args.url.clone().or_else(|| server.url.clone());
    let nexus_version = args
        .nexus_version
        .clone()
        .or_else(|| server.nexus_version.clone());
    let repository = args.repository.clone().or_else(|| server.repository.clone());
    let group_id = args
        .group_id
        .clone()
        .or_else(|| server.group_id.clone())
        .or_else(|| {
            pom.as_ref()
                .and_then(|p| p.effective_group_id().map(str::to_string))
        });

    // Leave the base URL unset when nothing was given so the upload reports
    // the missing configuration step instead of a single empty field.
    if url.is_some() || nexus_version.is_some() || repository.is_some() || group_id.is_some() {
        session.set_base_url(
            url.as_deref().unwrap_or_default(),
            nexus_version.as_deref().unwrap_or_default(),
            repository.as_deref().unwrap_or_default(),
            group_id.as_deref().unwrap_or_default(),
        )?;
    }

    let version = match args
        .version
        .clone()
        .or_else(|| config.artifacts.version.clone())
    {
        Some(version) => Some(version),
        None => match &pom {
            Some(pom) => pom.resolved_version()?,
            None => None,
        },
    };
    if let Some(version) = version {
        session.set_artifacts_version(&version)?;
    }

    if let (Some(pom), Some(path)) = (&pom, &pom_path) {
        let artifact_id = pom.artifact_id.clone().unwrap_or_default();
        register(&mut session, ArtifactDescription::new(&artifact_id, "pom", path))?;
    }

    for artifact in &config.artifacts.files {
        register(&mut session, with_base(config_dir, artifact))?;
    }
    for artifact in &args.artifacts {
        register(&mut session, with_base(project_root, artifact))?;
    }

    if let Some(json_path) = &args.artifacts_json {
        let json_path = resolve_against(project_root, json_path);
        let json = std::fs::read_to_string(&json_path).map_err(|e| NexusError::Config {
            message: format!("Failed to read {}: {e}", json_path.display()),
        })?;
        let mut listed = Upload::new();
        listed.add_artifacts_from_json(&json)?;
        for artifact in listed.artifacts() {
            register(&mut session, artifact)?;
        }
    }

    Ok(session)
}

/// Add `artifact`, failing when its id is already registered. The session
/// alone would skip the repeat, e.g. a jar sharing the POM's artifactId.
fn register(session: &mut Upload, artifact: ArtifactDescription) -> Result<(), NexusError> {
    if let Some(existing) = session.artifacts().into_iter().find(|a| a.id == artifact.id) {
        tracing::warn!("artifact {artifact} shadowed by {existing}");
        return Err(NexusError::validation(format!(
            "artifact '{artifact}' has the same artifactId as '{existing}' and would not be \
             uploaded; give it a distinct artifactId"
        )));
    }
    session.add_artifact(artifact)
}

fn with_base(base: &Path, artifact: &ArtifactDescription) -> ArtifactDescription {
    let mut artifact = artifact.clone();
    if !artifact.file.as_os_str().is_empty() {
        artifact.file = resolve_against(base, &artifact.file);
    }
    artifact
}

/// Credentials and timeout for the transport. Command-line values win over
/// the config file.
pub fn client_options(config: &UploadConfig, args: &UploadArgs) -> ClientOptions {
    ClientOptions {
        username: args
            .username
            .clone()
            .or_else(|| config.server.username.clone()),
        password: args
            .password
            .clone()
            .or_else(|| config.server.password.clone()),
        timeout: Some(Duration::from_secs(config.server.timeout)),
    }
}
