//! Handler for `nexup upload`.

use miette::Result;

use nexup_ops::ops_upload::{self, UploadArgs, UploadOutcome};
use nexup_util::errors::NexusError;
use nexup_util::progress::{status, status_info};

use crate::cli::UploadCommand;

pub fn exec(cmd: UploadCommand) -> Result<()> {
    let project_root = std::env::current_dir().map_err(NexusError::Io)?;

    let args = UploadArgs {
        config: cmd.config,
        url: cmd.url,
        nexus_version: cmd.nexus_version,
        repository: cmd.repository,
        group_id: cmd.group_id,
        version: cmd.version,
        username: cmd.username,
        password: cmd.password,
        pom: cmd.pom,
        artifacts: cmd.artifacts,
        artifacts_json: cmd.artifacts_json,
        dry_run: cmd.dry_run,
    };

    match ops_upload::upload(&project_root, &args)? {
        UploadOutcome::DryRun(plan) => {
            for planned in &plan {
                status_info("Would upload", &planned.artifact.to_string());
                println!("{}", planned.url);
            }
        }
        UploadOutcome::Uploaded { count, base_url } => {
            status("Uploaded", &format!("{count} artifact(s) to {base_url}"));
        }
    }

    Ok(())
}
