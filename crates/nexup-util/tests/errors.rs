use nexup_util::errors::NexusError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = NexusError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_validation_error_display() {
    let err = NexusError::validation("empty host");
    assert_eq!(err.to_string(), "Validation error: empty host");
}

#[test]
fn test_not_configured_names_the_step() {
    let err = NexusError::NotConfigured {
        step: "set_base_url()",
    };
    assert_eq!(
        err.to_string(),
        "the upload session needs to be configured by calling set_base_url() first"
    );
}

#[test]
fn test_no_artifacts_display() {
    assert!(NexusError::NoArtifacts
        .to_string()
        .starts_with("no artifacts to upload"));
}

#[test]
fn test_upload_error_display() {
    let err = NexusError::Upload {
        url: "http://host/a.pom".to_string(),
        message: "HTTP 401 Unauthorized".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Upload of http://host/a.pom failed: HTTP 401 Unauthorized"
    );
}

#[test]
fn test_read_artifact_display_includes_path() {
    let err = NexusError::ReadArtifact {
        path: "target/app.jar".into(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    assert!(err.to_string().contains("target/app.jar"), "got: {err}");
}

#[test]
fn test_config_error_display() {
    let err = NexusError::Config {
        message: "bad syntax".to_string(),
    };
    assert_eq!(err.to_string(), "Config error: bad syntax");
}
