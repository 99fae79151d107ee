use std::path::{Path, PathBuf};

use nexup_core::artifact::ArtifactDescription;
use nexup_nexus::transport::{ClientOptions, HttpResponse, Sender, TransportError};
use nexup_nexus::upload::Upload;
use nexup_util::errors::NexusError;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use tempfile::TempDir;

struct Request {
    method: Method,
    url: String,
    body: Vec<u8>,
}

/// Records every request and answers with the scripted replies in order.
/// Requests beyond the script are answered with 200.
#[derive(Default)]
struct MockSender {
    replies: Vec<Result<StatusCode, String>>,
    requests: Vec<Request>,
    options: Option<ClientOptions>,
}

impl MockSender {
    fn with_replies(replies: Vec<Result<StatusCode, String>>) -> Self {
        Self {
            replies,
            ..Default::default()
        }
    }
}

impl Sender for MockSender {
    fn send_request(
        &mut self,
        method: Method,
        url: &str,
        body: Vec<u8>,
        _headers: &HeaderMap,
    ) -> Result<HttpResponse, TransportError> {
        let reply = self
            .replies
            .get(self.requests.len())
            .cloned()
            .unwrap_or(Ok(StatusCode::OK));
        self.requests.push(Request {
            method,
            url: url.to_string(),
            body,
        });
        reply.map(HttpResponse::new).map_err(TransportError)
    }

    fn set_options(&mut self, options: ClientOptions) {
        self.options = Some(options);
    }
}

fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn configured_upload(pom: &Path) -> Upload {
    let mut upload = Upload::new();
    upload
        .set_base_url("localhost:8081", "nexus3", "maven-releases", "my.group.id")
        .unwrap();
    upload.set_artifacts_version("1.0").unwrap();
    upload
        .add_artifact(ArtifactDescription::new("artifact.id", "pom", pom))
        .unwrap();
    upload
}

const POM_URL: &str =
    "http://localhost:8081/repository/maven-releases/my/group/id/artifact.id/1.0/artifact.id-1.0.pom";

#[test]
fn add_artifact_valid() {
    let mut upload = Upload::new();
    upload
        .add_artifact(ArtifactDescription::new("artifact.id", "pom", "pom.xml"))
        .unwrap();

    let artifacts = upload.artifacts();
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].id, "artifact.id");
    assert_eq!(artifacts[0].classifier, "");
    assert_eq!(artifacts[0].type_, "pom");
    assert_eq!(artifacts[0].file, Path::new("pom.xml"));
}

#[test]
fn add_artifact_missing_id() {
    let mut upload = Upload::new();
    let err = upload
        .add_artifact(ArtifactDescription::new("", "pom", "pom.xml"))
        .unwrap_err();
    assert!(matches!(err, NexusError::Validation { .. }));
    assert_eq!(upload.artifact_count(), 0);
}

#[test]
fn add_artifact_missing_file() {
    let mut upload = Upload::new();
    let err = upload
        .add_artifact(ArtifactDescription::new("artifact.id", "pom", ""))
        .unwrap_err();
    assert!(matches!(err, NexusError::Validation { .. }));
    assert_eq!(upload.artifact_count(), 0);
}

#[test]
fn add_duplicate_artifact() {
    let mut upload = Upload::new();
    upload
        .add_artifact(ArtifactDescription::new("blob", "pom", "pom.xml"))
        .unwrap();
    upload
        .add_artifact(ArtifactDescription::new("blob", "pom", "pom.xml"))
        .unwrap();
    assert_eq!(upload.artifact_count(), 1);
}

#[test]
fn artifacts_keep_registration_order() {
    let mut upload = Upload::new();
    for id in ["c", "a", "b"] {
        upload
            .add_artifact(ArtifactDescription::new(id, "jar", format!("{id}.jar")))
            .unwrap();
    }
    let ids: Vec<String> = upload.artifacts().into_iter().map(|a| a.id).collect();
    assert_eq!(ids, ["c", "a", "b"]);
}

#[test]
fn artifacts_not_directly_accessible() {
    let mut upload = Upload::new();
    upload
        .add_artifact(ArtifactDescription::new("artifact.id", "pom", "pom.xml"))
        .unwrap();

    let mut artifacts = upload.artifacts();
    artifacts[0] = ArtifactDescription::new("another.id", "pom", "pom.xml");

    assert_eq!(upload.artifacts()[0].id, "artifact.id");
}

#[test]
fn add_artifacts_from_json() {
    let json = r#"[
        {"artifactId": "my-lib", "type": "pom", "file": "pom.xml"},
        {"artifactId": "my-lib-jar", "classifier": "sources", "type": "jar", "file": "my-lib-sources.jar"},
        {"artifactId": "my-lib", "type": "jar", "file": "ignored.jar"}
    ]"#;
    let mut upload = Upload::new();
    upload.add_artifacts_from_json(json).unwrap();

    let artifacts = upload.artifacts();
    assert_eq!(artifacts.len(), 2);
    assert_eq!(artifacts[0].type_, "pom");
    assert_eq!(artifacts[1].classifier, "sources");
}

#[test]
fn add_artifacts_from_json_stops_at_invalid_entry() {
    let json = r#"[
        {"artifactId": "first", "type": "pom", "file": "pom.xml"},
        {"artifactId": "", "type": "jar", "file": "x.jar"},
        {"artifactId": "third", "type": "jar", "file": "y.jar"}
    ]"#;
    let mut upload = Upload::new();
    assert!(upload.add_artifacts_from_json(json).is_err());
    assert_eq!(upload.artifact_count(), 1);
}

#[test]
fn add_artifacts_from_malformed_json() {
    let mut upload = Upload::new();
    let err = upload.add_artifacts_from_json("{not json").unwrap_err();
    assert!(matches!(err, NexusError::Validation { .. }));
}

#[test]
fn sensible_base_url_nexus2() {
    let mut upload = Upload::new();
    upload
        .set_base_url("localhost:8081/nexus", "nexus2", "maven-releases", "some.group.id")
        .unwrap();
    assert_eq!(
        upload.base_url(),
        "localhost:8081/nexus/content/repositories/maven-releases/some/group/id/"
    );
}

#[test]
fn sensible_base_url_nexus3() {
    let mut upload = Upload::new();
    upload
        .set_base_url("localhost:8081", "nexus3", "maven-releases", "some.group.id")
        .unwrap();
    assert_eq!(
        upload.base_url(),
        "localhost:8081/repository/maven-releases/some/group/id/"
    );
}

#[test]
fn set_base_url_param_checking() {
    let mut upload = Upload::new();
    assert!(
        upload
            .set_base_url("", "nexus3", "maven-releases", "some.group.id")
            .is_err(),
        "no host"
    );
    assert!(
        upload
            .set_base_url("localhost:8081", "3", "maven-releases", "some.group.id")
            .is_err(),
        "invalid nexus version"
    );
    assert!(
        upload
            .set_base_url("localhost:8081", "nexus3", "", "some.group.id")
            .is_err(),
        "no repository"
    );
    assert!(
        upload
            .set_base_url("localhost:8081", "nexus3", "maven-releases", "")
            .is_err(),
        "no group id"
    );
    assert_eq!(upload.base_url(), "");
}

#[test]
fn set_invalid_artifacts_version() {
    let mut upload = Upload::new();
    assert!(upload.set_artifacts_version("").is_err());
    assert_eq!(upload.artifacts_version(), "");
}

#[test]
fn set_valid_artifacts_version() {
    let mut upload = Upload::new();
    upload.set_artifacts_version("1.0.0-SNAPSHOT").unwrap();
    assert_eq!(upload.artifacts_version(), "1.0.0-SNAPSHOT");
}

#[test]
fn upload_fails_without_base_url() {
    let mut sender = MockSender::default();
    let upload = Upload::new();

    let err = upload.upload_artifacts(&mut sender).unwrap_err();
    assert_eq!(
        err.to_string(),
        "the upload session needs to be configured by calling set_base_url() first"
    );
    assert!(sender.requests.is_empty());
}

#[test]
fn upload_fails_without_version() {
    let mut sender = MockSender::default();
    let mut upload = Upload::new();
    upload
        .set_base_url("localhost:8081", "nexus3", "maven-releases", "my.group.id")
        .unwrap();

    let err = upload.upload_artifacts(&mut sender).unwrap_err();
    assert_eq!(
        err.to_string(),
        "the upload session needs to be configured by calling set_artifacts_version() first"
    );
}

#[test]
fn upload_fails_without_artifacts() {
    let mut sender = MockSender::default();
    let mut upload = Upload::new();
    upload
        .set_base_url("localhost:8081", "nexus3", "maven-releases", "my.group.id")
        .unwrap();
    upload.set_artifacts_version("1.0").unwrap();

    let err = upload.upload_artifacts(&mut sender).unwrap_err();
    assert!(matches!(err, NexusError::NoArtifacts));
    assert_eq!(
        err.to_string(),
        "no artifacts to upload, call add_artifact() or add_artifacts_from_json() first"
    );
}

#[test]
fn upload_works() {
    let tmp = TempDir::new().unwrap();
    let pom = write_file(tmp.path(), "pom.xml", b"hello world");
    let upload = configured_upload(&pom);
    let mut sender = MockSender::default();

    upload.upload_artifacts(&mut sender).unwrap();

    assert_eq!(sender.requests.len(), 3, "Expected 3 HTTP requests");
    assert!(sender.requests.iter().all(|r| r.method == Method::PUT));
    assert_eq!(sender.requests[0].url, format!("{POM_URL}.md5"));
    assert_eq!(sender.requests[1].url, format!("{POM_URL}.sha1"));
    assert_eq!(sender.requests[2].url, POM_URL);

    assert_eq!(sender.requests[0].body, b"5eb63bbbe01eeed093cb22bb8f5acdc3");
    assert_eq!(
        sender.requests[1].body,
        b"2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
    );
    assert_eq!(sender.requests[2].body, b"hello world");
}

#[test]
fn upload_fails_on_transport_error() {
    let tmp = TempDir::new().unwrap();
    let pom = write_file(tmp.path(), "pom.xml", b"<project/>");
    let upload = configured_upload(&pom);
    let mut sender = MockSender::with_replies(vec![
        Ok(StatusCode::OK),
        Err("failed".to_string()),
        Ok(StatusCode::OK),
    ]);

    let err = upload.upload_artifacts(&mut sender).unwrap_err();

    assert!(matches!(err, NexusError::Upload { ref url, .. } if url == &format!("{POM_URL}.sha1")));
    assert_eq!(sender.requests.len(), 2, "Expected only two HTTP requests");
    assert_eq!(
        upload.artifact_count(),
        1,
        "Expected the artifact to be still registered"
    );
}

#[test]
fn upload_fails_on_error_status() {
    let tmp = TempDir::new().unwrap();
    let pom = write_file(tmp.path(), "pom.xml", b"<project/>");
    let upload = configured_upload(&pom);
    let mut sender = MockSender::with_replies(vec![Ok(StatusCode::UNAUTHORIZED)]);

    let err = upload.upload_artifacts(&mut sender).unwrap_err();

    assert!(err.to_string().contains("401"), "got: {err}");
    assert_eq!(sender.requests.len(), 1);
}

#[test]
fn upload_stops_before_later_artifacts() {
    let tmp = TempDir::new().unwrap();
    let pom = write_file(tmp.path(), "pom.xml", b"<project/>");
    let jar = write_file(tmp.path(), "app.jar", b"jar bytes");
    let mut upload = configured_upload(&pom);
    upload
        .add_artifact(ArtifactDescription::new("app", "jar", &jar))
        .unwrap();
    let mut sender = MockSender::with_replies(vec![
        Ok(StatusCode::CREATED),
        Ok(StatusCode::CREATED),
        Ok(StatusCode::INTERNAL_SERVER_ERROR),
    ]);

    assert!(upload.upload_artifacts(&mut sender).is_err());
    assert_eq!(sender.requests.len(), 3);
    assert_eq!(upload.artifact_count(), 2);
}

#[test]
fn retry_after_failure_starts_from_first_artifact() {
    let tmp = TempDir::new().unwrap();
    let pom = write_file(tmp.path(), "pom.xml", b"<project/>");
    let upload = configured_upload(&pom);

    let mut failing =
        MockSender::with_replies(vec![Ok(StatusCode::OK), Err("reset".to_string())]);
    assert!(upload.upload_artifacts(&mut failing).is_err());

    let mut sender = MockSender::default();
    upload.upload_artifacts(&mut sender).unwrap();
    assert_eq!(sender.requests.len(), 3);
    assert_eq!(sender.requests[0].url, format!("{POM_URL}.md5"));
}

#[test]
fn upload_multiple_artifacts_in_order() {
    let tmp = TempDir::new().unwrap();
    let pom = write_file(tmp.path(), "pom.xml", b"<project/>");
    let jar = write_file(tmp.path(), "sources.jar", b"sources");
    let mut upload = configured_upload(&pom);
    upload
        .add_artifact(
            ArtifactDescription::new("artifact.id-src", "jar", &jar).with_classifier("sources"),
        )
        .unwrap();
    let mut sender = MockSender::default();

    upload.upload_artifacts(&mut sender).unwrap();

    let urls: Vec<&str> = sender.requests.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls.len(), 6);
    assert!(urls[2].ends_with("artifact.id-1.0.pom"));
    assert!(urls[3].ends_with("/artifact.id-src/1.0/artifact.id-src-1.0-sources.jar.md5"));
    assert!(urls[5].ends_with("/artifact.id-src/1.0/artifact.id-src-1.0-sources.jar"));
}

#[test]
fn upload_missing_file_is_read_error() {
    let tmp = TempDir::new().unwrap();
    let upload = configured_upload(&tmp.path().join("missing.pom"));
    let mut sender = MockSender::default();

    let err = upload.upload_artifacts(&mut sender).unwrap_err();

    assert!(matches!(err, NexusError::ReadArtifact { .. }));
    assert!(sender.requests.is_empty());
}

#[test]
fn upload_passes_credentials_to_transport() {
    let tmp = TempDir::new().unwrap();
    let pom = write_file(tmp.path(), "pom.xml", b"<project/>");
    let upload = configured_upload(&pom);
    let mut sender = MockSender::default();

    let options = ClientOptions {
        username: Some("admin".to_string()),
        password: Some("admin123".to_string()),
        ..Default::default()
    };
    upload.upload(&mut sender, options).unwrap();

    let options = sender.options.unwrap();
    assert_eq!(options.username.as_deref(), Some("admin"));
    assert_eq!(options.password.as_deref(), Some("admin123"));
    assert_eq!(sender.requests.len(), 3);
}

#[test]
fn upload_with_https_host() {
    let tmp = TempDir::new().unwrap();
    let jar = write_file(tmp.path(), "lib.jar", b"jar");
    let mut upload = Upload::new();
    upload
        .set_base_url("https://nexus.example.com", "nexus3", "releases", "com.example")
        .unwrap();
    upload.set_artifacts_version("3.0").unwrap();
    upload
        .add_artifact(ArtifactDescription::new("lib", "jar", &jar))
        .unwrap();
    let mut sender = MockSender::default();

    upload.upload_artifacts(&mut sender).unwrap();

    assert_eq!(
        sender.requests[2].url,
        "https://nexus.example.com/repository/releases/com/example/lib/3.0/lib-3.0.jar"
    );
}

#[test]
fn planned_uploads_checks_configuration() {
    let upload = Upload::new();
    assert!(matches!(
        upload.planned_uploads(),
        Err(NexusError::NotConfigured { .. })
    ));
}

#[test]
fn planned_uploads_lists_urls() {
    let upload = configured_upload(Path::new("pom.xml"));
    let plan = upload.planned_uploads().unwrap();
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].url, POM_URL);
    assert_eq!(plan[0].artifact.id, "artifact.id");
}
