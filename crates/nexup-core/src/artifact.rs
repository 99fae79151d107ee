use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One file to publish, plus the Maven metadata that names it remotely.
///
/// Serialized with the field names used by declarative artifact lists:
///
/// ```json
/// [{ "artifactId": "my-lib", "classifier": "sources", "type": "jar", "file": "target/my-lib-sources.jar" }]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDescription {
    #[serde(rename = "artifactId")]
    pub id: String,
    /// Empty when the artifact has no classifier.
    #[serde(default)]
    pub classifier: String,
    #[serde(rename = "type", default)]
    pub type_: String,
    #[serde(default)]
    pub file: PathBuf,
}

impl ArtifactDescription {
    pub fn new(id: &str, type_: &str, file: impl Into<PathBuf>) -> Self {
        Self {
            id: id.to_string(),
            classifier: String::new(),
            type_: type_.to_string(),
            file: file.into(),
        }
    }

    pub fn with_classifier(mut self, classifier: &str) -> Self {
        self.classifier = classifier.to_string();
        self
    }

    /// Parse the command-line shorthand `"id:type:file"` or
    /// `"id:type:file:classifier"`.
    ///
    /// The file may itself contain `:` (`app:jar:C:\out\app.jar`). A trailing
    /// `:<name>` counts as the classifier only when `<name>` holds no path
    /// separator and what precedes it is not a bare drive letter.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.splitn(3, ':');
        let id = parts.next().filter(|p| !p.is_empty())?;
        let type_ = parts.next().filter(|p| !p.is_empty())?;
        let rest = parts.next().filter(|p| !p.is_empty())?;

        match rest.rsplit_once(':') {
            Some((file, classifier)) if is_classifier(file, classifier) => {
                Some(Self::new(id, type_, file).with_classifier(classifier))
            }
            _ => Some(Self::new(id, type_, rest)),
        }
    }

    /// File name on the repository: `<id>-<version>[-<classifier>].<type>`.
    pub fn remote_file_name(&self, version: &str) -> String {
        if self.classifier.is_empty() {
            format!("{}-{}.{}", self.id, version, self.type_)
        } else {
            format!("{}-{}-{}.{}", self.id, version, self.classifier, self.type_)
        }
    }
}

fn is_classifier(file: &str, classifier: &str) -> bool {
    let drive_letter = file.len() == 1 && file.chars().all(|c| c.is_ascii_alphabetic());
    !file.is_empty()
        && !drive_letter
        && !classifier.is_empty()
        && !classifier.contains(['/', '\\'])
}

impl std::fmt::Display for ArtifactDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.id, self.type_)?;
        if !self.classifier.is_empty() {
            write!(f, ":{}", self.classifier)?;
        }
        write!(f, " ({})", self.file.display())
    }
}
