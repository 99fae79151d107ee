//! Reading Maven coordinates out of a pom.xml.
//!
//! Only what an upload needs is extracted: group id, artifact id, version
//! and packaging, with the `<parent>` group/version as fallback and
//! `${property}` references in the version resolved against `<properties>`.

use std::collections::BTreeMap;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use nexup_util::errors::{NexusError, NexusResult};

/// Project coordinates declared in a POM.
#[derive(Debug, Clone, Default)]
pub struct PomCoordinates {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,
    pub parent_group_id: Option<String>,
    pub parent_version: Option<String>,
    pub properties: BTreeMap<String, String>,
}

impl PomCoordinates {
    /// Effective group ID (falls back to parent).
    pub fn effective_group_id(&self) -> Option<&str> {
        self.group_id
            .as_deref()
            .or(self.parent_group_id.as_deref())
    }

    /// Effective version (falls back to parent), with properties resolved.
    pub fn effective_version(&self) -> Option<String> {
        self.version
            .as_deref()
            .or(self.parent_version.as_deref())
            .map(|v| self.interpolate(v))
    }

    /// Packaging type, `jar` when the POM does not say.
    pub fn packaging(&self) -> &str {
        self.packaging.as_deref().unwrap_or("jar")
    }

    /// Effective version, failing when a `${...}` reference is still
    /// unresolved after interpolation.
    pub fn resolved_version(&self) -> NexusResult<Option<String>> {
        match self.effective_version() {
            Some(v) if v.contains("${") => Err(NexusError::Pom {
                message: format!("unresolved property in <version>: {v}"),
            }),
            other => Ok(other),
        }
    }

    fn interpolate(&self, input: &str) -> String {
        let mut result = input.to_string();
        let mut from = 0;
        for _ in 0..20 {
            let Some(start) = result[from..].find("${").map(|i| from + i) else {
                break;
            };
            let Some(len) = result[start..].find('}') else {
                break;
            };
            let key = &result[start + 2..start + len];
            let value = match key {
                "project.groupId" | "pom.groupId" => {
                    self.effective_group_id().map(|s| s.to_string())
                }
                "project.parent.version" => self.parent_version.clone(),
                _ => self.properties.get(key).cloned(),
            };
            match value {
                Some(value) => {
                    result =
                        format!("{}{}{}", &result[..start], value, &result[start + len + 1..]);
                }
                // Unknown key: keep the placeholder and scan past it.
                None => from = start + len + 1,
            }
        }
        result
    }
}

/// Read and parse a pom.xml from disk.
pub fn read_coordinates(path: &Path) -> NexusResult<PomCoordinates> {
    let xml = std::fs::read_to_string(path).map_err(|source| NexusError::ReadArtifact {
        path: path.to_path_buf(),
        source,
    })?;
    parse_coordinates(&xml)
}

/// Parse project coordinates from POM XML.
pub fn parse_coordinates(xml: &str) -> NexusResult<PomCoordinates> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pom = PomCoordinates::default();
    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                path.push(String::from_utf8_lossy(e.name().as_ref()).to_string());
                text_buf.clear();
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().unwrap_or_default().to_string();
            }
            Ok(Event::End(_)) => {
                let ctx = path.join(">");
                match ctx.as_str() {
                    "project>groupId" => pom.group_id = Some(text_buf.clone()),
                    "project>artifactId" => pom.artifact_id = Some(text_buf.clone()),
                    "project>version" => pom.version = Some(text_buf.clone()),
                    "project>packaging" => pom.packaging = Some(text_buf.clone()),
                    "project>parent>groupId" => pom.parent_group_id = Some(text_buf.clone()),
                    "project>parent>version" => pom.parent_version = Some(text_buf.clone()),
                    _ if path.len() == 3 && path[1] == "properties" => {
                        pom.properties.insert(path[2].clone(), text_buf.clone());
                    }
                    _ => {}
                }
                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(NexusError::Pom {
                    message: format!("Failed to parse POM XML: {e}"),
                });
            }
            _ => {}
        }
    }

    if pom.artifact_id.is_none() {
        return Err(NexusError::Pom {
            message: "POM declares no <artifactId>".to_string(),
        });
    }

    Ok(pom)
}
