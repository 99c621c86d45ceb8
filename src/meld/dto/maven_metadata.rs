use crate::error::{AppError, Result};
use crate::meld::dto::version::{sort_latest_first, Channel, VersionRecord};
use log::{debug, warn};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

const ROOT_ELEMENT: &[u8] = b"metadata";

/// `maven-metadata.xml` as published by the MeldMC repository. Every section
/// is optional: a repository without snapshots serves a document with no
/// `<versions>` at all.
#[derive(Debug, Default, Deserialize)]
pub struct MavenMetadata {
    #[serde(rename = "groupId", default)]
    pub group_id: Option<String>,
    #[serde(rename = "artifactId", default)]
    pub artifact_id: Option<String>,
    #[serde(rename = "versioning", default)]
    pub versioning: Option<Versioning>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Versioning {
    #[serde(rename = "versions", default)]
    pub versions: Option<Versions>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Versions {
    #[serde(rename = "version", default)]
    pub versions: Vec<String>,
}

impl MavenMetadata {
    /// Parses a metadata document. Malformed XML is a `ParseError`; a
    /// well-formed document whose root is not `<metadata>` yields an empty
    /// metadata value.
    pub fn parse(xml: &str) -> Result<Self> {
        let root = Self::root_element_name(xml)?;
        if root.as_bytes() != ROOT_ELEMENT {
            debug!("Ignoring metadata document with root element <{}>", root);
            return Ok(Self::default());
        }

        quick_xml::de::from_str(xml)
            .map_err(|e| AppError::ParseError(format!("Failed to parse maven metadata: {}", e)))
    }

    fn root_element_name(xml: &str) -> Result<String> {
        let mut reader = Reader::from_str(xml);
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    return Ok(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                }
                Ok(Event::Eof) => {
                    return Err(AppError::ParseError(
                        "Metadata document has no root element".to_string(),
                    ));
                }
                Ok(_) => continue,
                Err(e) => {
                    return Err(AppError::ParseError(format!(
                        "Malformed metadata document at position {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
            }
        }
    }

    /// Raw `<version>` values in document order.
    pub fn get_all_versions(&self) -> &[String] {
        self.versioning
            .as_ref()
            .and_then(|v| v.versions.as_ref())
            .map(|v| v.versions.as_slice())
            .unwrap_or(&[])
    }

    /// Non-blank versions tagged with `channel`, latest first.
    pub fn to_records(&self, channel: Channel) -> Vec<VersionRecord> {
        let mut records: Vec<VersionRecord> = self
            .get_all_versions()
            .iter()
            .filter_map(|raw| {
                let record = VersionRecord::new(raw, channel);
                if record.is_none() && !raw.trim().is_empty() {
                    warn!("Skipping unusable {} version identifier {:?}", channel, raw);
                }
                record
            })
            .collect();
        sort_latest_first(&mut records);
        records
    }
}
