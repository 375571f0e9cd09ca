//! Nuspec document parsing.
//!
//! Only four fields are consumed, all under `package/metadata`:
//! `projectUrl`, `license` (with its `type` attribute) and `licenseUrl`.
//! Namespaces differ between nuspec schema versions, so elements are
//! matched by local name.

use crate::error::{NoticeError, RegistryErrorKind, Result};
use crate::model::{LicenseMetadata, LicenseReference};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Raw field values read from a nuspec.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NuspecFields {
    pub project_url: String,
    pub license: String,
    pub license_type: Option<String>,
    pub license_url: String,
}

impl NuspecFields {
    /// Derive the stored license metadata.
    #[must_use]
    pub fn into_metadata(self) -> LicenseMetadata {
        let license = LicenseReference::from_declared(self.license_type.as_deref(), &self.license);
        LicenseMetadata {
            license_name: license.display_name(),
            license_url: self.license_url.trim().to_string(),
            homepage: self.project_url.trim().to_string(),
            notes: String::new(),
        }
    }
}

/// Which metadata field the reader is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ProjectUrl,
    License,
    LicenseUrl,
}

impl Field {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"projectUrl" => Some(Self::ProjectUrl),
            b"license" => Some(Self::License),
            b"licenseUrl" => Some(Self::LicenseUrl),
            _ => None,
        }
    }
}

/// Parse a nuspec document into license metadata.
pub fn parse_nuspec(content: &str) -> Result<LicenseMetadata> {
    parse_nuspec_fields(content).map(NuspecFields::into_metadata)
}

/// Extract the raw metadata fields of a nuspec document.
///
/// The first occurrence of each field wins. A document with no `metadata`
/// element is rejected.
pub fn parse_nuspec_fields(content: &str) -> Result<NuspecFields> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut fields = NuspecFields::default();
    let mut seen_metadata = false;
    let mut metadata_depth: Option<usize> = None;
    let mut depth = 0usize;
    let mut current: Option<(Field, usize)> = None;
    let mut done: Vec<Field> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                let name = e.local_name();
                if name.as_ref() == b"metadata" && metadata_depth.is_none() {
                    metadata_depth = Some(depth);
                    seen_metadata = true;
                } else if metadata_depth.is_some_and(|d| depth == d + 1)
                    && let Some(field) = Field::from_local_name(name.as_ref())
                    && !done.contains(&field)
                {
                    if field == Field::License {
                        fields.license_type = attribute(e, b"type")?;
                    }
                    current = Some((field, depth));
                }
            }
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"metadata" {
                    seen_metadata = true;
                } else if metadata_depth.is_some_and(|d| depth == d)
                    && Field::from_local_name(e.local_name().as_ref()) == Some(Field::License)
                    && !done.contains(&Field::License)
                {
                    fields.license_type = attribute(e, b"type")?;
                    done.push(Field::License);
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some((field, _)) = current {
                    let text = e.unescape().map_err(invalid)?;
                    slot(&mut fields, field).push_str(&text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some((field, _)) = current {
                    slot(&mut fields, field).push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::End(_)) => {
                if let Some((field, d)) = current
                    && d == depth
                {
                    done.push(field);
                    current = None;
                }
                if metadata_depth == Some(depth) {
                    metadata_depth = None;
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => {
                if depth != 0 {
                    return Err(invalid("unexpected end of document"));
                }
                break;
            }
            Err(e) => return Err(invalid(e)),
            _ => {}
        }
    }

    if !seen_metadata {
        return Err(NoticeError::registry(
            "parsing nuspec",
            RegistryErrorKind::InvalidNuspec("no <metadata> element".to_string()),
        ));
    }

    Ok(fields)
}

fn slot(fields: &mut NuspecFields, field: Field) -> &mut String {
    match field {
        Field::ProjectUrl => &mut fields.project_url,
        Field::License => &mut fields.license,
        Field::LicenseUrl => &mut fields.license_url,
    }
}

fn attribute(e: &quick_xml::events::BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(invalid)?;
        if attr.key.local_name().as_ref() == key {
            return Ok(Some(attr.unescape_value().map_err(invalid)?.into_owned()));
        }
    }
    Ok(None)
}

fn invalid(err: impl std::fmt::Display) -> NoticeError {
    NoticeError::registry(
        "parsing nuspec",
        RegistryErrorKind::InvalidNuspec(err.to_string()),
    )
}
