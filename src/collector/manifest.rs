//! MSBuild project file parsing.
//!
//! Extracts `PackageReference` items from `*.csproj` content. Both attribute
//! and child-element forms of the version are supported:
//!
//! ```xml
//! <PackageReference Include="Serilog" Version="3.1.1" />
//! <PackageReference Include="Polly">
//!   <Version>8.2.0</Version>
//! </PackageReference>
//! ```

use crate::error::{NoticeError, Result};
use crate::model::PackageRef;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

const PACKAGE_REFERENCE: &[u8] = b"PackageReference";
const VERSION: &[u8] = b"Version";

/// A `PackageReference` element whose end tag has not been seen yet.
#[derive(Debug, Default)]
struct PendingReference {
    include: Option<String>,
    version_attr: Option<String>,
    version_text: Option<String>,
    /// Element depth of the `PackageReference` start tag
    depth: usize,
}

/// Parse every package reference in a project file.
///
/// `origin` is only used to label errors. Entries with a blank name or
/// version are dropped; duplicates are kept (the collector deduplicates
/// across files).
pub fn parse_manifest(content: &str, origin: &str) -> Result<Vec<PackageRef>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut refs = Vec::new();
    let mut pending: Option<PendingReference> = None;
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut in_version = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                seen_root = true;
                let name = e.local_name();
                if name.as_ref() == PACKAGE_REFERENCE && pending.is_none() {
                    pending = Some(start_reference(e, depth, origin)?);
                } else if name.as_ref() == VERSION
                    && pending.as_ref().is_some_and(|p| depth == p.depth + 1)
                {
                    in_version = true;
                }
            }
            Ok(Event::Empty(ref e)) => {
                seen_root = true;
                if e.local_name().as_ref() == PACKAGE_REFERENCE && pending.is_none() {
                    let reference = start_reference(e, depth + 1, origin)?;
                    refs.extend(finish_reference(reference));
                }
            }
            Ok(Event::Text(ref e)) => {
                if in_version && let Some(p) = pending.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| NoticeError::invalid_xml(origin, err.to_string()))?;
                    p.version_text
                        .get_or_insert_with(String::new)
                        .push_str(&text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if in_version && let Some(p) = pending.as_mut() {
                    p.version_text
                        .get_or_insert_with(String::new)
                        .push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.local_name();
                if name.as_ref() == VERSION {
                    in_version = false;
                } else if name.as_ref() == PACKAGE_REFERENCE
                    && pending.as_ref().is_some_and(|p| p.depth == depth)
                    && let Some(reference) = pending.take()
                {
                    refs.extend(finish_reference(reference));
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => {
                // quick-xml does not report unclosed elements at EOF.
                if depth != 0 || !seen_root {
                    return Err(NoticeError::invalid_xml(
                        origin,
                        "unexpected end of document",
                    ));
                }
                break;
            }
            Err(e) => {
                return Err(NoticeError::invalid_xml(
                    origin,
                    format!("at position {}: {e}", reader.buffer_position()),
                ));
            }
            _ => {}
        }
    }

    Ok(refs)
}

/// Read the attributes of a `PackageReference` start tag.
fn start_reference(e: &BytesStart<'_>, depth: usize, origin: &str) -> Result<PendingReference> {
    let mut reference = PendingReference {
        depth,
        ..PendingReference::default()
    };

    for attr in e.attributes() {
        let attr = attr.map_err(|err| NoticeError::invalid_xml(origin, err.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|err| NoticeError::invalid_xml(origin, err.to_string()))?;
        match attr.key.local_name().as_ref() {
            b"Include" => reference.include = Some(value.into_owned()),
            b"Version" => reference.version_attr = Some(value.into_owned()),
            _ => {}
        }
    }

    Ok(reference)
}

/// Resolve a finished element into a package reference.
///
/// A present-but-empty `Version` attribute falls back to the child element,
/// matching how MSBuild treats an empty attribute as unset.
fn finish_reference(reference: PendingReference) -> Option<PackageRef> {
    let include = reference.include?;
    let version = reference
        .version_attr
        .filter(|v| !v.trim().is_empty())
        .or(reference.version_text)
        .unwrap_or_default();
    PackageRef::new(&include, &version)
}
