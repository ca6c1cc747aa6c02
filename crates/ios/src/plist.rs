use anyhow::{Context, Result};
use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;

const SHORT_VERSION_KEY: &str = "CFBundleShortVersionString";
const BUNDLE_VERSION_KEY: &str = "CFBundleVersion";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetKey {
    ShortVersion,
    BundleVersion,
}

impl TargetKey {
    fn from_key_name(name: &str) -> Option<Self> {
        match name {
            SHORT_VERSION_KEY => Some(Self::ShortVersion),
            BUNDLE_VERSION_KEY => Some(Self::BundleVersion),
            _ => None,
        }
    }
}

/// Values of the two version keys in an Info.plist document.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PlistVersions {
    pub short_version: Option<String>,
    pub bundle_version: Option<String>,
}

/// Read the version keys out of plist XML without altering anything.
///
/// A `<key>` only counts when its value is the immediately following
/// `<string>` element, so identically-named text elsewhere cannot match.
///
/// # Errors
/// Returns error if the document is not well-formed XML.
pub fn read_plist_versions(content: &str) -> Result<PlistVersions> {
    let mut reader = Reader::from_str(content);
    let mut buf = Vec::new();

    let mut versions = PlistVersions::default();
    let mut in_key = false;
    let mut key_name = String::new();
    let mut pending: Option<TargetKey> = None;
    let mut reading: Option<TargetKey> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"key" => in_key = true,
                b"string" => reading = pending.take(),
                _ => pending = None,
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"key" => {
                    in_key = false;
                    pending = TargetKey::from_key_name(&key_name);
                    key_name.clear();
                }
                b"string" => reading = None,
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_key {
                    key_name = String::from_utf8_lossy(&e).into_owned();
                } else if let Some(target) = reading {
                    let value = String::from_utf8_lossy(&e).into_owned();
                    match target {
                        TargetKey::ShortVersion => versions.short_version = Some(value),
                        TargetKey::BundleVersion => versions.bundle_version = Some(value),
                    }
                }
            }
            Ok(Event::Empty(_)) => pending = None,
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(anyhow::anyhow!("XML parsing error: {e}")),
        }
        buf.clear();
    }

    Ok(versions)
}

/// Rewrite the plist with both version keys set, streaming every event back
/// out so that all other keys stay byte-identical.
///
/// Returns `Ok(None)` when either key is missing; the document is then left
/// for the caller to skip, never half-updated.
///
/// # Errors
/// Returns error if the document is not well-formed XML.
pub fn update_plist_versions(
    content: &str,
    short_version: &str,
    bundle_version: &str,
) -> Result<Option<String>> {
    let mut reader = Reader::from_str(content);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let mut buf = Vec::new();

    let mut in_key = false;
    let mut key_name = String::new();
    let mut pending: Option<TargetKey> = None;
    let mut replacing: Option<TargetKey> = None;
    let mut replaced_short = false;
    let mut replaced_bundle = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                match e.local_name().as_ref() {
                    b"key" => in_key = true,
                    b"string" => replacing = pending.take(),
                    _ => pending = None,
                }
                writer.write_event(Event::Start(e.clone()))?;
                // Emit the replacement right after the opening tag so even an
                // empty <string></string> value gets one
                if let Some(target) = replacing {
                    match target {
                        TargetKey::ShortVersion => {
                            writer.write_event(Event::Text(BytesText::new(short_version)))?;
                            replaced_short = true;
                        }
                        TargetKey::BundleVersion => {
                            writer.write_event(Event::Text(BytesText::new(bundle_version)))?;
                            replaced_bundle = true;
                        }
                    }
                }
            }
            Ok(Event::End(e)) => {
                match e.local_name().as_ref() {
                    b"key" => {
                        in_key = false;
                        pending = TargetKey::from_key_name(&key_name);
                        key_name.clear();
                    }
                    b"string" => replacing = None,
                    _ => {}
                }
                writer.write_event(Event::End(e.clone()))?;
            }
            Ok(Event::Text(e)) => {
                if in_key {
                    key_name = String::from_utf8_lossy(&e).into_owned();
                    writer.write_event(Event::Text(e.clone()))?;
                } else if replacing.is_none() {
                    writer.write_event(Event::Text(e.clone()))?;
                }
                // Original text of a replaced value is dropped
            }
            Ok(Event::Empty(e)) => {
                pending = None;
                writer.write_event(Event::Empty(e.clone()))?;
            }
            Ok(Event::Comment(e)) => {
                writer.write_event(Event::Comment(e.clone()))?;
            }
            Ok(Event::CData(e)) => {
                writer.write_event(Event::CData(e.clone()))?;
            }
            Ok(Event::Decl(e)) => {
                writer.write_event(Event::Decl(e.clone()))?;
            }
            Ok(Event::PI(e)) => {
                writer.write_event(Event::PI(e.clone()))?;
            }
            Ok(Event::DocType(e)) => {
                writer.write_event(Event::DocType(e.clone()))?;
            }
            Ok(Event::GeneralRef(e)) => {
                writer.write_event(Event::GeneralRef(e.clone()))?;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(anyhow::anyhow!("XML parsing error: {e}")),
        }
        buf.clear();
    }

    if !(replaced_short && replaced_bundle) {
        return Ok(None);
    }

    let result = writer.into_inner().into_inner();
    String::from_utf8(result)
        .context("Failed to convert XML to UTF-8")
        .map(Some)
}
