//! Adaptive-icon descriptors for API 26+.
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <adaptive-icon xmlns:android="http://schemas.android.com/apk/res/android">
//!     <background android:drawable="@mipmap/ic_launcher_background"/>
//!     <foreground android:drawable="@mipmap/ic_launcher_foreground"/>
//! </adaptive-icon>
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use super::IconLayer;

/// Directory holding the descriptors, relative to the output root.
pub const ANYDPI_DIR: &str = "mipmap-anydpi-v26";

/// Launcher and round launcher share one descriptor body.
pub const DESCRIPTOR_FILES: [&str; 2] = ["ic_launcher.xml", "ic_launcher_round.xml"];

const ANDROID_NS: &str = "http://schemas.android.com/apk/res/android";

/// Serialize the adaptive-icon descriptor.
pub fn adaptive_icon_xml() -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("adaptive-icon").with_attributes([("xmlns:android", ANDROID_NS)]),
    ))?;
    for (element, layer) in [
        ("background", IconLayer::Background),
        ("foreground", IconLayer::Foreground),
    ] {
        let drawable = format!("@mipmap/{}", layer.resource_name());
        writer.write_event(Event::Empty(
            BytesStart::new(element).with_attributes([("android:drawable", drawable.as_str())]),
        ))?;
    }
    writer.write_event(Event::End(BytesEnd::new("adaptive-icon")))?;

    let mut xml = writer.into_inner();
    xml.push(b'\n');
    Ok(xml)
}

/// Write both descriptors under `<output>/mipmap-anydpi-v26/`.
pub fn write_adaptive_descriptors(output: &Path) -> Result<Vec<PathBuf>> {
    let dir = output.join(ANYDPI_DIR);
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create directory `{}`", dir.display()))?;

    let xml = adaptive_icon_xml()?;
    DESCRIPTOR_FILES
        .iter()
        .map(|name| {
            let path = dir.join(name);
            fs::write(&path, &xml)
                .with_context(|| format!("failed to write `{}`", path.display()))?;
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use quick_xml::Reader;
    use tempfile::TempDir;

    use super::*;

    /// Parse `xml` fully, returning `(element, android:drawable)` pairs.
    fn parse_layers(xml: &[u8]) -> Vec<(String, Option<String>)> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();
        let mut layers = Vec::new();
        loop {
            match reader.read_event_into(&mut buf).unwrap() {
                Event::Eof => break,
                Event::Start(e) | Event::Empty(e) => {
                    let name = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                    let drawable = e
                        .try_get_attribute("android:drawable")
                        .unwrap()
                        .map(|attr| String::from_utf8(attr.value.to_vec()).unwrap());
                    layers.push((name, drawable));
                }
                _ => {}
            }
            buf.clear();
        }
        layers
    }

    #[test]
    fn test_descriptor_is_well_formed() {
        let xml = adaptive_icon_xml().unwrap();
        let layers = parse_layers(&xml);
        assert_eq!(
            layers,
            vec![
                ("adaptive-icon".to_string(), None),
                (
                    "background".to_string(),
                    Some("@mipmap/ic_launcher_background".to_string())
                ),
                (
                    "foreground".to_string(),
                    Some("@mipmap/ic_launcher_foreground".to_string())
                ),
            ]
        );
    }

    #[test]
    fn test_descriptor_text() {
        let xml = String::from_utf8(adaptive_icon_xml().unwrap()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains(
            "<adaptive-icon xmlns:android=\"http://schemas.android.com/apk/res/android\">"
        ));
        assert!(xml.trim_end().ends_with("</adaptive-icon>"));
    }

    #[test]
    fn test_written_descriptors_are_identical() {
        let dir = TempDir::new().unwrap();
        let paths = write_adaptive_descriptors(dir.path()).unwrap();

        let anydpi = dir.path().join(ANYDPI_DIR);
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.parent() == Some(anydpi.as_path())));
        let first = fs::read(&paths[0]).unwrap();
        let second = fs::read(&paths[1]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_is_idempotent() {
        let dir = TempDir::new().unwrap();
        write_adaptive_descriptors(dir.path()).unwrap();
        write_adaptive_descriptors(dir.path()).unwrap();
    }
}
