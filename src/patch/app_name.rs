//! `app_name` entry in the Android string table.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use super::{PatchError, PatchOutcome};

/// Opening tag of the `app_name` element, other attributes on either side allowed.
static APP_NAME_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<string[ \t\r\n](?:[^>]*?[ \t\r\n])?name=(?:"app_name"|'app_name')[^>]*>"#)
        .expect("valid app_name regex")
});

const CLOSE_STRING: &str = "</string>";
const CLOSE_RESOURCES: &str = "</resources>";

/// Location of the string table inside a resource directory.
pub fn strings_path(res_dir: &Path) -> PathBuf {
    res_dir.join("values").join("strings.xml")
}

/// Set `app_name` in `<res_dir>/values/strings.xml`, creating the file if needed.
pub fn update_app_name(res_dir: &Path, name: &str) -> Result<PatchOutcome> {
    let path = strings_path(res_dir);
    let value = escape_string_resource(name);

    if !path.exists() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory `{}`", parent.display()))?;
        }
        fs::write(&path, new_string_table(&value))
            .with_context(|| format!("failed to write `{}`", path.display()))?;
        return Ok(PatchOutcome::Created(path));
    }

    let content =
        fs::read_to_string(&path).with_context(|| format!("failed to read `{}`", path.display()))?;
    let updated = set_app_name(&content, &value).map_err(|kind| kind.at(&path))?;

    if updated == content {
        return Ok(PatchOutcome::Unchanged(path));
    }
    fs::write(&path, updated).with_context(|| format!("failed to write `{}`", path.display()))?;
    Ok(PatchOutcome::Updated(path))
}

fn new_string_table(value: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <resources>\n    \
         <string name=\"app_name\">{value}</string>\n\
         </resources>\n"
    )
}

#[derive(Debug, PartialEq, Eq)]
enum Malformed {
    NoRoot,
    Unterminated,
}

impl Malformed {
    fn at(self, path: &Path) -> PatchError {
        match self {
            Self::NoRoot => PatchError::MalformedStringTable(path.to_path_buf()),
            Self::Unterminated => PatchError::UnterminatedEntry(path.to_path_buf()),
        }
    }
}

/// Replace the first `app_name` value, or insert one before `</resources>`.
///
/// `value` must already be escaped.
fn set_app_name(content: &str, value: &str) -> Result<String, Malformed> {
    if let Some(open) = APP_NAME_OPEN.find(content) {
        let tag = open.as_str();

        // <string name="app_name"/>: expand into a full element
        if tag.ends_with("/>") {
            let full = format!("{}>{value}{CLOSE_STRING}", tag[..tag.len() - 2].trim_end());
            return Ok(splice(content, open.start(), open.end(), &full));
        }

        let value_start = open.end();
        let value_end = content[value_start..]
            .find(CLOSE_STRING)
            .map(|offset| value_start + offset)
            .ok_or(Malformed::Unterminated)?;
        return Ok(splice(content, value_start, value_end, value));
    }

    let close = content.rfind(CLOSE_RESOURCES).ok_or(Malformed::NoRoot)?;
    let entry = format!("    <string name=\"app_name\">{value}{CLOSE_STRING}\n");
    Ok(splice(content, close, close, &entry))
}

fn splice(content: &str, start: usize, end: usize, replacement: &str) -> String {
    let mut out = String::with_capacity(content.len() - (end - start) + replacement.len());
    out.push_str(&content[..start]);
    out.push_str(replacement);
    out.push_str(&content[end..]);
    out
}

/// Escape text for an Android `<string>` resource.
///
/// XML special characters become entities; quotes and backslashes get the
/// backslash escapes aapt expects; a leading `@` or `?` would otherwise be
/// read as a resource reference.
pub fn escape_string_resource(raw: &str) -> String {
    let xml: Cow<'_, str> = quick_xml::escape::partial_escape(raw);

    let mut out = String::with_capacity(xml.len() + 2);
    if xml.starts_with('@') || xml.starts_with('?') {
        out.push('\\');
    }
    for ch in xml.chars() {
        match ch {
            '\\' | '\'' | '"' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}
