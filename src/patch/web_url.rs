//! Start URL passed to `webView.loadUrl(...)` in the main activity.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::{NoExpand, Regex};

use super::PatchOutcome;

/// `webView.loadUrl("...")` with a plain string literal argument.
static LOAD_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"webView\.loadUrl\("(?:[^"\\]|\\.)*"\)"#).expect("valid loadUrl regex"));

/// Default location of the activity source, relative to the parent of `res`.
pub const DEFAULT_MAIN_ACTIVITY: &str = "java/com/app/pakeplus/MainActivity.kt";

/// Main activity path for a resource directory: `<res_dir>/../<main_activity>`.
pub fn main_activity_path(res_dir: &Path, main_activity: &Path) -> PathBuf {
    res_dir
        .parent()
        .unwrap_or(res_dir)
        .join(main_activity)
}

/// Point the first `webView.loadUrl` call at `url`.
pub fn update_web_url(res_dir: &Path, main_activity: &Path, url: &str) -> Result<PatchOutcome> {
    let path = main_activity_path(res_dir, main_activity);
    if !path.exists() {
        return Ok(PatchOutcome::Missing(path));
    }

    let content =
        fs::read_to_string(&path).with_context(|| format!("failed to read `{}`", path.display()))?;

    let Some(updated) = replace_load_url(&content, url) else {
        return Ok(PatchOutcome::NoMatch(path));
    };
    if updated == content {
        return Ok(PatchOutcome::Unchanged(path));
    }

    fs::write(&path, updated).with_context(|| format!("failed to write `{}`", path.display()))?;
    Ok(PatchOutcome::Updated(path))
}

/// Replace the argument of the first `loadUrl` call; `None` if there is none.
fn replace_load_url(content: &str, url: &str) -> Option<String> {
    if !LOAD_URL.is_match(content) {
        return None;
    }
    let call = format!("webView.loadUrl(\"{}\")", escape_kotlin_string(url));
    // NoExpand: `$` in URLs is literal, not a capture reference
    Some(LOAD_URL.replacen(content, 1, NoExpand(call.as_str())).into_owned())
}

/// Escape text for a Kotlin string literal (`$` starts a template).
fn escape_kotlin_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '"' | '$') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
