//! Release placeholders in the CI workflow.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::PatchOutcome;

/// Default workflow location, relative to the working directory.
pub const DEFAULT_WORKFLOW: &str = ".github/workflows/build.yml";

const TAG_TOKEN: &str = "PakePlus-v0.0.1";
const RELEASE_NAME_TOKEN: &str = "PakePlus v0.0.1";
const RELEASE_BODY_TOKEN: &str = "PakePlus ReleaseBody";

/// Values substituted for the workflow placeholders. `None` leaves a token as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub tag_name: Option<String>,
    pub release_name: Option<String>,
    pub release_body: Option<String>,
}

impl ReleaseInfo {
    pub const fn is_empty(&self) -> bool {
        self.tag_name.is_none() && self.release_name.is_none() && self.release_body.is_none()
    }

    /// `(placeholder, value)` pairs in replacement order.
    fn substitutions(&self) -> [(&'static str, Option<&str>); 3] {
        [
            (TAG_TOKEN, self.tag_name.as_deref()),
            (RELEASE_NAME_TOKEN, self.release_name.as_deref()),
            (RELEASE_BODY_TOKEN, self.release_body.as_deref()),
        ]
    }
}

/// Replace every placeholder occurrence in `workflow`.
///
/// The file is rewritten only when its content changes.
pub fn update_build_workflow(workflow: &Path, release: &ReleaseInfo) -> Result<PatchOutcome> {
    if !workflow.exists() {
        return Ok(PatchOutcome::Missing(workflow.to_path_buf()));
    }

    let content = fs::read_to_string(workflow)
        .with_context(|| format!("failed to read `{}`", workflow.display()))?;
    let updated = apply_release(&content, release);

    if updated == content {
        return Ok(PatchOutcome::Unchanged(workflow.to_path_buf()));
    }

    fs::write(workflow, updated)
        .with_context(|| format!("failed to write `{}`", workflow.display()))?;
    Ok(PatchOutcome::Updated(workflow.to_path_buf()))
}

fn apply_release(content: &str, release: &ReleaseInfo) -> String {
    let mut out = content.to_string();
    for (token, value) in release.substitutions() {
        if let Some(value) = value {
            out = out.replace(token, value);
        }
    }
    out
}
