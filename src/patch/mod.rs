//! In-place text patches applied to the target project.
//!
//! | Module     | File                                   | Replacement          |
//! |------------|----------------------------------------|----------------------|
//! | `app_name` | `<res>/values/strings.xml`             | first `app_name`     |
//! | `web_url`  | `<res>/../java/…/MainActivity.kt`      | first `loadUrl("…")` |
//! | `workflow` | `.github/workflows/build.yml`          | every placeholder    |
//!
//! Patchers return `Err` on I/O or malformed input; the caller decides
//! whether that is fatal.

pub mod app_name;
pub mod web_url;
pub mod workflow;

pub use app_name::update_app_name;
pub use web_url::update_web_url;
pub use workflow::{ReleaseInfo, update_build_workflow};

use std::path::PathBuf;
use thiserror::Error;

/// What a patcher did to its target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Target did not exist and was created.
    Created(PathBuf),
    /// Target was rewritten with new content.
    Updated(PathBuf),
    /// Target exists but nothing needed to change; not rewritten.
    Unchanged(PathBuf),
    /// Target exists but has nothing the patcher recognizes; not rewritten.
    NoMatch(PathBuf),
    /// Target does not exist; nothing was done.
    Missing(PathBuf),
}

impl PatchOutcome {
    /// Whether the file on disk was written.
    pub const fn is_written(&self) -> bool {
        matches!(self, Self::Created(_) | Self::Updated(_))
    }
}

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("`{0}` has no `app_name` entry and no closing `</resources>` tag")]
    MalformedStringTable(PathBuf),

    #[error("unterminated `app_name` entry in `{0}`")]
    UnterminatedEntry(PathBuf),
}
