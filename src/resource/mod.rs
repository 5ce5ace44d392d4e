//! Merging generated assets into the project resource tree.
//!
//! - [`copy_tree`]: recursive merge with a [`ConflictPolicy`]
//! - [`remove_tree`]: cleanup of the intermediate output

mod copy;

pub use copy::{CopyStats, copy_tree, remove_tree};

use serde::Deserialize;

/// What to do when a generated file already exists at the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Replace the existing file.
    #[default]
    Overwrite,
    /// Leave the existing file untouched.
    Keep,
    /// Refuse to copy anything if any file exists.
    Error,
}
