//! Worker configuration (`ppconfig.json` or a `.toml` equivalent).
//!
//! # Example
//!
//! ```json
//! {
//!     "input": "app-icon.png",
//!     "output": "res",
//!     "copyTo": "app/src/main/res",
//!     "showName": "My App",
//!     "webUrl": "https://example.com",
//!     "tagName": "MyApp-v1.0.0",
//!     "releaseName": "MyApp v1.0.0",
//!     "releaseBody": "First release"
//! }
//! ```
//!
//! Optional keys with defaults:
//!
//! | Key            | Default                                  |
//! |----------------|------------------------------------------|
//! | `format`       | `"webp"` (or `"png"`)                    |
//! | `background`   | `"#FFFFFF"`                              |
//! | `onConflict`   | `"overwrite"` (or `"keep"`, `"error"`)   |
//! | `mainActivity` | `"java/com/app/pakeplus/MainActivity.kt"` |
//! | `workflow`     | `".github/workflows/build.yml"`          |

mod error;

pub use error::{ConfigDiagnostics, ConfigError};

use crate::{
    cli::{Cli, Commands},
    icon::{HexColor, IconFormat, IconOptions},
    log,
    patch::{ReleaseInfo, web_url::DEFAULT_MAIN_ACTIVITY, workflow::DEFAULT_WORKFLOW},
    resource::ConflictPolicy,
    utils::path::resolve_path,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Syntax of the config file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// `.toml` files are TOML, everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

// ============================================================================
// root configuration
// ============================================================================

/// Everything one worker run needs. Immutable after [`WorkerConfig::load`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerConfig {
    /// Source image for all icons.
    pub input: PathBuf,

    /// Intermediate directory the icons are generated into.
    pub output: PathBuf,

    /// Project resource directory the icons are merged into.
    pub copy_to: PathBuf,

    /// Display name written to `app_name`.
    #[serde(default)]
    pub show_name: Option<String>,

    /// Start URL written into the main activity.
    #[serde(default)]
    pub web_url: Option<String>,

    #[serde(default)]
    pub tag_name: Option<String>,

    #[serde(default)]
    pub release_name: Option<String>,

    #[serde(default)]
    pub release_body: Option<String>,

    #[serde(default)]
    pub format: IconFormat,

    /// Fill color of `ic_launcher_background`.
    #[serde(default)]
    pub background: HexColor,

    #[serde(default)]
    pub on_conflict: ConflictPolicy,

    /// Activity source, relative to the parent of `copyTo`.
    #[serde(default = "default_main_activity")]
    pub main_activity: PathBuf,

    /// CI workflow containing release placeholders.
    #[serde(default = "default_workflow")]
    pub workflow: PathBuf,
}

fn default_main_activity() -> PathBuf {
    PathBuf::from(DEFAULT_MAIN_ACTIVITY)
}

fn default_workflow() -> PathBuf {
    PathBuf::from(DEFAULT_WORKFLOW)
}

impl WorkerConfig {
    /// Load, normalize and validate the config named on the command line.
    ///
    /// Relative paths in the file resolve against the current directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = resolve_path(&cli.config, &cwd);

        let mut config = Self::from_path(&config_path)?;
        config.finalize(&cwd);

        if let Commands::Run { args } = &cli.command
            && let Some(policy) = args.on_conflict
        {
            config.on_conflict = policy;
        }

        config.validate(!matches!(cli.command, Commands::Patch))?;
        Ok(config)
    }

    /// Parse configuration from a string without normalization.
    #[cfg(test)]
    pub fn from_str(content: &str, format: ConfigFormat) -> Result<Self> {
        let (config, _) = Self::parse_with_ignored(content, format)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content, ConfigFormat::from_path(path))?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse content, collecting any unknown fields.
    fn parse_with_ignored(
        content: &str,
        format: ConfigFormat,
    ) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();

        let config: Self = match format {
            ConfigFormat::Json => {
                let mut deserializer = serde_json::Deserializer::from_str(content);
                let config = serde_ignored::deserialize(&mut deserializer, |path| {
                    ignored.push(path.to_string());
                })?;
                deserializer.end()?;
                config
            }
            ConfigFormat::Toml => {
                let deserializer = toml::Deserializer::new(content);
                serde_ignored::deserialize(deserializer, |path| {
                    ignored.push(path.to_string());
                })?
            }
        };
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    // ========================================================================
    // normalization
    // ========================================================================

    /// Resolve paths against `base` and drop blank optional strings.
    pub fn finalize(&mut self, base: &Path) {
        self.input = resolve_path(&self.input, base);
        self.output = resolve_path(&self.output, base);
        self.copy_to = resolve_path(&self.copy_to, base);
        self.workflow = resolve_path(&self.workflow, base);

        for value in [
            &mut self.show_name,
            &mut self.web_url,
            &mut self.tag_name,
            &mut self.release_name,
            &mut self.release_body,
        ] {
            if value.as_deref().is_some_and(|s| s.trim().is_empty()) {
                *value = None;
            }
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate normalized paths and values, reporting every problem at once.
    ///
    /// `check_input`: require the source image (not needed for patching only).
    pub fn validate(&self, check_input: bool) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        if check_input && !self.input.is_file() {
            diag.error(
                "input",
                format!("source image `{}` not found", self.input.display()),
            );
        }

        if self.copy_to.starts_with(&self.output) {
            diag.error_with_hint(
                "copyTo",
                format!(
                    "`{}` is inside the output directory `{}`",
                    self.copy_to.display(),
                    self.output.display()
                ),
                "the output directory is deleted after copying; use a separate directory",
            );
        }

        if let Some(url) = &self.web_url
            && let Err(err) = url::Url::parse(url)
        {
            diag.error_with_hint(
                "webUrl",
                format!("invalid url `{url}`: {err}"),
                "use an absolute url, e.g. https://example.com",
            );
        }

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    // ========================================================================
    // accessors
    // ========================================================================

    pub const fn icon_options(&self) -> IconOptions {
        IconOptions {
            format: self.format,
            background: self.background,
        }
    }

    pub fn release(&self) -> ReleaseInfo {
        ReleaseInfo {
            tag_name: self.tag_name.clone(),
            release_name: self.release_name.clone(),
            release_body: self.release_body.clone(),
        }
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

/// Parse a JSON config with the three required paths plus `extra` fields.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> WorkerConfig {
    let sep = if extra.is_empty() { "" } else { "," };
    let content =
        format!(r#"{{"input": "logo.png", "output": "out", "copyTo": "res"{sep}{extra}}}"#);
    let (parsed, ignored) = WorkerConfig::parse_with_ignored(&content, ConfigFormat::Json).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
