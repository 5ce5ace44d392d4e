//! Worker pipeline orchestration.
//!
//! Phases of a full run:
//! - **Icons** - Render every density + adaptive descriptors into `output`
//! - **Copy** - Merge `output` into `copyTo`
//! - **App name** - Patch `values/strings.xml` (if `showName` is set)
//! - **Web url** - Patch the main activity (if `webUrl` is set)
//! - **Cleanup** - Remove `output`
//! - **Workflow** - Patch release placeholders (if any release field is set)
//!
//! Icons, copy and cleanup failures abort the run. Patch failures are logged
//! and the remaining phases continue.

use anyhow::Result;

use crate::{
    config::WorkerConfig,
    debug,
    icon::generate_adaptive_icons,
    logger::{status_error, status_success, status_warning},
    patch::{self, PatchOutcome},
    resource::{CopyStats, copy_tree, remove_tree},
    utils::path::relative_display,
};

/// Command-line switches that are not part of the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Skip removal of the generated output directory.
    pub keep_output: bool,
}

/// Summary of what a run did.
#[derive(Debug, Default)]
pub struct RunReport {
    pub icons: usize,
    pub copy: CopyStats,
    pub patches: Vec<(&'static str, PatchOutcome)>,
    /// Patches that returned an error.
    pub failed: Vec<&'static str>,
}

impl RunReport {
    /// Closing line for the whole run; failed patches are listed by name.
    pub fn print_summary(&self) {
        let written = self.patches.iter().filter(|(_, o)| o.is_written()).count();
        let mut parts = Vec::new();
        if self.icons > 0 {
            parts.push(format!("{} icon files", self.icons));
        }
        if self.copy.copied > 0 {
            parts.push(format!("{} copied", self.copy.copied));
        }
        parts.push(format!("{written} patched"));

        if self.failed.is_empty() {
            status_success("worker", &format!("success: {}", parts.join(", ")));
        } else {
            status_warning(
                "worker",
                &format!(
                    "finished with {} failed patch(es): {}",
                    self.failed.len(),
                    self.failed.join(", ")
                ),
            );
        }
    }

    fn record(&mut self, name: &'static str, module: &str, result: Result<PatchOutcome>, done: &str) {
        match result {
            Ok(outcome) => {
                report_outcome(module, &outcome, done);
                self.patches.push((name, outcome));
            }
            Err(err) => {
                status_error(module, &format!("failed to update {name}"), &format!("{err:#}"));
                self.failed.push(name);
            }
        }
    }
}

fn report_outcome(module: &str, outcome: &PatchOutcome, done: &str) {
    match outcome {
        PatchOutcome::Created(path) => {
            status_success(module, &format!("{done} (created {})", path.display()))
        }
        PatchOutcome::Updated(_) => status_success(module, done),
        PatchOutcome::Unchanged(path) => {
            crate::log!(module; "no changes needed in {}", path.display())
        }
        PatchOutcome::NoMatch(path) => status_warning(
            module,
            &format!("nothing to patch in {}, left unchanged", path.display()),
        ),
        PatchOutcome::Missing(path) => {
            status_warning(module, &format!("{} not found, skipping", path.display()))
        }
    }
}

/// Full pipeline: icons → copy → patches → cleanup.
pub fn run(config: &WorkerConfig, options: RunOptions) -> Result<RunReport> {
    let mut report = RunReport {
        icons: generate_icons(config)?,
        ..RunReport::default()
    };

    report.copy = copy_tree(&config.output, &config.copy_to, config.on_conflict)?;
    let mut copied = format!(
        "{} files copied to {}",
        report.copy.copied,
        config.copy_to.display()
    );
    if report.copy.skipped > 0 {
        copied.push_str(&format!(" ({} existing kept)", report.copy.skipped));
    }
    status_success("copy", &copied);

    patch_app_name(config, &mut report);
    patch_web_url(config, &mut report);

    if options.keep_output {
        debug!("copy"; "keeping {}", config.output.display());
    } else {
        remove_tree(&config.output)?;
        debug!("copy"; "removed {}", config.output.display());
    }

    patch_workflow(config, &mut report);
    Ok(report)
}

/// Icons only, left in the output directory.
pub fn run_icons(config: &WorkerConfig) -> Result<RunReport> {
    Ok(RunReport {
        icons: generate_icons(config)?,
        ..RunReport::default()
    })
}

/// Text patches only, against the existing destination tree.
pub fn run_patches(config: &WorkerConfig) -> RunReport {
    let mut report = RunReport::default();
    patch_app_name(config, &mut report);
    patch_web_url(config, &mut report);
    patch_workflow(config, &mut report);
    report
}

fn generate_icons(config: &WorkerConfig) -> Result<usize> {
    let set = generate_adaptive_icons(&config.input, &config.output, &config.icon_options())?;
    let cwd = std::env::current_dir().unwrap_or_default();
    status_success(
        "icons",
        &format!(
            "{} files generated in {} ({})",
            set.files.len(),
            relative_display(&config.output, &cwd),
            config.format.extension()
        ),
    );
    Ok(set.files.len())
}

fn patch_app_name(config: &WorkerConfig, report: &mut RunReport) {
    let Some(name) = &config.show_name else {
        debug!("patch"; "showName not set, skipping app name");
        return;
    };
    let result = patch::update_app_name(&config.copy_to, name);
    report.record("app name", "patch", result, &format!("app name set to: {name}"));
}

fn patch_web_url(config: &WorkerConfig, report: &mut RunReport) {
    let Some(url) = &config.web_url else {
        debug!("patch"; "webUrl not set, skipping web url");
        return;
    };
    let result = patch::update_web_url(&config.copy_to, &config.main_activity, url);
    report.record("web url", "patch", result, &format!("web url set to: {url}"));
}

fn patch_workflow(config: &WorkerConfig, report: &mut RunReport) {
    let release = config.release();
    if release.is_empty() {
        debug!("patch"; "no release fields set, skipping workflow");
        return;
    }
    let result = patch::update_build_workflow(&config.workflow, &release);
    let done = match &release.tag_name {
        Some(tag) => format!("workflow updated for {tag}"),
        None => "workflow updated".to_string(),
    };
    report.record("build workflow", "patch", result, &done);
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    use super::*;
    use crate::config::ConfigFormat;
    use crate::icon::{DENSITIES, IconLayer, adaptive::ANYDPI_DIR};
    use crate::patch::web_url::{DEFAULT_MAIN_ACTIVITY, main_activity_path};

    /// Project skeleton:
    /// ```text
    /// logo.png
    /// app/src/main/res/                       ← copyTo
    /// app/src/main/java/.../MainActivity.kt
    /// build.yml
    /// ```
    fn setup_project(root: &Path) {
        RgbaImage::from_pixel(64, 64, Rgba([200, 30, 30, 255]))
            .save(root.join("logo.png"))
            .unwrap();

        let res = root.join("app/src/main/res");
        fs::create_dir_all(&res).unwrap();
        let activity = main_activity_path(&res, Path::new(DEFAULT_MAIN_ACTIVITY));
        fs::create_dir_all(activity.parent().unwrap()).unwrap();
        fs::write(&activity, "webView.loadUrl(\"https://old.example\")\n").unwrap();

        fs::write(
            root.join("build.yml"),
            "tag_name: PakePlus-v0.0.1\nname: PakePlus v0.0.1\nbody: PakePlus ReleaseBody\n",
        )
        .unwrap();
    }

    fn load_config(root: &Path, extra: &str) -> WorkerConfig {
        let content = format!(
            r#"{{"input": "logo.png", "output": "gen", "copyTo": "app/src/main/res",
                "workflow": "build.yml"{extra}}}"#
        );
        let mut config = WorkerConfig::from_str(&content, ConfigFormat::Json).unwrap();
        config.finalize(root);
        config.validate(true).unwrap();
        config
    }

    fn relative_files(root: &Path) -> Vec<PathBuf> {
        fn walk(dir: &Path, root: &Path, out: &mut Vec<PathBuf>) {
            for entry in fs::read_dir(dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    walk(&path, root, out);
                } else {
                    out.push(path.strip_prefix(root).unwrap().to_path_buf());
                }
            }
        }
        let mut files = Vec::new();
        walk(root, root, &mut files);
        files.sort();
        files
    }

    fn expected_icon_paths() -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = DENSITIES
            .iter()
            .flat_map(|density| {
                IconLayer::ALL.iter().map(move |layer| {
                    PathBuf::from(density.dir_name()).join(layer.file_name(Default::default()))
                })
            })
            .collect();
        paths.push(PathBuf::from(ANYDPI_DIR).join("ic_launcher.xml"));
        paths.push(PathBuf::from(ANYDPI_DIR).join("ic_launcher_round.xml"));
        paths.sort();
        paths
    }

    #[test]
    fn test_icons_only_produces_22_files() {
        let dir = TempDir::new().unwrap();
        setup_project(dir.path());
        let config = load_config(dir.path(), "");

        let report = run_icons(&config).unwrap();

        assert_eq!(report.icons, 22);
        assert_eq!(relative_files(&config.output), expected_icon_paths());
    }

    #[test]
    fn test_full_run() {
        let dir = TempDir::new().unwrap();
        setup_project(dir.path());
        let config = load_config(
            dir.path(),
            r#", "showName": "Demo", "webUrl": "https://new.example",
               "tagName": "Demo-v1", "releaseName": "Demo v1", "releaseBody": "Hello""#,
        );

        let report = run(&config, RunOptions::default()).unwrap();

        assert_eq!(report.icons, 22);
        assert_eq!(report.copy, CopyStats { copied: 22, skipped: 0 });
        assert!(report.failed.is_empty());
        assert_eq!(report.patches.len(), 3);
        assert!(report.patches.iter().all(|(_, outcome)| outcome.is_written()));

        // Output removed, destination holds the icons plus the new string table.
        assert!(!config.output.exists());
        let mut expected = expected_icon_paths();
        expected.push(PathBuf::from("values/strings.xml"));
        expected.sort();
        assert_eq!(relative_files(&config.copy_to), expected);

        let strings = fs::read_to_string(config.copy_to.join("values/strings.xml")).unwrap();
        assert!(strings.contains("<string name=\"app_name\">Demo</string>"));

        let activity = main_activity_path(&config.copy_to, &config.main_activity);
        assert_eq!(
            fs::read_to_string(activity).unwrap(),
            "webView.loadUrl(\"https://new.example\")\n"
        );

        assert_eq!(
            fs::read_to_string(&config.workflow).unwrap(),
            "tag_name: Demo-v1\nname: Demo v1\nbody: Hello\n"
        );
    }

    #[test]
    fn test_keep_output() {
        let dir = TempDir::new().unwrap();
        setup_project(dir.path());
        let config = load_config(dir.path(), "");

        let report = run(&config, RunOptions { keep_output: true }).unwrap();

        assert!(report.patches.is_empty());
        assert_eq!(relative_files(&config.output), expected_icon_paths());
    }

    #[test]
    fn test_patch_failure_does_not_abort() {
        let dir = TempDir::new().unwrap();
        setup_project(dir.path());
        let config = load_config(
            dir.path(),
            r#", "showName": "Demo", "webUrl": "https://new.example", "tagName": "Demo-v1""#,
        );
        // A string table without a root element cannot be patched.
        let values = config.copy_to.join("values");
        fs::create_dir_all(&values).unwrap();
        fs::write(values.join("strings.xml"), "garbage").unwrap();

        let report = run(&config, RunOptions::default()).unwrap();

        assert_eq!(report.failed, vec!["app name"]);
        let names: Vec<_> = report.patches.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["web url", "build workflow"]);
        assert!(!config.output.exists());
        report.print_summary();
    }

    #[test]
    fn test_copy_conflict_is_fatal() {
        let dir = TempDir::new().unwrap();
        setup_project(dir.path());
        let config = load_config(dir.path(), r#", "onConflict": "error", "showName": "Demo""#);
        let existing = config.copy_to.join("mipmap-mdpi");
        fs::create_dir_all(&existing).unwrap();
        fs::write(existing.join("ic_launcher.webp"), b"old").unwrap();

        assert!(run(&config, RunOptions::default()).is_err());
        // Nothing after the copy ran.
        assert!(!config.copy_to.join("values/strings.xml").exists());
    }

    #[test]
    fn test_patches_only() {
        let dir = TempDir::new().unwrap();
        setup_project(dir.path());
        let config = load_config(dir.path(), r#", "showName": "Only Patch""#);

        let report = run_patches(&config);

        assert_eq!(report.icons, 0);
        assert!(!config.output.exists());
        assert!(matches!(
            report.patches.as_slice(),
            [("app name", PatchOutcome::Created(_))]
        ));
    }
}
