use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::ConflictPolicy;
use crate::debug;

#[derive(Debug, Error)]
pub enum CopyError {
    #[error("source directory `{0}` does not exist")]
    MissingSource(PathBuf),

    #[error("{} file(s) already exist in `{}`: {}", .conflicts.len(), .dest.display(), format_paths(.conflicts))]
    Conflicts {
        dest: PathBuf,
        conflicts: Vec<PathBuf>,
    },
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result of a merge copy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopyStats {
    pub copied: usize,
    /// Existing destination files left alone under [`ConflictPolicy::Keep`].
    pub skipped: usize,
}

/// Recursively merge `src` into `dest`.
///
/// Files in `dest` without a counterpart in `src` are never touched.
/// With [`ConflictPolicy::Error`] all conflicts are collected before the
/// first write, so a refused copy leaves `dest` unchanged.
pub fn copy_tree(src: &Path, dest: &Path, policy: ConflictPolicy) -> Result<CopyStats> {
    if !src.is_dir() {
        return Err(CopyError::MissingSource(src.to_path_buf()).into());
    }

    let mut files = Vec::new();
    collect_relative_files(src, Path::new(""), &mut files)?;
    files.sort();

    if policy == ConflictPolicy::Error {
        let conflicts: Vec<PathBuf> = files
            .iter()
            .filter(|rel| dest.join(rel).exists())
            .cloned()
            .collect();
        if !conflicts.is_empty() {
            return Err(CopyError::Conflicts {
                dest: dest.to_path_buf(),
                conflicts,
            }
            .into());
        }
    }

    let mut stats = CopyStats::default();
    for rel in &files {
        let from = src.join(rel);
        let to = dest.join(rel);

        if policy == ConflictPolicy::Keep && to.exists() {
            debug!("copy"; "keeping existing {}", rel.display());
            stats.skipped += 1;
            continue;
        }

        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory `{}`", parent.display()))?;
        }
        fs::copy(&from, &to).with_context(|| {
            format!("failed to copy `{}` to `{}`", from.display(), to.display())
        })?;
        stats.copied += 1;
    }

    Ok(stats)
}

/// Collect file paths under `dir`, relative to the copy root.
fn collect_relative_files(dir: &Path, rel: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read `{}`", dir.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("invalid entry in `{}`", dir.display()))?;
        let path = entry.path();
        let rel_path = rel.join(entry.file_name());

        if path.is_dir() {
            collect_relative_files(&path, &rel_path, out)?;
        } else {
            out.push(rel_path);
        }
    }
    Ok(())
}

/// Delete `path` and everything below it. Missing paths are ignored.
pub fn remove_tree(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    fs::remove_dir_all(path).with_context(|| format!("failed to remove `{}`", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// `src/{a.txt, nested/b.txt, nested/deeper/c.txt}`
    fn setup_source(root: &Path) -> PathBuf {
        let src = root.join("src");
        fs::create_dir_all(src.join("nested/deeper")).unwrap();
        fs::write(src.join("a.txt"), "a-new").unwrap();
        fs::write(src.join("nested/b.txt"), "b-new").unwrap();
        fs::write(src.join("nested/deeper/c.txt"), "c-new").unwrap();
        src
    }

    fn relative_files(root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        collect_relative_files(root, Path::new(""), &mut files).unwrap();
        files.sort();
        files
    }

    #[test]
    fn test_copy_into_empty_destination() {
        let dir = TempDir::new().unwrap();
        let src = setup_source(dir.path());
        let dest = dir.path().join("dest");

        let stats = copy_tree(&src, &dest, ConflictPolicy::Overwrite).unwrap();

        assert_eq!(stats, CopyStats { copied: 3, skipped: 0 });
        assert_eq!(relative_files(&src), relative_files(&dest));
        assert_eq!(fs::read_to_string(dest.join("nested/deeper/c.txt")).unwrap(), "c-new");
    }

    #[test]
    fn test_overwrite_replaces_and_merges() {
        let dir = TempDir::new().unwrap();
        let src = setup_source(dir.path());
        let dest = dir.path().join("dest");
        fs::create_dir_all(dest.join("nested")).unwrap();
        fs::write(dest.join("a.txt"), "a-old").unwrap();
        fs::write(dest.join("nested/unrelated.txt"), "keep me").unwrap();

        copy_tree(&src, &dest, ConflictPolicy::Overwrite).unwrap();

        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "a-new");
        assert_eq!(
            fs::read_to_string(dest.join("nested/unrelated.txt")).unwrap(),
            "keep me"
        );
    }

    #[test]
    fn test_keep_preserves_existing() {
        let dir = TempDir::new().unwrap();
        let src = setup_source(dir.path());
        let dest = dir.path().join("dest");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("a.txt"), "a-old").unwrap();

        let stats = copy_tree(&src, &dest, ConflictPolicy::Keep).unwrap();

        assert_eq!(stats, CopyStats { copied: 2, skipped: 1 });
        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "a-old");
        assert!(dest.join("nested/b.txt").exists());
    }

    #[test]
    fn test_error_policy_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let src = setup_source(dir.path());
        let dest = dir.path().join("dest");
        fs::create_dir_all(dest.join("nested")).unwrap();
        fs::write(dest.join("nested/b.txt"), "b-old").unwrap();

        let err = copy_tree(&src, &dest, ConflictPolicy::Error).unwrap_err();

        match err.downcast_ref::<CopyError>() {
            Some(CopyError::Conflicts { conflicts, .. }) => {
                assert_eq!(conflicts, &vec![PathBuf::from("nested/b.txt")]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!dest.join("a.txt").exists());
        assert_eq!(fs::read_to_string(dest.join("nested/b.txt")).unwrap(), "b-old");
    }

    #[test]
    fn test_missing_source_fails() {
        let dir = TempDir::new().unwrap();
        let err = copy_tree(
            &dir.path().join("missing"),
            &dir.path().join("dest"),
            ConflictPolicy::Overwrite,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CopyError>(),
            Some(CopyError::MissingSource(_))
        ));
    }

    #[test]
    fn test_remove_tree() {
        let dir = TempDir::new().unwrap();
        let src = setup_source(dir.path());

        remove_tree(&src).unwrap();
        assert!(!src.exists());
        // Second removal is a no-op.
        remove_tree(&src).unwrap();
    }
}
