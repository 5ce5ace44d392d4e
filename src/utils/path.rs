//! Path normalization utilities.
//!
//! - `normalize_path` - file system paths (canonicalize + lexical fallback)
//! - `resolve_path` - tilde expansion, then normalize against a base directory
//! - `relative_display` - short form of a path for log lines

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// For paths that do not exist yet:
/// - Join with current directory if relative
/// - Drop `.` and fold `..` lexically
/// - Canonicalize the deepest existing ancestor and re-append the rest
///
/// Existing and not-yet-created paths thus compare with `starts_with`.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        };
        canonicalize_existing_prefix(&lexical_normalize(&absolute))
    })
}

/// Remove `.` and resolve `..` against preceding components, without I/O.
fn lexical_normalize(path: &Path) -> PathBuf {
    path.components().fold(PathBuf::new(), |mut out, component| {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = out.components().next_back();
                let at_root = matches!(last, Some(Component::RootDir | Component::Prefix(_)));
                if matches!(last, Some(Component::Normal(_))) {
                    out.pop();
                } else if !at_root {
                    out.push(component);
                }
            }
            _ => out.push(component),
        }
        out
    })
}

fn canonicalize_existing_prefix(path: &Path) -> PathBuf {
    for ancestor in path.ancestors().skip(1) {
        if let Ok(canonical) = ancestor.canonicalize()
            && let Ok(rest) = path.strip_prefix(ancestor)
        {
            return canonical.join(rest);
        }
    }
    path.to_path_buf()
}

/// Resolve a configured path against `base`.
///
/// `~` is expanded first; absolute paths ignore `base`.
///
/// # Example
/// ```ignore
/// let out = resolve_path(Path::new("res"), &cwd);          // <cwd>/res
/// let home = resolve_path(Path::new("~/logo.png"), &cwd);  // $HOME/logo.png
/// ```
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    let expanded = match path.to_str() {
        Some(raw) => PathBuf::from(shellexpand::tilde(raw).into_owned()),
        None => path.to_path_buf(),
    };

    if expanded.is_absolute() {
        normalize_path(&expanded)
    } else {
        normalize_path(&base.join(expanded))
    }
}

/// Path relative to `base` when possible, for log output.
pub fn relative_display(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
