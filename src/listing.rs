//! Directory listing for the file browser.
//!
//! Produces the ordered entry list the browser navigates:
//! 1. a synthetic `..` pointing at the parent, unless at a filesystem root
//! 2. directories, sorted case-insensitively
//! 3. regular files, sorted case-insensitively, optionally restricted to a
//!    set of extensions
//!
//! Hidden entries (leading `.`) are skipped. Read-only: nothing is written.

use std::env;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

/// Name of the synthetic parent entry.
pub const PARENT: &str = "..";

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Display name (file name, or `..`).
    pub name: String,
    /// Full path the entry resolves to.
    pub path: PathBuf,
    pub is_dir: bool,
}

impl Entry {
    pub fn is_parent(&self) -> bool {
        self.name == PARENT
    }
}

// ============================================================================
// PURE FUNCTIONS
// ============================================================================

/// True when `dir` has no parent (`/`, `C:\`).
pub fn is_root(dir: &Path) -> bool {
    dir.parent().is_none()
}

/// True when `name` has one of the `allowed` extensions.
///
/// Extensions compare case-insensitively and may be given with or without
/// the leading dot. An empty allow-list accepts everything.
pub fn extension_allowed(name: &str, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }
    let Some(ext) = Path::new(name).extension().and_then(|e| e.to_str()) else {
        return false;
    };
    allowed
        .iter()
        .any(|a| a.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

/// Anchor a relative `dir` at `base`. `.` components are dropped, `..` is
/// kept for the filesystem to resolve.
pub fn absolute_from(dir: &Path, base: &Path) -> PathBuf {
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    base.join(dir)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

// ============================================================================
// EFFECT FUNCTIONS
// ============================================================================

/// Anchor a relative `dir` at the working directory.
///
/// Left unchanged when the working directory cannot be read.
pub fn absolute(dir: &Path) -> PathBuf {
    match env::current_dir() {
        Ok(cwd) => absolute_from(dir, &cwd),
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "working directory unavailable");
            dir.to_path_buf()
        }
    }
}

/// List `dir` in browser order. Entry paths are absolute.
///
/// An unreadable directory lists only its `..` entry so the operator can
/// always navigate back out.
pub fn read_entries(dir: &Path, allowed: &[String]) -> Vec<Entry> {
    let dir = absolute(dir);
    let mut entries = Vec::new();

    if let Some(parent) = dir.parent() {
        entries.push(Entry {
            name: PARENT.to_string(),
            path: parent.to_path_buf(),
            is_dir: true,
        });
    }

    match list_children(&dir, allowed) {
        Ok((dirs, files)) => {
            entries.extend(dirs);
            entries.extend(files);
        }
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "directory unreadable");
        }
    }

    entries
}

/// Partition the visible children of `dir` into sorted directories and
/// sorted, extension-filtered files.
fn list_children(dir: &Path, allowed: &[String]) -> io::Result<(Vec<Entry>, Vec<Entry>)> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            // The root itself failed: the whole listing is unreadable
            Err(e) if e.depth() == 0 => return Err(e.into()),
            // A single child failed (broken link, permission): skip it
            Err(_) => continue,
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        if is_hidden(&name) {
            continue;
        }

        let is_dir = entry.file_type().is_dir();
        if !is_dir && !extension_allowed(&name, allowed) {
            continue;
        }

        let row = Entry {
            name,
            path: entry.into_path(),
            is_dir,
        };
        if is_dir {
            dirs.push(row);
        } else {
            files.push(row);
        }
    }

    dirs.sort_by_cached_key(|e| e.name.to_lowercase());
    files.sort_by_cached_key(|e| e.name.to_lowercase());

    Ok((dirs, files))
}

// ============================================================================
// TESTS
// ============================================================================
