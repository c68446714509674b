//! Breadth-first directory listing with depth and result-count limits.

use std::{fs, path};

use serde::Serialize;
use serde_json::value::Value as JsonValue;
use walkdir::WalkDir;

use crate::error::WalkError;

/// A file found by [`walk`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub path: path::PathBuf,
    /// Human-readable size, see [`format_size`].
    pub size: String,
}

/// Limits for [`walk`]. `None` means unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Number of directory levels to scan. Level 0 is the root's children.
    pub max_depth: Option<usize>,
    /// Number of files to collect before stopping.
    pub max_entries: Option<usize>,
}

impl WalkOptions {
    /// Build options from signed limits where any negative value (usually
    /// `-1`) means unbounded.
    pub fn from_limits(max_depth: i64, max_entries: i64) -> Self {
        WalkOptions {
            max_depth: usize::try_from(max_depth).ok(),
            max_entries: usize::try_from(max_entries).ok(),
        }
    }
}

impl TryFrom<&JsonValue> for WalkOptions {
    type Error = WalkError;

    /// Reads `{"deep": n, "limit": n}`. Missing or non-numeric fields are
    /// unbounded.
    fn try_from(value: &JsonValue) -> Result<Self, Self::Error> {
        let JsonValue::Object(map) = value else {
            return Err(WalkError::InvalidOption {
                given: value.to_string(),
            });
        };

        let limit = |field: &str| {
            map.get(field)
                .and_then(JsonValue::as_f64)
                .map(|n| n.trunc() as i64)
                .unwrap_or(-1)
        };

        Ok(WalkOptions::from_limits(limit("deep"), limit("limit")))
    }
}

/// Format a byte count with decimal units.
///
/// ```
/// use tagfs_typed_store::format_size;
///
/// assert_eq!(format_size(999), "999 B");
/// assert_eq!(format_size(1_500), "1.50 KB");
/// assert_eq!(format_size(2_345_678), "2.35 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    if bytes < 1_000 {
        format!("{} B", bytes)
    } else if bytes < 1_000_000 {
        format!("{:.2} KB", bytes as f64 / 1_000.0)
    } else {
        format!("{:.2} MB", bytes as f64 / 1_000_000.0)
    }
}

/// Formatted size of the file at `file_path`, or `None` if it cannot be read.
pub fn file_size(file_path: impl AsRef<path::Path>) -> Option<String> {
    fs::metadata(file_path).ok().map(|attr| format_size(attr.len()))
}

/// List files under `root`, level by level.
///
/// Children of each directory are visited in file-name order. A missing root
/// yields an empty list.
pub fn walk(
    root: impl AsRef<path::Path>,
    options: &WalkOptions,
) -> Result<Vec<DirectoryEntry>, WalkError> {
    let root = root.as_ref();
    let mut found = Vec::new();
    if !root.exists() {
        log::debug!("{} does not exist, nothing to walk", root.display());
        return Ok(found);
    }
    if options.max_entries == Some(0) {
        return Ok(found);
    }

    let mut level = vec![root.to_path_buf()];
    let mut depth = 0;
    while !level.is_empty() {
        if options.max_depth.is_some_and(|max| depth >= max) {
            return Ok(found);
        }
        log::debug!("Scanning depth {} ({} directories)", depth, level.len());

        let mut next_level = Vec::new();
        for dir in &level {
            let children = WalkDir::new(dir)
                .min_depth(1)
                .max_depth(1)
                .follow_links(true)
                .sort_by_file_name();
            for child in children {
                let child = child?;
                if child.file_type().is_dir() {
                    next_level.push(child.into_path());
                    continue;
                }

                let size = child
                    .metadata()
                    .map_err(|source| WalkError::Io {
                        path: child.path().to_path_buf(),
                        source: source.into(),
                    })?
                    .len();
                found.push(DirectoryEntry {
                    path: child.into_path(),
                    size: format_size(size),
                });
                if options.max_entries.is_some_and(|max| found.len() >= max) {
                    return Ok(found);
                }
            }
        }

        level = next_level;
        depth += 1;
    }

    Ok(found)
}

/// [`walk`] with options given as JSON. Options that are not a JSON object are
/// logged and produce an empty list.
pub fn walk_json(
    root: impl AsRef<path::Path>,
    options: &JsonValue,
) -> Result<Vec<DirectoryEntry>, WalkError> {
    match WalkOptions::try_from(options) {
        Ok(options) => walk(root, &options),
        Err(err) => {
            log::error!("{}", err);
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// root/
    ///   a.txt b.txt
    ///   one/ c.txt
    ///   one/two/ d.txt
    ///   one/two/three/ e.txt
    fn deep_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("one/two/three")).unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("b.txt"), "bb").unwrap();
        fs::write(root.join("one/c.txt"), "c").unwrap();
        fs::write(root.join("one/two/d.txt"), "d").unwrap();
        fs::write(root.join("one/two/three/e.txt"), "e").unwrap();
        dir
    }

    fn names(entries: &[DirectoryEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| e.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn unbounded_walk_is_breadth_first() {
        let dir = deep_tree();
        let entries = walk(dir.path(), &WalkOptions::default()).unwrap();
        assert_eq!(
            names(&entries),
            vec!["a.txt", "b.txt", "c.txt", "d.txt", "e.txt"]
        );
        assert_eq!(entries[1].size, "2 B");
        assert_eq!(entries[2].path, dir.path().join("one").join("c.txt"));
    }

    #[test]
    fn depth_cutoff() {
        let dir = deep_tree();

        let options = WalkOptions {
            max_depth: Some(1),
            max_entries: None,
        };
        assert_eq!(
            names(&walk(dir.path(), &options).unwrap()),
            vec!["a.txt", "b.txt"]
        );

        let options = WalkOptions::from_limits(2, -1);
        assert_eq!(
            names(&walk(dir.path(), &options).unwrap()),
            vec!["a.txt", "b.txt", "c.txt"]
        );

        let options = WalkOptions::from_limits(0, -1);
        assert!(walk(dir.path(), &options).unwrap().is_empty());
    }

    #[test]
    fn entry_cap_stops_the_walk() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..10 {
            fs::write(dir.path().join(format!("file{}", i)), "x").unwrap();
        }

        let options = WalkOptions::from_limits(-1, 3);
        let entries = walk(dir.path(), &options).unwrap();
        assert_eq!(names(&entries), vec!["file0", "file1", "file2"]);
    }

    #[test]
    fn entry_cap_spans_levels() {
        let dir = deep_tree();
        let options = WalkOptions::from_limits(-1, 4);
        assert_eq!(
            names(&walk(dir.path(), &options).unwrap()),
            vec!["a.txt", "b.txt", "c.txt", "d.txt"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn entry_cap_abandons_remaining_siblings() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a", "b", "c"] {
            fs::write(dir.path().join(name), name).unwrap();
        }
        // Sorted after the files, and fails when stat'ed.
        std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("zzz")).unwrap();

        let entries = walk(dir.path(), &WalkOptions::from_limits(-1, 3)).unwrap();
        assert_eq!(names(&entries), vec!["a", "b", "c"]);

        assert!(walk(dir.path(), &WalkOptions::default()).is_err());
    }

    #[test]
    fn missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let entries = walk(dir.path().join("nonexistent"), &WalkOptions::default()).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn json_options() {
        let dir = deep_tree();

        let entries = walk_json(dir.path(), &json!({"deep": 1, "limit": 1})).unwrap();
        assert_eq!(names(&entries), vec!["a.txt"]);

        let entries = walk_json(dir.path(), &json!({"deep": "two"})).unwrap();
        assert_eq!(entries.len(), 5);

        let entries = walk_json(dir.path(), &json!("deep")).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn sizes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(999), "999 B");
        assert_eq!(format_size(1_000), "1.00 KB");
        assert_eq!(format_size(999_999), "1000.00 KB");
        assert_eq!(format_size(1_000_000), "1.00 MB");

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("sized");
        fs::write(&file, vec![0u8; 1_234]).unwrap();
        assert_eq!(file_size(&file), Some("1.23 KB".to_string()));
        assert_eq!(file_size(dir.path().join("absent")), None);
    }
}
