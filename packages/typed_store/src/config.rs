//! Storage root configuration.

use std::{fs, io, path};

use crate::error::StoreError;

pub const STORE_DIR: &str = "Store";
pub const LISTS_DIR: &str = "Lists";
pub const SCRIPTS_DIR: &str = "Scripts";

/// The three sibling directories backing a tagfs installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRoots {
    /// Typed records, one file per key.
    pub store: path::PathBuf,
    /// Whole-text list files.
    pub lists: path::PathBuf,
    /// Script files.
    pub scripts: path::PathBuf,
}

impl StoreRoots {
    /// Lay the three roots out under a common base directory.
    pub fn new(base: impl AsRef<path::Path>) -> Self {
        let base = base.as_ref();
        StoreRoots {
            store: base.join(STORE_DIR),
            lists: base.join(LISTS_DIR),
            scripts: base.join(SCRIPTS_DIR),
        }
    }

    /// Create any root that does not exist yet. Safe to call repeatedly.
    pub fn ensure(&self) -> Result<(), StoreError> {
        for (name, dir) in [
            (STORE_DIR, &self.store),
            (LISTS_DIR, &self.lists),
            (SCRIPTS_DIR, &self.scripts),
        ] {
            if dir.is_dir() {
                continue;
            }
            fs::create_dir_all(dir).map_err(|error| StoreError::RootPathInvalid {
                path: dir.clone(),
                error,
            })?;
            log::info!("Created {} folder at {}", name, dir.display());
        }
        Ok(())
    }
}

/// Check that `root` is an existing, writable directory and canonicalize it.
pub(crate) fn validate_root(root: path::PathBuf) -> Result<path::PathBuf, StoreError> {
    let attr = fs::metadata(&root).map_err(|error| StoreError::RootPathInvalid {
        path: root.clone(),
        error,
    })?;

    if !attr.is_dir() {
        return Err(StoreError::RootPathInvalid {
            path: root,
            error: io::Error::other("Root path must be a directory."),
        });
    }

    if attr.permissions().readonly() {
        return Err(StoreError::RootPathInvalid {
            path: root,
            error: io::Error::other("Root directory must be writable"),
        });
    }

    root.canonicalize()
        .map_err(|error| StoreError::RootPathInvalid { path: root, error })
}
