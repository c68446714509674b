//! Named plain-text list files.

use std::{fs, path};

use serde_json::value::Value as JsonValue;

use crate::config;
use crate::error::StoreError;
use crate::kind;

pub struct ListStore {
    root: path::PathBuf,
}

impl ListStore {
    pub fn new(root: path::PathBuf) -> Result<ListStore, StoreError> {
        Ok(ListStore {
            root: config::validate_root(root)?,
        })
    }

    pub fn path(&self, name: &str) -> path::PathBuf {
        self.root.join(name)
    }

    pub fn get(&self, name: &str) -> Option<String> {
        match fs::read_to_string(self.path(name)) {
            Ok(text) => Some(text),
            Err(err) => {
                log::error!("No list {}: {}", name, err);
                None
            }
        }
    }

    /// Write `content` as text. Failures are logged and reported as `false`.
    pub fn put(&self, name: &str, content: &JsonValue) -> bool {
        let file_path = self.path(name);
        match fs::write(&file_path, kind::to_text(content)) {
            Ok(()) => true,
            Err(err) => {
                log::error!("Put list file {} error: {}", file_path.display(), err);
                false
            }
        }
    }
}
