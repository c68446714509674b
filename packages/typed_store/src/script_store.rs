//! Script files, addressed by name with or without the `.js` extension.
//!
//! Scripts may sit directly in the root or one directory below it, in which
//! case they are named `dir/file.js`.

use std::{fs, io, path, time};

use serde_json::value::Value as JsonValue;

use crate::config;
use crate::error::StoreError;
use crate::kind;

const EXTENSION: &str = ".js";

pub struct ScriptStore {
    root: path::PathBuf,
}

impl ScriptStore {
    pub fn new(root: path::PathBuf) -> Result<ScriptStore, StoreError> {
        Ok(ScriptStore {
            root: config::validate_root(root)?,
        })
    }

    fn file_name(name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        if name.ends_with(EXTENSION) {
            Some(name.to_string())
        } else {
            Some(format!("{}{}", name, EXTENSION))
        }
    }

    /// Sorted names of every script, one sub-directory level deep.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let read_dir = |dir: &path::Path| -> Result<Vec<(String, bool)>, StoreError> {
            let mut names = Vec::new();
            for entry in fs::read_dir(dir).map_err(|err| StoreError::io(dir, err))? {
                let entry = entry.map_err(|err| StoreError::io(dir, err))?;
                let is_dir = fs::metadata(entry.path())
                    .map_err(|err| StoreError::io(&entry.path(), err))?
                    .is_dir();
                names.push((entry.file_name().to_string_lossy().into_owned(), is_dir));
            }
            Ok(names)
        };

        let mut scripts = Vec::new();
        for (name, is_dir) in read_dir(self.root.as_path())? {
            if is_dir {
                for (child, _) in read_dir(self.root.join(&name).as_path())? {
                    scripts.push(format!("{}/{}", name, child));
                }
            } else {
                scripts.push(name);
            }
        }
        scripts.sort();

        Ok(scripts)
    }

    pub fn path(&self, name: &str) -> Option<path::PathBuf> {
        Self::file_name(name).map(|file_name| self.root.join(file_name))
    }

    /// Directory holding the script `name`.
    pub fn dir(&self, name: &str) -> Option<path::PathBuf> {
        self.path(name)
            .and_then(|file_path| file_path.parent().map(path::Path::to_path_buf))
    }

    pub fn get(&self, name: &str) -> Option<String> {
        let file_path = self.path(name)?;
        match fs::read_to_string(&file_path) {
            Ok(text) => Some(text),
            Err(err) => {
                log::error!("No such script {}: {}", name, err);
                None
            }
        }
    }

    /// Last modification time of the script `name`.
    pub fn modified(&self, name: &str) -> Option<time::SystemTime> {
        let file_path = self.path(name)?;
        match fs::metadata(&file_path).and_then(|attr| attr.modified()) {
            Ok(mtime) => Some(mtime),
            Err(err) => {
                log::error!("No such script {}: {}", name, err);
                None
            }
        }
    }

    /// Write a script. Structured content is written as JSON.
    pub fn put(&self, name: &str, content: &JsonValue) -> bool {
        let Some(file_path) = self.path(name) else {
            log::error!("Put script error: empty script name");
            return false;
        };

        let write = || -> io::Result<()> {
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&file_path, kind::to_text(content))
        };
        match write() {
            Ok(()) => true,
            Err(err) => {
                log::error!("Put script {} error: {}", file_path.display(), err);
                false
            }
        }
    }

    pub fn delete(&self, name: &str) -> bool {
        let Some(file_path) = self.path(name) else {
            return false;
        };
        match fs::remove_file(&file_path) {
            Ok(()) => true,
            Err(err) => {
                log::error!("No such script {}: {}", name, err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scripts() -> (tempfile::TempDir, ScriptStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ScriptStore::new(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn extension_is_appended() {
        let (_dir, store) = scripts();

        assert!(store.put("hello", &json!("console.log('hi')")));
        assert_eq!(store.get("hello.js"), Some("console.log('hi')".to_string()));
        assert_eq!(store.get(" hello "), Some("console.log('hi')".to_string()));
        assert!(store.path("hello").unwrap().ends_with("hello.js"));
    }

    #[test]
    fn list_descends_one_level() {
        let (dir, store) = scripts();

        store.put("b", &json!("b"));
        store.put("a", &json!("a"));
        store.put("tools/c", &json!("c"));
        fs::create_dir_all(dir.path().join("tools/deeper")).unwrap();

        assert_eq!(
            store.list().unwrap(),
            vec!["a.js", "b.js", "tools/c.js", "tools/deeper"]
        );
        assert_eq!(
            store.dir("tools/c").unwrap(),
            store.path("tools/c").unwrap().parent().unwrap()
        );
    }

    #[test]
    fn structured_content_is_json() {
        let (_dir, store) = scripts();

        assert!(store.put("config", &json!({"enabled": true})));
        assert_eq!(store.get("config"), Some(r#"{"enabled":true}"#.to_string()));
    }

    #[test]
    fn modified_and_delete() {
        let (_dir, store) = scripts();

        assert!(store.modified("task").is_none());
        store.put("task", &json!("run()"));
        assert!(store.modified("task").is_some());

        assert!(store.delete("task"));
        assert!(!store.delete("task"));
        assert_eq!(store.get("task"), None);
    }

    #[test]
    fn blank_names() {
        let (_dir, store) = scripts();

        assert_eq!(store.path("  "), None);
        assert_eq!(store.get(""), None);
        assert!(!store.put("", &json!("x")));
        assert!(!store.delete(" "));
    }
}
