//! tagfs: type-preserving records kept as plain files.
//!
//! A [`TypedLocalStore`] maps string keys to files under a root directory.
//! Numbers, booleans, arrays and objects are written inside a small JSON
//! envelope that records their [`Kind`]; strings are written as bare text.
//!
//! ```rust
//! use serde_json::json;
//! use tagfs_typed_store::{PutMode, TypedLocalStore};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = TypedLocalStore::new(dir.path().to_path_buf()).unwrap();
//!
//! store.put(json!(1), "counter", PutMode::Overwrite).unwrap();
//! store.put(json!(2), "counter", PutMode::Accumulate).unwrap();
//! assert_eq!(store.get("counter", None).unwrap(), Some(json!(3)));
//! ```
//!
//! The crate also carries the companion stores that live next to the record
//! store ([`ListStore`], [`ScriptStore`], laid out by [`StoreRoots`]) and a
//! breadth-first directory [`walk`] with depth and entry limits.

pub mod codec;
pub mod config;
pub mod error;
pub mod kind;
pub mod list_store;
pub mod local_disk;
pub mod random;
pub mod script_store;
pub mod walk;

pub use codec::Decoded;
pub use config::StoreRoots;
pub use error::{StoreError, WalkError};
pub use kind::{classify, Kind};
pub use list_store::ListStore;
pub use local_disk::{Hint, PutMode, TypedLocalStore};
pub use script_store::ScriptStore;
pub use walk::{file_size, format_size, walk, walk_json, DirectoryEntry, WalkOptions};
