use std::{fmt, fs, io, path};

use serde_json::value::Value as JsonValue;

use crate::codec;
use crate::config;
use crate::error::StoreError;
use crate::kind::{self, Kind};
use crate::random;

/// How `get` should shape the value it returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hint {
    /// The record text exactly as stored.
    Raw,
    /// The decoded value coerced to a kind.
    Kind(Kind),
    /// One randomly chosen part of the decoded value.
    Random,
    /// Anything unrecognised. The decoded value is returned unchanged.
    Other(String),
}

impl Hint {
    pub fn parse(hint: &str) -> Hint {
        match hint {
            "raw" => Hint::Raw,
            "random" | "r" => Hint::Random,
            other => other
                .parse::<Kind>()
                .map(Hint::Kind)
                .unwrap_or_else(|_| Hint::Other(other.to_string())),
        }
    }
}

/// How `put` should combine the incoming value with what is stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PutMode {
    /// Replace the record, deriving the kind from the value.
    #[default]
    Overwrite,
    /// Merge into the existing record.
    Accumulate,
    /// Replace the record after coercing the value to a kind.
    As(Kind),
}

impl PutMode {
    pub fn parse(mode: Option<&str>) -> PutMode {
        match mode {
            Some("a") => PutMode::Accumulate,
            Some(other) => other.parse::<Kind>().map(PutMode::As).unwrap_or_default(),
            None => PutMode::Overwrite,
        }
    }
}

impl fmt::Display for PutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PutMode::Overwrite => f.write_str("overwrite"),
            PutMode::Accumulate => f.write_str("a"),
            PutMode::As(kind) => write!(f, "{}", kind),
        }
    }
}

/// Typed key-value records, one file per key under a root directory.
///
/// Non-string values keep their kind across a round trip; strings are written
/// as plain text so the files can be read and edited by hand.
pub struct TypedLocalStore {
    root: path::PathBuf,
}

impl TypedLocalStore {
    pub fn new(root: path::PathBuf) -> Result<TypedLocalStore, StoreError> {
        Ok(TypedLocalStore {
            root: config::validate_root(root)?,
        })
    }

    pub fn root(&self) -> &path::Path {
        &self.root
    }

    /// File path for `key`, or `None` when the key is not a single file name.
    pub fn path(&self, key: &str) -> Option<path::PathBuf> {
        let mut components = path::Path::new(key).components();
        match (components.next(), components.next()) {
            (Some(path::Component::Normal(name)), None) if name == key => {
                Some(self.root.join(name))
            }
            _ => None,
        }
    }

    fn read_text(&self, key: &str) -> Result<Option<String>, StoreError> {
        let Some(file_path) = self.path(key) else {
            log::error!("Invalid store key {:?}", key);
            return Ok(None);
        };

        log::debug!("Reading {}...", file_path.display());
        match fs::read_to_string(&file_path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} not set yet.", key);
                Ok(None)
            }
            Err(err) => Err(StoreError::io(&file_path, err)),
        }
    }

    pub fn get(&self, key: &str, hint: Option<&Hint>) -> Result<Option<JsonValue>, StoreError> {
        let Some(text) = self.read_text(key)? else {
            return Ok(None);
        };

        if hint == Some(&Hint::Raw) {
            return Ok(Some(JsonValue::String(text)));
        }

        let value = codec::decode(&text).into_value();
        Ok(match hint {
            None | Some(Hint::Raw) => Some(value),
            Some(Hint::Kind(target)) => Some(kind::coerce(*target, &value)),
            Some(Hint::Random) => random::pick(&value, &mut rand::thread_rng()),
            Some(Hint::Other(other)) => {
                log::warn!(
                    "Unknown store get hint {:?} for {}, returning the stored value",
                    other,
                    key
                );
                Some(value)
            }
        })
    }

    pub fn put(&self, value: JsonValue, key: &str, mode: PutMode) -> Result<bool, StoreError> {
        let Some(file_path) = self.path(key) else {
            log::error!("Store put error: invalid key {:?}", key);
            return Ok(false);
        };

        if value.is_null() || value.as_str() == Some("") {
            return self.delete(key);
        }

        let (kind, value) = match mode {
            PutMode::Accumulate => {
                let merged = match self.get(key, None)? {
                    Some(existing) => accumulate(existing, value),
                    None => value,
                };
                (kind::classify(&merged), merged)
            }
            PutMode::As(target) => (target, kind::coerce(target, &value)),
            PutMode::Overwrite => (kind::classify(&value), value),
        };

        let text = codec::encode(kind, &value)?;
        log::debug!("Writing {} as {}...", file_path.display(), kind);
        fs::write(&file_path, text).map_err(|err| StoreError::io(&file_path, err))?;

        Ok(true)
    }

    pub fn delete(&self, key: &str) -> Result<bool, StoreError> {
        log::debug!("Deleting store key {}", key);
        let Some(file_path) = self.path(key) else {
            log::error!("Invalid store key {:?}", key);
            return Ok(false);
        };

        match fs::remove_file(&file_path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::error!("Store key {} does not exist.", key);
                Ok(false)
            }
            Err(err) => Err(StoreError::io(&file_path, err)),
        }
    }

    /// All stored keys, sorted.
    pub fn all(&self) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(&self.root).map_err(|err| StoreError::io(&self.root, err))?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| StoreError::io(&self.root, err))?;
            let is_file = entry
                .file_type()
                .map_err(|err| StoreError::io(&entry.path(), err))?
                .is_file();
            if let (true, Some(name)) = (is_file, entry.file_name().to_str()) {
                keys.push(name.to_string());
            }
        }
        keys.sort();

        Ok(keys)
    }
}

/// Merge `incoming` into `existing` according to the existing value's shape.
fn accumulate(existing: JsonValue, incoming: JsonValue) -> JsonValue {
    match existing {
        JsonValue::String(mut text) => {
            text.push('\n');
            text.push_str(&kind::to_text(&incoming));
            JsonValue::String(text)
        }
        JsonValue::Array(mut arr) => {
            match incoming {
                JsonValue::Array(more) => arr.extend(more),
                single => arr.push(single),
            }
            JsonValue::Array(arr)
        }
        JsonValue::Object(mut map) => {
            if let JsonValue::Object(fields) = kind::to_structured(Kind::Object, &incoming) {
                map.extend(fields);
            }
            JsonValue::Object(map)
        }
        JsonValue::Number(n) => {
            let sum = n.as_f64().unwrap_or(f64::NAN) + kind::to_number(&incoming);
            kind::number_value(sum)
        }
        JsonValue::Bool(_) | JsonValue::Null => incoming,
    }
}
