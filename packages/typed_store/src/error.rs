use std::{io, path};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("An error occurred trying to read the root path {path}: {error}")]
    RootPathInvalid { path: path::PathBuf, error: io::Error },
    #[error("An I/O error occurred while accessing {path}: {source}")]
    Io {
        path: path::PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    SerializationError(#[from] serde_json::error::Error),
}

impl StoreError {
    pub(crate) fn io(path: &path::Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum WalkError {
    #[error("Walk options must be a JSON object, {given} was given")]
    InvalidOption { given: String },
    #[error("An I/O error occurred while walking {path}: {source}")]
    Io {
        path: path::PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    Traversal(#[from] walkdir::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn io_error_names_the_path() {
        let e = StoreError::io(
            path::Path::new("/tmp/records/answer"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = format!("{}", e);
        assert!(message.contains("/tmp/records/answer"));
        assert!(message.contains("denied"));
        assert!(e.source().is_some());
    }

    #[test]
    fn invalid_option_display() {
        let e = WalkError::InvalidOption {
            given: "\"deep\"".to_string(),
        };
        assert!(format!("{}", e).contains("JSON object"));
    }
}
