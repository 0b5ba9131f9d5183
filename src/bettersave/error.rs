use crate::model::ItemKey;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A single filesystem step failed; the message names the path involved.
    #[error("Unable to {action} '{}': {source}", path.display())]
    Fs {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Attempted to introduce non-editor content to the category system: {0}")]
    NotEditorContent(String),

    #[error("Directory '{}' does not have a 'level.gmd' or 'list.gmdl' file", .0.display())]
    NoContentFound(PathBuf),

    #[error("Item is not part of the category system: {0}")]
    NotCategorized(String),

    #[error("Unknown item key: {0}")]
    UnknownItem(ItemKey),

    #[error("{0}")]
    Api(String),

    /// An invariant of the save tree is broken. The host must stop whatever
    /// pipeline it is running instead of continuing on a suspect model.
    #[error("Unrecoverable: {0}")]
    Fatal(String),
}

impl SaveError {
    pub fn fs(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SaveError::Fs {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, SaveError::Fatal(_))
    }
}

pub type Result<T> = std::result::Result<T, SaveError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn fs_error_names_the_path() {
        let err = SaveError::fs(
            "move item directory",
            "/tmp/created/foo",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("move item directory"));
        assert!(msg.contains("/tmp/created/foo"));
        assert!(msg.contains("denied"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn fatal_is_distinguished() {
        assert!(SaveError::Fatal("boom".into()).is_fatal());
        assert!(!SaveError::Api("nope".into()).is_fatal());
    }
}
