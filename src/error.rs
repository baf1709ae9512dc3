//! Error types for graphfs operations.

use std::fmt;
use thiserror::Error;

/// Which piece of metadata a failed lookup was after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataKind {
    FileSize,
    LastModified,
    MimeType,
    Visibility,
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MetadataKind::FileSize => "file size",
            MetadataKind::LastModified => "last modified",
            MetadataKind::MimeType => "mime type",
            MetadataKind::Visibility => "visibility",
        };
        f.write_str(s)
    }
}

/// Failure of a filesystem operation.
///
/// Every variant names the logical path(s) the caller passed in and the
/// message of the underlying cause.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unable to retrieve the {kind} for file at location: {path}. {reason}")]
    RetrieveMetadata {
        path: String,
        kind: MetadataKind,
        reason: String,
    },

    #[error("unable to create a directory at {path}. {reason}")]
    CreateDirectory { path: String, reason: String },

    #[error("unable to delete file located at: {path}. {reason}")]
    DeleteFile { path: String, reason: String },

    #[error("unable to delete directory located at: {path}. {reason}")]
    DeleteDirectory { path: String, reason: String },

    #[error("unable to write file at location: {path}. {reason}")]
    Write { path: String, reason: String },

    #[error("unable to copy file from {from} to {to}. {reason}")]
    Copy {
        from: String,
        to: String,
        reason: String,
    },

    #[error("unable to move file from {from} to {to}. {reason}")]
    Move {
        from: String,
        to: String,
        reason: String,
    },

    #[error("unable to read file from location: {path}. {reason}")]
    Read { path: String, reason: String },

    #[error("unable to set visibility for file {path}. adapter does not support visibility controls")]
    SetVisibilityUnsupported { path: String },

    #[error("unable to list contents for {path}. {reason}")]
    ListContents { path: String, reason: String },
}

impl Error {
    /// The logical path the failed operation was addressing. For copy and
    /// move this is the source.
    pub fn path(&self) -> &str {
        match self {
            Error::RetrieveMetadata { path, .. }
            | Error::CreateDirectory { path, .. }
            | Error::DeleteFile { path, .. }
            | Error::DeleteDirectory { path, .. }
            | Error::Write { path, .. }
            | Error::Read { path, .. }
            | Error::SetVisibilityUnsupported { path }
            | Error::ListContents { path, .. } => path,
            Error::Copy { from, .. } | Error::Move { from, .. } => from,
        }
    }
}

/// Result type alias for graphfs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_path_and_cause() {
        let err = Error::Write {
            path: "docs/report.pdf".into(),
            reason: "connection reset".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("docs/report.pdf"));
        assert!(msg.contains("connection reset"));
        assert_eq!(err.path(), "docs/report.pdf");
    }

    #[test]
    fn metadata_kind_is_rendered() {
        let err = Error::RetrieveMetadata {
            path: "a.txt".into(),
            kind: MetadataKind::LastModified,
            reason: "not found".into(),
        };
        assert!(err.to_string().contains("last modified"));
    }

    #[test]
    fn move_path_is_the_source() {
        let err = Error::Move {
            from: "a/b.txt".into(),
            to: "c.txt".into(),
            reason: "conflict".into(),
        };
        assert_eq!(err.path(), "a/b.txt");
    }
}
