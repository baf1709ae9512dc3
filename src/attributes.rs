//! Normalized file and directory attributes.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mime;
use crate::path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileAttributes {
    pub path: String,
    pub file_size: Option<u64>,
    pub visibility: Option<Visibility>,
    /// Seconds since the Unix epoch.
    pub last_modified: Option<i64>,
    pub mime_type: Option<String>,
}

impl FileAttributes {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryAttributes {
    pub path: String,
    pub last_modified: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageAttributes {
    File(FileAttributes),
    Directory(DirectoryAttributes),
}

impl StorageAttributes {
    pub fn path(&self) -> &str {
        match self {
            StorageAttributes::File(f) => &f.path,
            StorageAttributes::Directory(d) => &d.path,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, StorageAttributes::Directory(_))
    }

    pub fn last_modified(&self) -> Option<i64> {
        match self {
            StorageAttributes::File(f) => f.last_modified,
            StorageAttributes::Directory(d) => d.last_modified,
        }
    }
}

#[derive(Debug, Error)]
#[error("malformed timestamp {value:?}: {message}")]
pub struct TimestampError {
    pub value: String,
    pub message: String,
}

/// A drive item as returned by the Graph API. Only the fields the adapter
/// reads are kept.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveItem {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub last_modified_date_time: Option<String>,
    #[serde(default)]
    pub folder: Option<serde_json::Value>,
}

impl DriveItem {
    pub fn is_folder(&self) -> bool {
        self.folder.is_some()
    }

    /// Epoch seconds of `lastModifiedDateTime`, if the item carries one.
    pub fn last_modified(&self) -> Result<Option<i64>, TimestampError> {
        self.last_modified_date_time
            .as_deref()
            .map(parse_timestamp)
            .transpose()
    }
}

/// Parse an RFC 3339 timestamp such as `2024-03-01T12:30:45.123Z` into epoch
/// seconds.
pub fn parse_timestamp(value: &str) -> Result<i64, TimestampError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.timestamp())
        .map_err(|e| TimestampError {
            value: value.to_string(),
            message: e.to_string(),
        })
}

/// Turn a drive item listed under the logical directory `parent` into an
/// attribute record.
pub fn normalize(item: &DriveItem, parent: &str) -> Result<StorageAttributes, TimestampError> {
    let path = path::join(parent, &item.name);
    let last_modified = item.last_modified()?;

    if item.is_folder() {
        return Ok(StorageAttributes::Directory(DirectoryAttributes {
            path,
            last_modified,
        }));
    }

    let mime_type = mime::detect_from_path(&path).map(str::to_string);
    Ok(StorageAttributes::File(FileAttributes {
        path,
        file_size: item.size,
        visibility: None,
        last_modified,
        mime_type,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(json: serde_json::Value) -> DriveItem {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn folder_becomes_directory() {
        let it = item(serde_json::json!({
            "name": "Photos",
            "size": 1024,
            "lastModifiedDateTime": "2024-01-01T00:00:00Z",
            "folder": { "childCount": 3 }
        }));
        let attrs = normalize(&it, "docs").unwrap();
        assert_eq!(
            attrs,
            StorageAttributes::Directory(DirectoryAttributes {
                path: "docs/Photos".into(),
                last_modified: Some(1_704_067_200),
            })
        );
        assert!(attrs.is_dir());
    }

    #[test]
    fn file_carries_size_and_mime() {
        let it = item(serde_json::json!({
            "name": "notes.txt",
            "size": 12,
            "lastModifiedDateTime": "2024-01-01T01:00:00.500+01:00",
            "file": { "mimeType": "text/plain" }
        }));
        match normalize(&it, "").unwrap() {
            StorageAttributes::File(f) => {
                assert_eq!(f.path, "notes.txt");
                assert_eq!(f.file_size, Some(12));
                assert_eq!(f.last_modified, Some(1_704_067_200));
                assert_eq!(f.mime_type.as_deref(), Some("text/plain"));
                assert_eq!(f.visibility, None);
            }
            other => panic!("expected file, got {other:?}"),
        }
    }

    #[test]
    fn missing_size_stays_absent() {
        let it = item(serde_json::json!({
            "name": "blob",
            "lastModifiedDateTime": "2024-01-01T00:00:00Z"
        }));
        match normalize(&it, "a/b").unwrap() {
            StorageAttributes::File(f) => {
                assert_eq!(f.path, "a/b/blob");
                assert_eq!(f.file_size, None);
                assert_eq!(f.mime_type, None);
            }
            other => panic!("expected file, got {other:?}"),
        }
    }

    #[test]
    fn malformed_timestamp_is_an_error() {
        let it = item(serde_json::json!({
            "name": "x.txt",
            "lastModifiedDateTime": "yesterday"
        }));
        let err = normalize(&it, "").unwrap_err();
        assert_eq!(err.value, "yesterday");
    }
}
