use std::io::Read;

use crate::attributes::{FileAttributes, StorageAttributes, Visibility};
use crate::error::Result;

/// Readable content handed back by [`Filesystem::read_stream`].
pub type ReadStream = Box<dyn Read + Send>;

/// Storage-agnostic filesystem operations.
///
/// Paths are logical: relative to whatever root the implementation was
/// configured with, `/` separated, leading and trailing slashes ignored.
pub trait Filesystem: Send + Sync {
    fn name(&self) -> &'static str;

    /// Never fails; any error while checking reads as "does not exist".
    fn file_exists(&self, path: &str) -> bool;
    fn directory_exists(&self, path: &str) -> bool;

    fn read(&self, path: &str) -> Result<Vec<u8>>;
    fn read_stream(&self, path: &str) -> Result<ReadStream>;

    /// Create or replace the file at `path`.
    fn write(&self, path: &str, contents: &[u8]) -> Result<()>;
    fn write_stream(&self, path: &str, contents: &mut dyn Read) -> Result<()>;

    fn copy(&self, source: &str, destination: &str) -> Result<()>;
    fn move_file(&self, source: &str, destination: &str) -> Result<()>;

    fn delete(&self, path: &str) -> Result<()>;
    fn delete_directory(&self, path: &str) -> Result<()>;
    fn create_directory(&self, path: &str) -> Result<()>;

    /// Entries under `path`; with `deep`, every descendant, each directory
    /// immediately followed by its own contents.
    fn list_contents(&self, path: &str, deep: bool) -> Result<Vec<StorageAttributes>>;

    fn file_size(&self, path: &str) -> Result<FileAttributes>;
    fn last_modified(&self, path: &str) -> Result<FileAttributes>;
    fn mime_type(&self, path: &str) -> Result<FileAttributes>;
    fn visibility(&self, path: &str) -> Result<FileAttributes>;
    fn set_visibility(&self, path: &str, visibility: Visibility) -> Result<()>;
}
