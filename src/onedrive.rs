//! [`Filesystem`] implementation on top of the Graph drive API.

use std::io::{Read, Seek, SeekFrom};
use std::sync::Arc;

use serde::Deserialize;

use crate::attributes::{self, DriveItem, FileAttributes, StorageAttributes, Visibility};
use crate::backend::{Filesystem, ReadStream};
use crate::config::AdapterConfig;
use crate::error::{Error, MetadataKind, Result};
use crate::mime;
use crate::path::{self, PathPrefixer};
use crate::transport::{Request, Transport, TransportError};
use crate::upload::{self, UploadPolicy};

pub struct OneDriveAdapter {
    transport: Arc<dyn Transport>,
    prefixer: PathPrefixer,
    upload: UploadPolicy,
}

#[derive(Deserialize)]
struct ChildrenPage {
    #[serde(default)]
    value: Vec<DriveItem>,
    #[serde(default, rename = "@odata.nextLink")]
    next_link: Option<String>,
}

impl OneDriveAdapter {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_config(transport, AdapterConfig::default())
    }

    pub fn with_config(transport: Arc<dyn Transport>, config: AdapterConfig) -> Self {
        Self {
            transport,
            prefixer: config.prefixer(),
            upload: config.upload,
        }
    }

    fn fetch_item(&self, path: &str) -> std::result::Result<DriveItem, TransportError> {
        self.transport
            .execute(Request::get(self.prefixer.to_remote(path)))?
            .json()
    }

    fn metadata_error(path: &str, kind: MetadataKind, reason: impl ToString) -> Error {
        Error::RetrieveMetadata {
            path: path.to_string(),
            kind,
            reason: reason.to_string(),
        }
    }

    /// Every child of a logical directory, following paging links.
    fn children(&self, dir: &str) -> std::result::Result<Vec<DriveItem>, TransportError> {
        let mut url = self.prefixer.children(dir);
        let mut items = Vec::new();
        loop {
            let page: ChildrenPage = self.transport.execute(Request::get(&url))?.json()?;
            items.extend(page.value);
            match page.next_link {
                Some(next) => url = next,
                None => return Ok(items),
            }
        }
    }

    fn patch_location(
        &self,
        endpoint: &str,
        name: &str,
        parent: &str,
        alternate: bool,
    ) -> std::result::Result<(), TransportError> {
        self.transport.execute(Request::patch(endpoint).json(serde_json::json!({
            "name": name,
            "parentReference": {
                "path": self.prefixer.parent_reference(parent, alternate),
            },
        })))?;
        Ok(())
    }

    fn upload(&self, path: &str, contents: impl Read, size: u64) -> Result<()> {
        upload::upload(
            self.transport.as_ref(),
            &self.prefixer,
            &self.upload,
            path,
            contents,
            size,
        )
        .map_err(|e| Error::Write {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

impl Filesystem for OneDriveAdapter {
    fn name(&self) -> &'static str {
        "onedrive"
    }

    fn file_exists(&self, path: &str) -> bool {
        match self
            .transport
            .execute(Request::get(self.prefixer.to_remote(path)))
        {
            Ok(_) => true,
            Err(e) => {
                if !e.is_client_error() {
                    tracing::debug!(path, error = %e, "existence check failed");
                }
                false
            }
        }
    }

    fn directory_exists(&self, path: &str) -> bool {
        self.file_exists(path)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let mut stream = self.read_stream(path)?;
        let mut contents = Vec::new();
        stream
            .read_to_end(&mut contents)
            .map_err(|e| Error::Read {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        Ok(contents)
    }

    fn read_stream(&self, path: &str) -> Result<ReadStream> {
        let read_error = |reason: String| Error::Read {
            path: path.to_string(),
            reason,
        };

        // Anonymous temp file, removed by the OS once the stream is dropped.
        let mut file = tempfile::tempfile().map_err(|e| read_error(e.to_string()))?;
        let request = Request::get(format!("{}/content", self.prefixer.item(path)));
        let size = self
            .transport
            .download(request, &mut file)
            .map_err(|e| read_error(e.to_string()))?;
        file.seek(SeekFrom::Start(0))
            .map_err(|e| read_error(e.to_string()))?;

        tracing::debug!(path, size, "downloaded content");
        Ok(Box::new(file))
    }

    fn write(&self, path: &str, contents: &[u8]) -> Result<()> {
        self.upload(path, contents, contents.len() as u64)
    }

    fn write_stream(&self, path: &str, contents: &mut dyn Read) -> Result<()> {
        let write_error = |reason: String| Error::Write {
            path: path.to_string(),
            reason,
        };

        // Spool first: the upload strategy depends on the total size.
        let mut spool = tempfile::tempfile().map_err(|e| write_error(e.to_string()))?;
        let size = std::io::copy(contents, &mut spool).map_err(|e| write_error(e.to_string()))?;
        spool
            .seek(SeekFrom::Start(0))
            .map_err(|e| write_error(e.to_string()))?;

        self.upload(path, spool, size)
    }

    fn copy(&self, source: &str, destination: &str) -> Result<()> {
        let (parent, name) = path::split_parent_name(destination);
        let request = Request::post(format!("{}/copy", self.prefixer.item(source))).json(
            serde_json::json!({
                "name": name,
                "parentReference": {
                    "path": self.prefixer.parent_reference(&parent, false),
                },
            }),
        );

        // The drive answers 202 and finishes the copy on its own.
        self.transport
            .execute(request)
            .map_err(|e| Error::Copy {
                from: source.to_string(),
                to: destination.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn move_file(&self, source: &str, destination: &str) -> Result<()> {
        let (parent, name) = path::split_parent_name(destination);
        let endpoint = self.prefixer.to_remote(source);

        if let Err(e) = self.patch_location(&endpoint, &name, &parent, false) {
            tracing::debug!(source, destination, error = %e, "retrying move with alternate parent reference");
            self.patch_location(&endpoint, &name, &parent, true)
                .map_err(|e| Error::Move {
                    from: source.to_string(),
                    to: destination.to_string(),
                    reason: e.to_string(),
                })?;
        }
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<()> {
        self.transport
            .execute(Request::delete(self.prefixer.to_remote(path)))
            .map_err(|e| Error::DeleteFile {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn delete_directory(&self, path: &str) -> Result<()> {
        self.transport
            .execute(Request::delete(self.prefixer.to_remote(path)))
            .map_err(|e| Error::DeleteDirectory {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn create_directory(&self, path: &str) -> Result<()> {
        let (parent, name) = path::split_parent_name(path);
        if name.is_empty() {
            return Err(Error::CreateDirectory {
                path: path.to_string(),
                reason: "the root directory always exists".to_string(),
            });
        }

        let request = Request::post(self.prefixer.children(&parent)).json(serde_json::json!({
            "name": name,
            "folder": {},
        }));
        self.transport
            .execute(request)
            .map_err(|e| Error::CreateDirectory {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn list_contents(&self, path: &str, deep: bool) -> Result<Vec<StorageAttributes>> {
        let list_error = |reason: String| Error::ListContents {
            path: path.to_string(),
            reason,
        };

        let root = self.prefixer.from_remote(&self.prefixer.to_remote(path));
        let items = self.children(&root).map_err(|e| list_error(e.to_string()))?;

        // Depth-first: a directory's entries directly follow the directory.
        let mut pending = vec![(root, items.into_iter())];
        let mut results = Vec::new();
        loop {
            let Some((dir, items)) = pending.last_mut() else {
                break;
            };
            let Some(item) = items.next() else {
                pending.pop();
                continue;
            };
            let dir = dir.clone();

            let attrs = attributes::normalize(&item, &dir).map_err(|e| list_error(e.to_string()))?;
            results.push(attrs);

            if deep && item.is_folder() {
                let child = path::join(&dir, &item.name);
                let items = self
                    .children(&child)
                    .map_err(|e| list_error(e.to_string()))?;
                pending.push((child, items.into_iter()));
            }
        }
        Ok(results)
    }

    fn file_size(&self, path: &str) -> Result<FileAttributes> {
        let kind = MetadataKind::FileSize;
        let item = self
            .fetch_item(path)
            .map_err(|e| Self::metadata_error(path, kind, e))?;
        let size = item
            .size
            .ok_or_else(|| Self::metadata_error(path, kind, "item reports no size"))?;

        Ok(FileAttributes {
            file_size: Some(size),
            ..FileAttributes::new(path)
        })
    }

    fn last_modified(&self, path: &str) -> Result<FileAttributes> {
        let kind = MetadataKind::LastModified;
        let item = self
            .fetch_item(path)
            .map_err(|e| Self::metadata_error(path, kind, e))?;
        let last_modified = item
            .last_modified()
            .map_err(|e| Self::metadata_error(path, kind, e))?
            .ok_or_else(|| Self::metadata_error(path, kind, "item reports no modification time"))?;

        Ok(FileAttributes {
            last_modified: Some(last_modified),
            ..FileAttributes::new(path)
        })
    }

    fn mime_type(&self, path: &str) -> Result<FileAttributes> {
        let mime_type = mime::detect_from_path(&path::clean(path)).ok_or_else(|| {
            Self::metadata_error(path, MetadataKind::MimeType, "unknown file extension")
        })?;

        Ok(FileAttributes {
            mime_type: Some(mime_type.to_string()),
            ..FileAttributes::new(path)
        })
    }

    fn visibility(&self, path: &str) -> Result<FileAttributes> {
        // The drive has no notion of visibility.
        Ok(FileAttributes::new(path))
    }

    fn set_visibility(&self, path: &str, _visibility: Visibility) -> Result<()> {
        Err(Error::SetVisibilityUnsupported {
            path: path.to_string(),
        })
    }
}
