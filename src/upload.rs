//! Single request and chunked session uploads.
//!
//! Content up to [`UploadPolicy::threshold`] bytes is sent with one
//! `PUT …:/content`. Anything larger goes through an upload session: the API
//! hands out a pre-authenticated URL and the content is PUT to it in
//! consecutive byte ranges. The session completes itself once the last byte
//! arrives, so there is no finalize call.

use std::io::Read;

use serde::Deserialize;
use thiserror::Error;

use crate::path::{self, PathPrefixer};
use crate::transport::{Request, Transport, TransportError};

pub const DEFAULT_THRESHOLD: u64 = 4_000_000;
/// 60 MiB, a multiple of the 320 KiB granularity the API requires.
pub const DEFAULT_CHUNK_SIZE: u64 = 60 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UploadPolicy {
    /// Largest size sent as a single request.
    pub threshold: u64,
    /// Bytes per session chunk.
    pub chunk_size: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl UploadPolicy {
    pub fn uses_session(&self, size: u64) -> bool {
        size > self.threshold
    }
}

/// Inclusive byte range of one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    pub start: u64,
    pub end: u64,
}

impl ChunkRange {
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn content_range(&self, total: u64) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, total)
    }
}

/// Split `total` bytes into contiguous ranges of at most `chunk_size` bytes.
pub fn chunk_ranges(total: u64, chunk_size: u64) -> Vec<ChunkRange> {
    let chunk_size = chunk_size.max(1);
    let mut ranges = Vec::new();
    let mut start = 0;
    while start < total {
        let end = (start + chunk_size - 1).min(total - 1);
        ranges.push(ChunkRange { start, end });
        start = end + 1;
    }
    ranges
}

/// Upload session handed out by `createUploadSession`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSession {
    pub upload_url: String,
    #[serde(default)]
    pub expiration_date_time: Option<String>,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("failed to read content: {0}")]
    Io(#[from] std::io::Error),

    #[error("content ended after {read} of {expected} bytes")]
    ShortRead { read: u64, expected: u64 },
}

/// Write `size` bytes from `content` to the logical `path`.
pub fn upload<R: Read>(
    transport: &dyn Transport,
    prefixer: &PathPrefixer,
    policy: &UploadPolicy,
    path: &str,
    mut content: R,
    size: u64,
) -> Result<(), UploadError> {
    let item = prefixer.item(path);

    if !policy.uses_session(size) {
        let mut buf = Vec::with_capacity(size as usize);
        (&mut content).take(size).read_to_end(&mut buf)?;
        if buf.len() as u64 != size {
            return Err(UploadError::ShortRead {
                read: buf.len() as u64,
                expected: size,
            });
        }
        tracing::debug!(path, size, "single request upload");
        transport.execute(Request::put(format!("{}/content", item)).bytes(buf))?;
        return Ok(());
    }

    let (_, file_name) = path::split_parent_name(path);
    let session = create_session(transport, &item, &file_name)?;
    tracing::debug!(
        path,
        size,
        expires = session.expiration_date_time.as_deref().unwrap_or("-"),
        "upload session created"
    );

    for range in chunk_ranges(size, policy.chunk_size) {
        let mut chunk = vec![0_u8; range.len() as usize];
        content.read_exact(&mut chunk).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                UploadError::ShortRead {
                    read: range.start,
                    expected: size,
                }
            } else {
                UploadError::Io(e)
            }
        })?;

        let content_range = range.content_range(size);
        tracing::debug!(path, range = %content_range, "uploading chunk");
        transport.execute(
            Request::put(&session.upload_url)
                .header("Content-Length", range.len().to_string())
                .header("Content-Range", content_range)
                .bytes(chunk)
                .without_timeout(),
        )?;
    }
    Ok(())
}

fn create_session(
    transport: &dyn Transport,
    item: &str,
    file_name: &str,
) -> Result<UploadSession, UploadError> {
    let response = transport.execute(
        Request::post(format!("{}/createUploadSession", item))
            .header("Content-Type", "application/json")
            .json(serde_json::json!({
                "item": {
                    "@microsoft.graph.conflictBehavior": "rename",
                    "name": file_name,
                }
            })),
    )?;
    Ok(response.json()?)
}
