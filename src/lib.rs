//! OneDrive storage behind a generic [`Filesystem`] interface.
//!
//! Logical paths are mapped onto Microsoft Graph drive endpoints by a
//! [`PathPrefixer`]; every request goes through a [`Transport`] so the
//! adapter can be driven by [`GraphTransport`] in production and by a
//! scripted transport in tests.
//!
//! ```no_run
//! use std::sync::Arc;
//! use graphfs::{Filesystem, GraphTransport, OneDriveAdapter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = GraphTransport::new("access-token")?;
//! let fs = OneDriveAdapter::new(Arc::new(transport));
//! fs.write("notes/today.txt", b"hello")?;
//! for entry in fs.list_contents("notes", true)? {
//!     println!("{}", entry.path());
//! }
//! # Ok(())
//! # }
//! ```

pub mod attributes;
pub mod backend;
pub mod config;
pub mod error;
pub mod mime;
pub mod onedrive;
pub mod path;
pub mod transport;
pub mod upload;

#[cfg(test)]
mod testutil;

pub use attributes::{DirectoryAttributes, FileAttributes, StorageAttributes, Visibility};
pub use backend::{Filesystem, ReadStream};
pub use config::{AdapterConfig, AppConfig};
pub use error::{Error, MetadataKind, Result};
pub use onedrive::OneDriveAdapter;
pub use path::PathPrefixer;
pub use transport::{GraphTransport, GraphTransportConfig, Transport, TransportError};
pub use upload::UploadPolicy;
