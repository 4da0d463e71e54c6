//! Document root resolution and file loading.
//!
//! Files are read from disk on every request; nothing is cached between
//! requests or connections.

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use tracing::debug;

use crate::config::StaticConfig;

/// Outcome of looking up a resource under the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAnswer {
    Found(Bytes),
    NotFound,
}

impl FileAnswer {
    /// Byte length of the file, if one was found.
    pub fn size(&self) -> Option<usize> {
        match self {
            FileAnswer::Found(bytes) => Some(bytes.len()),
            FileAnswer::NotFound => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocumentRoot {
    root: PathBuf,
    not_found_page: String,
}

impl DocumentRoot {
    pub fn new(root: impl Into<PathBuf>, not_found_page: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            not_found_page: not_found_page.into(),
        }
    }

    pub fn from_config(cfg: &StaticConfig) -> Self {
        Self::new(cfg.root.clone(), cfg.not_found_page.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Appends `resource` to the root prefix verbatim.
    ///
    /// `/` has already been rewritten to `/index.html` by the parser, so
    /// `resolve("/a.html")` is simply `<root>/a.html`. The bytes are not
    /// decoded, so a resource that is not UTF-8 names the same file on disk.
    pub fn resolve(&self, resource: impl AsRef<[u8]>) -> PathBuf {
        let mut path = OsString::from(self.root.as_os_str());
        path.push(resource_os_str(resource.as_ref()));
        PathBuf::from(path)
    }

    /// Reads the whole file behind `resource`.
    ///
    /// Missing or unreadable files, and resources that climb out of the
    /// root through `..`, come back as `NotFound`. Only an allocation
    /// failure is returned as an error.
    pub async fn load(&self, resource: impl AsRef<[u8]>) -> io::Result<FileAnswer> {
        let resource = resource.as_ref();
        if escapes_root(resource) {
            debug!(
                "rejecting resource outside document root: {}",
                String::from_utf8_lossy(resource)
            );
            return Ok(FileAnswer::NotFound);
        }

        let path = self.resolve(resource);
        debug!("Serving file: {}", path.display());

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(FileAnswer::Found(Bytes::from(bytes))),
            Err(e) if e.kind() == io::ErrorKind::OutOfMemory => Err(e),
            Err(e) => {
                debug!("Cannot read {}: {}", path.display(), e);
                Ok(FileAnswer::NotFound)
            }
        }
    }

    /// Loads the page sent with 404 responses, if it exists.
    pub async fn not_found_page(&self) -> Option<Bytes> {
        tokio::fs::read(self.root.join(&self.not_found_page))
            .await
            .ok()
            .map(Bytes::from)
    }
}

/// True when `resource` contains a `..` component.
pub fn escapes_root(resource: impl AsRef<[u8]>) -> bool {
    Path::new(&*resource_os_str(resource.as_ref()))
        .components()
        .any(|c| matches!(c, Component::ParentDir))
}

#[cfg(unix)]
fn resource_os_str(resource: &[u8]) -> Cow<'_, OsStr> {
    use std::os::unix::ffi::OsStrExt;

    Cow::Borrowed(OsStr::from_bytes(resource))
}

// Paths are not raw bytes off unix; fall back to a lossy decode there.
#[cfg(not(unix))]
fn resource_os_str(resource: &[u8]) -> Cow<'_, OsStr> {
    Cow::Owned(String::from_utf8_lossy(resource).into_owned().into())
}
