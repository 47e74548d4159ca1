//! The browser client's three static files

use std::io;
use std::path::{Path, PathBuf};

/// A file the server knows how to serve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    Index,
    Script,
    Styles,
}

impl Asset {
    pub fn file_name(&self) -> &'static str {
        match self {
            Asset::Index => "index.html",
            Asset::Script => "script.js",
            Asset::Styles => "styles.css",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Asset::Index => "text/html; charset=utf-8",
            Asset::Script => "application/javascript",
            Asset::Styles => "text/css",
        }
    }
}

/// Reads assets from a directory on every request
///
/// Nothing is cached, so edits on disk show up on the next reload.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    root: PathBuf,
}

impl StaticAssets {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn load(&self, asset: Asset) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.root.join(asset.file_name())).await
    }
}
