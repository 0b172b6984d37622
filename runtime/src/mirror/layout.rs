// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! On-disk layout of a mirrored page.
//!
//! ```text
//! <root>/<host>.html        rewritten page
//! <root>/<host>/<asset>     one file per localized asset
//! ```

use super::assets::sanitize_component;
use crate::error::MirrorError;
use std::path::{Path, PathBuf};
use url::Url;

/// Where one page's HTML and assets are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    root: PathBuf,
    domain: String,
}

impl SiteLayout {
    pub fn new(root: &Path, domain: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            domain: domain.to_string(),
        }
    }

    /// Directory holding this page's assets.
    pub fn assets_dir(&self) -> PathBuf {
        self.root.join(&self.domain)
    }

    /// `<host>.html`
    pub fn html_filename(&self) -> String {
        format!("{}.html", self.domain)
    }

    pub fn html_path(&self) -> PathBuf {
        self.root.join(self.html_filename())
    }

    pub fn asset_path(&self, file_name: &str) -> PathBuf {
        self.assets_dir().join(file_name)
    }

    /// Reference to an asset relative to the HTML file.
    pub fn local_ref(&self, file_name: &str) -> String {
        format!("{}/{}", self.domain, file_name)
    }

    /// Create the assets directory, reusing it if it already exists.
    pub async fn ensure_assets_dir(&self) -> Result<(), MirrorError> {
        let dir = self.assets_dir();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| MirrorError::io(dir, e))
    }
}

/// Host component of `url`, with `_<port>` appended for explicit ports.
///
/// A `:` would make `<host>/<file>` parse as a URL scheme, so the port is
/// joined with an underscore instead.
pub fn domain_name(url: &Url) -> Result<String, MirrorError> {
    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| MirrorError::MissingHost(url.to_string()))?;

    let label = match url.port() {
        Some(port) => format!("{host}_{port}"),
        None => host.to_string(),
    };
    Ok(sanitize_component(&label))
}
