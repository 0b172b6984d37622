// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! Page mirroring: fetch a page, localize its assets, save the result.
//!
//! Two page sources share one pipeline. [`StaticMirror`] issues a plain GET;
//! [`RenderedMirror`] lets a headless browser execute the page first and also
//! localizes `srcset` candidates. Both parse the page into a [`Document`],
//! run it through a per-pass asset namer and downloader, and write
//! `<root>/<host>.html` next to `<root>/<host>/`.

pub mod assets;
pub mod document;
pub mod download;
pub mod layout;
pub mod options;
mod pass;
pub mod rendered;
pub mod srcset;
pub mod static_fetch;

pub use assets::{AssetKind, AssetNamer, AssetRecord, AssetReference, ScriptNaming};
pub use document::Document;
pub use download::{AssetDownloader, DownloadOutcome};
pub use layout::SiteLayout;
pub use options::MirrorOptions;
pub use rendered::RenderedMirror;
pub use static_fetch::StaticMirror;

use crate::error::MirrorError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Default destination root, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "pages";

/// One page to mirror and where to put it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorRequest {
    url: Url,
    root: PathBuf,
    domain: String,
}

impl MirrorRequest {
    /// Validate `url` and pair it with a destination root.
    pub fn new(url: &str, root: impl Into<PathBuf>) -> Result<Self, MirrorError> {
        let url = Url::parse(url).map_err(|e| MirrorError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(MirrorError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }
        let domain = layout::domain_name(&url)?;

        Ok(Self {
            url,
            root: root.into(),
            domain,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files this request writes.
    pub fn layout(&self) -> SiteLayout {
        SiteLayout::new(&self.root, &self.domain)
    }
}

/// Summary of a completed mirroring pass.
///
/// Counts are taken from the page as fetched, before any reference was
/// rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorResult {
    /// Name of the mirrored HTML file under the destination root.
    pub filename: String,
    pub links_num: usize,
    pub images_num: usize,
    /// Only the static source counts scripts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_num: Option<usize>,
}

impl MirrorResult {
    /// Human-readable report lines, one fact per line.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("  - Saved as {}", self.filename),
            format!("  - Links found on the page: {}", self.links_num),
            format!("  - Images found on the page: {}", self.images_num),
        ];
        if let Some(scripts) = self.script_num {
            lines.push(format!("  - Scripts found on the page: {scripts}"));
        }
        lines
    }
}

/// A page source that can run a full mirroring pass.
///
/// Futures are not `Send`: the parsed document lives on the pass's stack.
#[async_trait(?Send)]
pub trait PageMirror {
    async fn mirror(&self, request: &MirrorRequest) -> Result<MirrorResult, MirrorError>;
}
