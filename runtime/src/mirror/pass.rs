// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! State and steps of a single mirroring pass.
//!
//! Both page sources hand their parsed document to a [`MirrorPass`], which
//! owns the pass-wide [`AssetNamer`] and rewrites references as assets land
//! on disk. Nothing here outlives the pass.

use super::assets::{AssetKind, AssetNamer, AssetReference, ScriptNaming};
use super::document::Document;
use super::download::{AssetDownloader, DownloadOutcome};
use super::layout::SiteLayout;
use super::srcset::{self, Candidate};
use super::MirrorRequest;
use crate::acquisition::HttpTransport;
use crate::error::MirrorError;
use crate::progress::{self, MirrorEvent, ProgressSender};
use tracing::debug;
use url::Url;

/// Attribute holding responsive image candidates.
const SRCSET: &str = "srcset";

/// What became of one asset reference.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Localization {
    /// Stored locally; the page should point at this path.
    Local(String),
    /// Not a downloadable file. The reference is left as written.
    Skipped,
    /// Download failed. The reference keeps its remote URL.
    Failed,
}

pub(crate) struct MirrorPass<'a, T: HttpTransport + ?Sized> {
    page_url: &'a Url,
    layout: SiteLayout,
    namer: AssetNamer,
    downloader: AssetDownloader<'a, T>,
    progress: &'a Option<ProgressSender>,
    seq: u64,
}

impl<'a, T: HttpTransport + ?Sized> MirrorPass<'a, T> {
    pub(crate) fn new(
        request: &'a MirrorRequest,
        transport: &'a T,
        script_naming: ScriptNaming,
        progress: &'a Option<ProgressSender>,
    ) -> Self {
        Self {
            page_url: request.url(),
            layout: request.layout(),
            namer: AssetNamer::new(script_naming),
            downloader: AssetDownloader::new(transport),
            progress,
            seq: 0,
        }
    }

    fn emit(&mut self, event: MirrorEvent) {
        progress::emit(self.progress, self.page_url.as_str(), &mut self.seq, event);
    }

    /// Record that the page body arrived and prepare the assets directory.
    pub(crate) async fn begin(&mut self, page_bytes: usize) -> Result<(), MirrorError> {
        self.emit(MirrorEvent::PageLoaded { bytes: page_bytes });
        self.layout.ensure_assets_dir().await
    }

    /// Localize every `<kind>` element in document order.
    ///
    /// With `with_srcset`, each image's `srcset` candidates are localized
    /// right after its `src`, so they take the next counter values.
    pub(crate) async fn localize_elements(
        &mut self,
        doc: &mut Document,
        kind: AssetKind,
        with_srcset: bool,
    ) {
        let tag = kind.tag();
        let sources = doc.attr_values(tag, kind.attr());
        let srcsets = if with_srcset && kind == AssetKind::Image {
            doc.attr_values(tag, SRCSET)
        } else {
            Vec::new()
        };

        for (index, source) in sources.iter().enumerate() {
            if let Some(raw) = source.as_deref().filter(|v| !v.is_empty()) {
                if let Localization::Local(local_ref) = self.localize(kind, raw).await {
                    doc.set_attr(tag, index, kind.attr(), &local_ref);
                }
            }

            if let Some(Some(value)) = srcsets.get(index) {
                if let Some(rewritten) = self.localize_srcset(value).await {
                    doc.set_attr(tag, index, SRCSET, &rewritten);
                }
            }
        }
    }

    /// Localize each `srcset` candidate.
    ///
    /// Rejected candidates are always dropped and failed ones keep their
    /// remote URL. Returns `None` when every candidate failed, leaving the
    /// attribute as it was.
    async fn localize_srcset(&mut self, value: &str) -> Option<String> {
        let mut rewritten = Vec::new();
        let mut changed = false;

        for candidate in srcset::parse(value) {
            match self.localize(AssetKind::Image, &candidate.url).await {
                Localization::Local(local_ref) => {
                    changed = true;
                    rewritten.push(Candidate::new(local_ref, candidate.descriptor));
                }
                Localization::Failed => rewritten.push(candidate),
                Localization::Skipped => changed = true,
            }
        }

        changed.then(|| srcset::join(&rewritten))
    }

    async fn localize(&mut self, kind: AssetKind, raw: &str) -> Localization {
        let Some(reference) = AssetReference::resolve(kind, self.page_url, raw) else {
            debug!("skipping {kind} {raw}: not an http(s) URL");
            self.emit(MirrorEvent::AssetSkipped {
                kind,
                url: raw.to_string(),
                reason: "not an http(s) URL".to_string(),
            });
            return Localization::Skipped;
        };

        let Some(record) = self.namer.assign(&reference, &self.layout) else {
            debug!("skipping {kind} {}: no file name", reference.resolved);
            self.emit(MirrorEvent::AssetSkipped {
                kind,
                url: reference.resolved.to_string(),
                reason: "no file name or extension".to_string(),
            });
            return Localization::Skipped;
        };

        let outcome = self
            .downloader
            .download(&reference.resolved, &record.path)
            .await;

        match outcome {
            DownloadOutcome::Failed { reason } => {
                self.emit(MirrorEvent::AssetFailed {
                    kind,
                    url: reference.resolved.to_string(),
                    message: reason,
                });
                Localization::Failed
            }
            DownloadOutcome::Saved { .. } | DownloadOutcome::Placeholder { .. } => {
                self.emit(MirrorEvent::AssetLocalized {
                    kind,
                    url: reference.resolved.to_string(),
                    local_path: record.local_ref.clone(),
                });
                Localization::Local(record.local_ref)
            }
        }
    }

    /// Write the rewritten document and return its file name.
    pub(crate) async fn save(mut self, doc: &Document) -> Result<String, MirrorError> {
        let path = self.layout.html_path();
        tokio::fs::write(&path, doc.to_html())
            .await
            .map_err(|e| MirrorError::io(&path, e))?;

        let filename = self.layout.html_filename();
        self.emit(MirrorEvent::PageSaved {
            filename: filename.clone(),
        });
        Ok(filename)
    }
}
