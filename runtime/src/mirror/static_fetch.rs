// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! Mirroring from a plain HTTP GET.

use super::assets::{AssetKind, ScriptNaming};
use super::document::Document;
use super::pass::MirrorPass;
use super::{MirrorRequest, MirrorResult, PageMirror};
use crate::acquisition::HttpTransport;
use crate::error::MirrorError;
use crate::progress::ProgressSender;
use async_trait::async_trait;
use tracing::{debug, info};

/// Mirrors the HTML exactly as the server sends it.
///
/// Scripts keep their own extensions; a script URL without one is left
/// remote.
pub struct StaticMirror<T: HttpTransport> {
    transport: T,
    progress: Option<ProgressSender>,
}

impl<T: HttpTransport> StaticMirror<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            progress: None,
        }
    }

    /// Report per-asset progress on `tx`.
    pub fn with_progress(mut self, tx: ProgressSender) -> Self {
        self.progress = Some(tx);
        self
    }
}

#[async_trait(?Send)]
impl<T: HttpTransport> PageMirror for StaticMirror<T> {
    async fn mirror(&self, request: &MirrorRequest) -> Result<MirrorResult, MirrorError> {
        let url = request.url().as_str();
        info!("Fetching {url}...");

        let page = self.transport.get(url).await?;
        debug!(
            "fetched {}: HTTP {}, {} bytes, final URL {}",
            page.url,
            page.status,
            page.body.len(),
            page.final_url
        );
        let mut doc = Document::parse(&page.body);

        let links_num = doc.count("a");
        let images_num = doc.count("img");
        let script_num = doc.count("script");

        let mut pass = MirrorPass::new(
            request,
            &self.transport,
            ScriptNaming::KeepExtension,
            &self.progress,
        );
        pass.begin(page.body.len()).await?;
        for kind in AssetKind::ALL {
            pass.localize_elements(&mut doc, kind, false).await;
        }
        let filename = pass.save(&doc).await?;

        info!("Mirrored {url} to {filename}");
        Ok(MirrorResult {
            filename,
            links_num,
            images_num,
            script_num: Some(script_num),
        })
    }
}
