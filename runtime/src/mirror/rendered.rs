// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! Mirroring from a browser-rendered DOM.

use super::assets::{AssetKind, ScriptNaming};
use super::document::Document;
use super::pass::MirrorPass;
use super::{MirrorRequest, MirrorResult, PageMirror};
use crate::acquisition::HttpTransport;
use crate::error::MirrorError;
use crate::progress::ProgressSender;
use crate::renderer::{Renderer, DEFAULT_NAVIGATION_TIMEOUT_MS};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Mirrors the DOM a headless browser ends up with after running the page's
/// scripts.
///
/// Unlike [`super::StaticMirror`], every script is stored as `.js` and image
/// `srcset` candidates are localized too. Assets are still downloaded over
/// plain HTTP.
pub struct RenderedMirror<R: Renderer, T: HttpTransport> {
    renderer: R,
    transport: T,
    navigation_timeout_ms: u64,
    progress: Option<ProgressSender>,
}

impl<R: Renderer, T: HttpTransport> RenderedMirror<R, T> {
    pub fn new(renderer: R, transport: T) -> Self {
        Self {
            renderer,
            transport,
            navigation_timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
            progress: None,
        }
    }

    pub fn with_navigation_timeout(mut self, timeout_ms: u64) -> Self {
        self.navigation_timeout_ms = timeout_ms;
        self
    }

    /// Report per-asset progress on `tx`.
    pub fn with_progress(mut self, tx: ProgressSender) -> Self {
        self.progress = Some(tx);
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Load `url` in a fresh tab and return its serialized DOM.
    async fn render(&self, url: &str) -> anyhow::Result<String> {
        let mut ctx = self.renderer.new_context().await?;

        let html = match ctx.navigate(url, self.navigation_timeout_ms).await {
            Ok(nav) => {
                debug!(
                    "rendered {url} (final URL {}, {}ms)",
                    nav.final_url, nav.load_time_ms
                );
                ctx.get_html().await
            }
            Err(e) => Err(e),
        };

        if let Err(e) = ctx.close().await {
            warn!("failed to close browser tab for {url}: {e}");
        }
        html
    }
}

#[async_trait(?Send)]
impl<R: Renderer, T: HttpTransport> PageMirror for RenderedMirror<R, T> {
    async fn mirror(&self, request: &MirrorRequest) -> Result<MirrorResult, MirrorError> {
        let url = request.url().as_str();
        info!("Fetching with browser {url}...");

        let html = self.render(url).await.map_err(|e| MirrorError::Render {
            url: url.to_string(),
            message: format!("{e:#}"),
        })?;
        let mut doc = Document::parse(&html);

        let links_num = doc.count("a");
        let images_num = doc.count("img");

        let mut pass = MirrorPass::new(
            request,
            &self.transport,
            ScriptNaming::ForceJs,
            &self.progress,
        );
        pass.begin(html.len()).await?;
        for kind in AssetKind::ALL {
            pass.localize_elements(&mut doc, kind, kind == AssetKind::Image)
                .await;
        }
        let filename = pass.save(&doc).await?;

        info!("Mirrored {url} to {filename}");
        Ok(MirrorResult {
            filename,
            links_num,
            images_num,
            script_num: None,
        })
    }
}
