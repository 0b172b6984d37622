// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! In-memory stand-ins for the HTTP transport and the browser.

#![allow(dead_code)]

use anyhow::bail;
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use sitemirror::acquisition::{ByteStream, HttpResponse, HttpTransport};
use sitemirror::error::FetchError;
use sitemirror::renderer::{NavigationResult, RenderContext, Renderer};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use url::Url;

fn normalize(url: &str) -> String {
    Url::parse(url).map(|u| u.to_string()).unwrap_or_else(|_| url.to_string())
}

/// Serves registered pages and assets; anything else is a 404.
#[derive(Default)]
pub struct StubTransport {
    pages: HashMap<String, String>,
    assets: HashMap<String, Vec<u8>>,
    unreachable: HashSet<String>,
    malformed: HashSet<String>,
    requests: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(normalize(url), html.to_string());
        self
    }

    pub fn asset(mut self, url: &str, body: &[u8]) -> Self {
        self.assets.insert(normalize(url), body.to_vec());
        self
    }

    /// Requests to `url` fail at the transport level.
    pub fn unreachable(mut self, url: &str) -> Self {
        self.unreachable.insert(normalize(url));
        self
    }

    /// `url` answers 200 but its payload turns out malformed after the first
    /// chunk.
    pub fn malformed(mut self, url: &str) -> Self {
        self.malformed.insert(normalize(url));
        self
    }

    /// Every URL requested so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, url: &str) -> Result<(), FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        if self.unreachable.contains(url) {
            return Err(FetchError::Transport {
                url: url.to_string(),
                message: "connection reset by peer".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.record(url)?;
        match self.pages.get(url) {
            Some(body) => Ok(HttpResponse {
                url: url.to_string(),
                final_url: url.to_string(),
                status: 200,
                body: body.clone(),
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }

    async fn get_stream(&self, url: &str) -> Result<ByteStream, FetchError> {
        self.record(url)?;
        let chunks: Vec<Result<Bytes, FetchError>> = if self.malformed.contains(url) {
            vec![
                Ok(Bytes::from_static(b"GIF89a")),
                Err(FetchError::Body {
                    url: url.to_string(),
                    message: "error decoding response body: invalid gzip header".to_string(),
                }),
            ]
        } else if let Some(body) = self.assets.get(url) {
            vec![Ok(Bytes::from(body.clone()))]
        } else {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            });
        };

        Ok(futures::stream::iter(chunks).boxed())
    }
}

/// A browser whose every page renders to the same markup.
pub struct StubRenderer {
    html: String,
    fail: bool,
    active: Arc<AtomicUsize>,
    navigations: Arc<Mutex<Vec<String>>>,
}

impl StubRenderer {
    pub fn new(html: &str) -> Self {
        Self {
            html: html.to_string(),
            fail: false,
            active: Arc::new(AtomicUsize::new(0)),
            navigations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every navigation fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("")
        }
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

#[async_trait]
impl Renderer for StubRenderer {
    async fn new_context(&self) -> anyhow::Result<Box<dyn RenderContext>> {
        self.active.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StubContext {
            html: self.html.clone(),
            fail: self.fail,
            active: Arc::clone(&self.active),
            navigations: Arc::clone(&self.navigations),
        }))
    }

    async fn shutdown(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn active_contexts(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

struct StubContext {
    html: String,
    fail: bool,
    active: Arc<AtomicUsize>,
    navigations: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl RenderContext for StubContext {
    async fn navigate(&mut self, url: &str, _timeout_ms: u64) -> anyhow::Result<NavigationResult> {
        self.navigations.lock().unwrap().push(url.to_string());
        if self.fail {
            bail!("net::ERR_NAME_NOT_RESOLVED");
        }
        Ok(NavigationResult {
            final_url: url.to_string(),
            load_time_ms: 1,
        })
    }

    async fn get_html(&self) -> anyhow::Result<String> {
        Ok(self.html.clone())
    }

    async fn close(self: Box<Self>) -> anyhow::Result<()> {
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Sorted names of the entries in `dir`; empty if it does not exist.
pub fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}
