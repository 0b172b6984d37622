// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! Settings shared by every page of a mirroring run.

use super::{MirrorRequest, DEFAULT_OUTPUT_DIR};
use crate::acquisition::http_client::{HttpClient, DEFAULT_TIMEOUT_MS};
use crate::error::MirrorError;
use crate::renderer::DEFAULT_NAVIGATION_TIMEOUT_MS;
use std::path::{Path, PathBuf};

/// Where pages go and how long fetching them may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorOptions {
    root: PathBuf,
    request_timeout_ms: u64,
    navigation_timeout_ms: u64,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_OUTPUT_DIR),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            navigation_timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
        }
    }
}

impl MirrorOptions {
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Timeout for each HTTP request, page or asset.
    pub fn with_request_timeout(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    pub fn with_navigation_timeout(mut self, timeout_ms: u64) -> Self {
        self.navigation_timeout_ms = timeout_ms;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn request_timeout_ms(&self) -> u64 {
        self.request_timeout_ms
    }

    pub fn navigation_timeout_ms(&self) -> u64 {
        self.navigation_timeout_ms
    }

    /// A request for `url` under the configured root.
    pub fn request(&self, url: &str) -> Result<MirrorRequest, MirrorError> {
        MirrorRequest::new(url, &self.root)
    }

    /// An HTTP client honouring the request timeout.
    pub fn http_client(&self) -> reqwest::Result<HttpClient> {
        HttpClient::new(self.request_timeout_ms)
    }
}
