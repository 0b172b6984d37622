// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for page fetching and mirroring.

use std::path::PathBuf;
use thiserror::Error;

/// A failed HTTP exchange, for either the page itself or one of its assets.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response started but its payload could not be decoded.
    #[error("malformed response body from {url}: {message}")]
    Body { url: String, message: String },
}

impl FetchError {
    /// The URL the failed request was sent to.
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Status { url, .. } | Self::Body { url, .. } => url,
        }
    }
}

/// A mirroring pass that could not complete.
///
/// Only page-level problems surface here. Asset failures are logged and
/// absorbed by the pass.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("rendering {url} failed: {message}")]
    Render { url: String, message: String },

    #[error("invalid page URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("page URL has no host: {0}")]
    MissingHost(String),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MirrorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
