// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! Streams asset bodies to disk.

use crate::acquisition::{ByteStream, HttpTransport};
use crate::error::FetchError;
use futures::StreamExt;
use std::path::Path;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, warn};
use url::Url;

/// Write buffer size; bodies are flushed to disk in blocks of this many bytes.
pub const CHUNK_SIZE: usize = 8192;

/// What happened to one asset download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The full body was written.
    Saved { bytes: u64 },
    /// The payload was malformed; an empty file stands in for it.
    Placeholder { reason: String },
    /// Nothing usable was written. The page keeps the remote reference.
    Failed { reason: String },
}

impl DownloadOutcome {
    /// Whether a file now exists at the target path.
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }
}

enum WriteFailure {
    /// The target file could not be opened.
    Create(std::io::Error),
    /// The connection failed mid-body.
    Transport(String),
    /// The payload could not be decoded, or a write failed.
    Partial(String),
}

/// Downloads assets through an [`HttpTransport`].
pub struct AssetDownloader<'a, T: HttpTransport + ?Sized> {
    transport: &'a T,
}

impl<'a, T: HttpTransport + ?Sized> AssetDownloader<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Fetch `url` and write its body verbatim to `path`.
    ///
    /// The parent directory must already exist.
    pub async fn download(&self, url: &Url, path: &Path) -> DownloadOutcome {
        let body = match self.transport.get_stream(url.as_str()).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Error fetching {url}: {e}");
                return DownloadOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        match write_body(body, path).await {
            Ok(bytes) => {
                debug!("saved {url} to {} ({bytes} bytes)", path.display());
                DownloadOutcome::Saved { bytes }
            }
            Err(WriteFailure::Create(e)) => {
                warn!("Error writing {url} to {}: {e}", path.display());
                DownloadOutcome::Failed {
                    reason: e.to_string(),
                }
            }
            Err(WriteFailure::Transport(reason)) => {
                warn!("Error fetching {url}: {reason}");
                if let Err(e) = tokio::fs::remove_file(path).await {
                    warn!("could not remove partial file {}: {e}", path.display());
                }
                DownloadOutcome::Failed { reason }
            }
            Err(WriteFailure::Partial(reason)) => {
                warn!("Error writing to a file {url}: {reason}");
                match tokio::fs::write(path, b"").await {
                    Ok(()) => DownloadOutcome::Placeholder { reason },
                    Err(e) => {
                        warn!("could not write placeholder {}: {e}", path.display());
                        DownloadOutcome::Failed {
                            reason: e.to_string(),
                        }
                    }
                }
            }
        }
    }
}

async fn write_body(mut body: ByteStream, path: &Path) -> Result<u64, WriteFailure> {
    let file = tokio::fs::File::create(path)
        .await
        .map_err(WriteFailure::Create)?;
    let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);
    let mut written = 0u64;

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| match e {
            FetchError::Body { .. } => WriteFailure::Partial(e.to_string()),
            _ => WriteFailure::Transport(e.to_string()),
        })?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| WriteFailure::Partial(e.to_string()))?;
        written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| WriteFailure::Partial(e.to_string()))?;
    Ok(written)
}
