// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! Progress event types and broadcast channel for mirroring telemetry.
//!
//! A mirroring pass emits `ProgressEvent`s as it localizes assets. They flow
//! through a `tokio::sync::broadcast` channel to all subscribers (the CLI's
//! verbose printer, tests). When no subscriber exists, events are silently
//! dropped.

use crate::mirror::AssetKind;
use serde::{Deserialize, Serialize};

/// A progress event emitted during a mirroring pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// The page URL this event belongs to.
    pub url: String,
    /// Monotonically increasing sequence number within the pass.
    pub seq: u64,
    /// The kind of progress event.
    pub event: MirrorEvent,
}

/// The specific kind of progress event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MirrorEvent {
    /// The page HTML was obtained.
    PageLoaded { bytes: usize },
    /// An asset was downloaded and its reference rewritten.
    AssetLocalized {
        kind: AssetKind,
        url: String,
        local_path: String,
    },
    /// A reference was left alone because it does not name a file.
    AssetSkipped {
        kind: AssetKind,
        url: String,
        reason: String,
    },
    /// An asset could not be downloaded; its reference keeps the remote URL.
    AssetFailed {
        kind: AssetKind,
        url: String,
        message: String,
    },
    /// The rewritten page was written to disk.
    PageSaved { filename: String },
}

/// Sender handle for emitting progress events.
pub type ProgressSender = tokio::sync::broadcast::Sender<ProgressEvent>;

/// Receiver handle for consuming progress events.
pub type ProgressReceiver = tokio::sync::broadcast::Receiver<ProgressEvent>;

/// Create a new progress broadcast channel with a bounded buffer.
///
/// 256 events covers a page with a couple of hundred assets before a slow
/// subscriber starts lagging.
pub fn channel() -> (ProgressSender, ProgressReceiver) {
    tokio::sync::broadcast::channel(256)
}

/// Emit a progress event, silently ignoring send errors
/// (which occur when no receivers are listening).
pub fn emit(tx: &Option<ProgressSender>, url: &str, seq: &mut u64, event: MirrorEvent) {
    if let Some(ref sender) = tx {
        *seq += 1;
        let _ = sender.send(ProgressEvent {
            url: url.to_string(),
            seq: *seq,
            event,
        });
    }
}

impl std::fmt::Display for MirrorEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PageLoaded { bytes } => write!(f, "page loaded ({bytes} bytes)"),
            Self::AssetLocalized {
                kind,
                url,
                local_path,
            } => write!(f, "{kind} {url} -> {local_path}"),
            Self::AssetSkipped { kind, url, reason } => write!(f, "{kind} {url} skipped: {reason}"),
            Self::AssetFailed { kind, url, message } => write!(f, "{kind} {url} failed: {message}"),
            Self::PageSaved { filename } => write!(f, "saved {filename}"),
        }
    }
}
