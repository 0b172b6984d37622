// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP acquisition of pages and assets.
//!
//! Defines the `HttpTransport` capability the mirroring passes fetch through
//! (currently reqwest via [`http_client::HttpClient`]).

pub mod http_client;

use crate::error::FetchError;
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

/// Response body delivered chunk by chunk, in arrival order.
///
/// A connection lost mid-body yields [`FetchError::Transport`]; a payload
/// that cannot be decoded yields [`FetchError::Body`].
pub type ByteStream = BoxStream<'static, Result<Bytes, FetchError>>;

/// Response from a buffered HTTP GET request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Original requested URL.
    pub url: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

/// Performs GET requests with a fixed header set.
///
/// Implementations must turn any non-2xx status into [`FetchError::Status`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET `url` and buffer the body as text.
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
    /// GET `url` and hand back the body as a chunk stream.
    async fn get_stream(&self, url: &str) -> Result<ByteStream, FetchError>;
}
