// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! Async HTTP client wrapping reqwest.
//!
//! Every request carries the same fixed header set so pages and their assets
//! are requested the way a desktop browser's XHR would request them.

use super::{ByteStream, HttpResponse, HttpTransport};
use crate::error::FetchError;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, CACHE_CONTROL, CONNECTION, PRAGMA,
};
use std::time::Duration;

/// Desktop browser user-agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_10_1) \
                              AppleWebKit/537.36 (KHTML, like Gecko) \
                              Chrome/39.0.2171.95 Safari/537.36";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static("XMLHttpRequest"),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers
}

/// Classify an error raised while reading a response body.
///
/// Only a payload that cannot be decoded is a body error. A reset, a
/// premature close or a timeout is a transport failure.
fn body_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_decode() {
        FetchError::Body {
            url: url.to_string(),
            message: e.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}

/// reqwest-backed [`HttpTransport`].
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client with the fixed header set and a bounded timeout.
    pub fn new(timeout_ms: u64) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .default_headers(default_headers())
            .build()?;

        Ok(Self { client })
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }
}

#[async_trait]
impl HttpTransport for HttpClient {
    /// The body is decoded with the charset named in `Content-Type`,
    /// falling back to UTF-8.
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let resp = self.send(url).await?;
        let status = resp.status().as_u16();
        let final_url = resp.url().to_string();

        let body = resp.text().await.map_err(|e| body_error(url, e))?;

        Ok(HttpResponse {
            url: url.to_string(),
            final_url,
            status,
            body,
        })
    }

    async fn get_stream(&self, url: &str) -> Result<ByteStream, FetchError> {
        let resp = self.send(url).await?;

        let owned = url.to_string();
        Ok(resp
            .bytes_stream()
            .map(move |chunk| chunk.map_err(|e| body_error(&owned, e)))
            .boxed())
    }
}
