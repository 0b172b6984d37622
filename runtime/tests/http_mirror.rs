// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! Static mirroring over real HTTP against a local mock server.

mod common;

use assert_json_diff::assert_json_eq;
use common::files_in;
use sitemirror::acquisition::http_client::HttpClient;
use sitemirror::error::{FetchError, MirrorError};
use sitemirror::mirror::{Document, MirrorRequest, PageMirror, StaticMirror};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = r#"<html><head>
<link rel="stylesheet" href="/css/site.css">
<script src="/js/app.js"></script>
</head><body>
<a href="/one">one</a><a href="/two">two</a>
<img src="/img/logo.png"><img src="/img/missing.png">
</body></html>"#;

fn host_dir(server: &MockServer) -> String {
    let port = server.address().port();
    format!("127.0.0.1_{port}")
}

async fn serve(server: &MockServer, route: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("x-requested-with", "XMLHttpRequest"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_mirror_page_over_http() {
    let server = MockServer::start().await;
    serve(&server, "/", PAGE.as_bytes()).await;
    serve(&server, "/img/logo.png", b"\x89PNG").await;
    serve(&server, "/js/app.js", b"app()").await;
    serve(&server, "/css/site.css", b"body{}").await;
    Mock::given(method("GET"))
        .and(path("/img/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let client = HttpClient::new(5_000).unwrap();
    let request = MirrorRequest::new(&server.uri(), tmp.path()).unwrap();
    let result = StaticMirror::new(client).mirror(&request).await.unwrap();

    let host = host_dir(&server);
    assert_json_eq!(
        serde_json::to_value(&result).unwrap(),
        serde_json::json!({
            "filename": format!("{host}.html"),
            "links_num": 2,
            "images_num": 2,
            "script_num": 1,
        })
    );

    // logo_0, missing consumes 1, app_2, site_3
    assert_eq!(
        files_in(&tmp.path().join(&host)),
        vec!["app_2.js", "logo_0.png", "site_3.css"]
    );
    assert_eq!(
        std::fs::read(tmp.path().join(&host).join("logo_0.png")).unwrap(),
        b"\x89PNG"
    );

    let html = std::fs::read_to_string(tmp.path().join(format!("{host}.html"))).unwrap();
    let doc = Document::parse(&html);
    assert_eq!(
        doc.attr_values("img", "src"),
        vec![
            Some(format!("{host}/logo_0.png")),
            Some("/img/missing.png".to_string()),
        ]
    );
    assert_eq!(
        doc.attr_values("script", "src"),
        vec![Some(format!("{host}/app_2.js"))]
    );
    assert_eq!(
        doc.attr_values("link", "href"),
        vec![Some(format!("{host}/site_3.css"))]
    );
    // Anchors are counted, never rewritten
    assert_eq!(
        doc.attr_values("a", "href"),
        vec![Some("/one".to_string()), Some("/two".to_string())]
    );
}

#[tokio::test]
async fn test_page_error_status_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let client = HttpClient::new(5_000).unwrap();
    let request = MirrorRequest::new(&server.uri(), tmp.path()).unwrap();
    let err = StaticMirror::new(client).mirror(&request).await.unwrap_err();

    assert!(matches!(
        err,
        MirrorError::Fetch(FetchError::Status { status: 500, .. })
    ));
    assert!(files_in(tmp.path()).is_empty());
}

#[tokio::test]
async fn test_latin1_page_is_decoded_before_saving() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"<html><body><p>caf\xE9</p></body></html>".to_vec(),
            "text/html; charset=iso-8859-1",
        ))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let client = HttpClient::new(5_000).unwrap();
    let request = MirrorRequest::new(&server.uri(), tmp.path()).unwrap();
    StaticMirror::new(client).mirror(&request).await.unwrap();

    let html =
        std::fs::read_to_string(tmp.path().join(format!("{}.html", host_dir(&server)))).unwrap();
    assert!(html.contains("<p>café</p>"));
}

/// Accepts one connection, announces 1000 bytes, sends 10 and hangs up.
async fn truncating_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 1000\r\n\r\n0123456789")
            .await
            .unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_connection_lost_mid_asset_keeps_remote_reference() {
    let asset_host = truncating_server().await;
    let big = format!("{asset_host}/big.png");

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(format!(r#"<img src="{big}">"#), "text/html"),
        )
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let client = HttpClient::new(5_000).unwrap();
    let request = MirrorRequest::new(&server.uri(), tmp.path()).unwrap();
    StaticMirror::new(client).mirror(&request).await.unwrap();

    let host = host_dir(&server);
    assert!(files_in(&tmp.path().join(&host)).is_empty());
    let html = std::fs::read_to_string(tmp.path().join(format!("{host}.html"))).unwrap();
    assert_eq!(
        Document::parse(&html).attr_values("img", "src"),
        vec![Some(big)]
    );
}
