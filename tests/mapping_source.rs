use std::{sync::Arc, time::Duration};

use provmatch::{
    CircuitPurpose, MatchReason, ProviderMatcher,
    alias::AliasStore,
    mapping_source::{HttpMappingSource, MappingSource, merge_from_source, spawn_external_merge},
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};
use url::Url;

fn source(url: Url) -> HttpMappingSource {
    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("build http client");
    HttpMappingSource::with_client(url, client)
}

/// Serve exactly one HTTP response and return the URL to request.
async fn serve_once(status_line: &'static str, body: &'static str) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    Url::parse(&format!("http://{addr}/api/provider-mappings")).expect("valid url")
}

#[tokio::test]
async fn http_source_fetches_mappings() {
    let url = serve_once(
        "200 OK",
        r#"{"mappings": {"granite": "Granite Telecommunications", "brightspeed": "lumen"}}"#,
    )
    .await;

    let mappings = source(url)
        .fetch()
        .await
        .expect("fetch mappings");

    assert_eq!(mappings.len(), 2);
    assert_eq!(
        mappings.get("granite").map(String::as_str),
        Some("Granite Telecommunications")
    );
}

#[tokio::test]
async fn merged_mappings_drive_matching() {
    let url = serve_once(
        "200 OK",
        r#"{"mappings": {"granite": "Granite Telecommunications"}}"#,
    )
    .await;
    let store = Arc::new(AliasStore::with_builtin());
    let matcher = ProviderMatcher::new(Arc::clone(&store));

    let before =
        matcher.match_providers("Granite", "Granite Telecommunications", CircuitPurpose::Primary);
    assert_eq!(before.reason, MatchReason::NoMatch);

    let merged = spawn_external_merge(
        Arc::clone(&store),
        source(url),
        Duration::from_secs(5),
    )
    .await
    .expect("merge task");
    assert!(merged);

    let after =
        matcher.match_providers("Granite", "Granite Telecommunications", CircuitPurpose::Primary);
    assert_eq!(after.reason, MatchReason::MappedProvider);
    assert_eq!(after.confidence, 95);

    // Built-in entries survive the merge.
    let rebrand = matcher.match_providers("Brightspeed", "CenturyLink", CircuitPurpose::Primary);
    assert_eq!(rebrand.reason, MatchReason::MappedProvider);
}

#[tokio::test]
async fn server_error_keeps_builtin_table() {
    let url = serve_once("503 Service Unavailable", r#"{"error": "maintenance"}"#).await;
    let store = AliasStore::with_builtin();
    let before = store.snapshot();

    let merged = merge_from_source(&store, &source(url), Duration::from_secs(5)).await;

    assert!(!merged);
    assert_eq!(*store.snapshot(), *before);
}

#[tokio::test]
async fn malformed_body_keeps_builtin_table() {
    let url = serve_once("200 OK", r#"{"mappings": "nope"}"#).await;
    let store = AliasStore::with_builtin();
    let before = store.snapshot();

    let merged = merge_from_source(&store, &source(url), Duration::from_secs(5)).await;

    assert!(!merged);
    assert_eq!(*store.snapshot(), *before);
}

#[tokio::test]
async fn unreachable_source_keeps_builtin_table() {
    // Bind then drop to get a port nobody is listening on.
    let addr = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener")
        .local_addr()
        .expect("local addr");
    let url = Url::parse(&format!("http://{addr}/api/provider-mappings")).expect("valid url");
    let store = AliasStore::with_builtin();

    let merged = merge_from_source(&store, &source(url), Duration::from_secs(5)).await;

    assert!(!merged);
    assert_eq!(store.snapshot().resolve("brightspeed"), Some("centurylink"));
}
