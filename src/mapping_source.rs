//! External provider-mapping sources and the background merge.

use std::{collections::HashMap, future::Future, sync::Arc, time::Duration};

use log::{debug, info, warn};
use serde::Deserialize;
use tokio::task::JoinHandle;
use url::Url;

use crate::{
    alias::AliasStore,
    error::{ProviderError, Result},
};

/// Anything that can produce a normalized-key to canonical-name mapping.
pub trait MappingSource: Send + Sync + 'static {
    /// Read the full mapping.
    ///
    /// # Errors
    ///
    /// Returns an error on transport, status or schema failures.
    fn fetch(&self) -> impl Future<Output = Result<HashMap<String, String>>> + Send;
}

/// Response body of the mapping endpoint.
#[derive(Debug, Deserialize)]
struct MappingsResponse {
    mappings: HashMap<String, String>,
}

/// Parse a `{ "mappings": { key: canonical } }` body.
///
/// # Errors
///
/// Returns [`ProviderError::MappingSchema`] if the body does not have that shape.
pub fn parse_mappings(body: &str) -> Result<HashMap<String, String>> {
    let response: MappingsResponse = serde_json::from_str(body)?;
    Ok(response.mappings)
}

/// Fetches mappings with a JSON `GET`.
#[derive(Debug, Clone)]
pub struct HttpMappingSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpMappingSource {
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// Use a preconfigured client (proxy, TLS or timeout settings).
    #[must_use]
    pub fn with_client(url: Url, client: reqwest::Client) -> Self {
        Self { client, url }
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl MappingSource for HttpMappingSource {
    async fn fetch(&self) -> Result<HashMap<String, String>> {
        debug!("Fetching provider mappings from {}", self.url);

        let response = self.client.get(self.url.clone()).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {e}"));
            return Err(ProviderError::MappingSourceApi { status, message });
        }

        let body = response.text().await?;
        let mappings = parse_mappings(&body)?;
        debug!("Fetched {} provider mappings", mappings.len());
        Ok(mappings)
    }
}

/// Fetch from `source` within `timeout`, then merge into `store`.
///
/// Never fails: transport, status, schema and timeout errors are logged
/// and the store keeps its current table. Returns whether a merge happened.
pub async fn merge_from_source<S: MappingSource>(
    store: &AliasStore,
    source: &S,
    timeout: Duration,
) -> bool {
    let fetched = match tokio::time::timeout(timeout, source.fetch()).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::FetchTimeout(timeout)),
    };

    match fetched {
        Ok(mappings) => {
            store.merge_external(&mappings);
            true
        }
        Err(e) => {
            warn!("Could not load provider mappings, keeping built-in table: {e}");
            false
        }
    }
}

/// Run [`merge_from_source`] on a background task.
///
/// Matching against `store` works immediately; the merged table is swapped
/// in when the fetch completes. The handle may be awaited or dropped.
pub fn spawn_external_merge<S: MappingSource>(
    store: Arc<AliasStore>,
    source: S,
    timeout: Duration,
) -> JoinHandle<bool> {
    info!("Loading external provider mappings in the background");
    tokio::spawn(async move { merge_from_source(&store, &source, timeout).await })
}

/// Wait for a merge started by [`spawn_external_merge`].
///
/// A panicked or cancelled task is logged and reported as no merge.
pub async fn join_merge(handle: JoinHandle<bool>) -> bool {
    handle.await.unwrap_or_else(|e| {
        warn!("Provider mapping merge task failed, keeping built-in table: {e}");
        false
    })
}
