use super::types::HttpFetcher;
use super::utils::check_status;
use crate::error::{Result, WsawError};
use async_trait::async_trait;
use reqwest::{header, redirect, Client};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

const USER_AGENT: &str = concat!("wsaw/", env!("CARGO_PKG_VERSION"));
const REDIRECT_LIMIT: usize = 10;
const POOL_IDLE_TIMEOUT_SEC: u64 = 90;
const POOL_MAX_IDLE_PER_HOST: usize = 32; // icons usually share a CDN host

/// Build the reqwest client shared by page and icon requests.
///
/// No request timeout is set; the transport defaults apply.
pub(crate) fn build_client() -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("text/html,application/xhtml+xml,image/*;q=0.9,*/*;q=0.8"),
    );

    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .redirect(redirect::Policy::limited(REDIRECT_LIMIT))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SEC))
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .build()
        .map_err(|e| WsawError::Http(format!("failed to build client: {e}")))
}

/// [`HttpFetcher`] backed by a pooled `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client()?,
        })
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WsawError::Http(format!("request to {url} failed: {e}")))?;

        check_status(response.status()).map_err(WsawError::Http)?;

        let body = response
            .bytes()
            .await
            .map_err(|e| WsawError::Http(format!("failed to read {url}: {e}")))?;
        Ok(body.to_vec())
    }
}

/// In-memory [`HttpFetcher`] serving canned bodies.
///
/// Unknown URLs answer with a 404 error. Every call is counted, which makes
/// it handy for asserting that something was (or was not) downloaded.
#[derive(Default)]
pub struct MemoryFetcher {
    bodies: Mutex<HashMap<String, Vec<u8>>>,
    requests: AtomicUsize,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.insert(url, body);
        self
    }

    /// Replace (or add) the body served for `url`.
    pub fn insert(&self, url: &str, body: impl Into<Vec<u8>>) {
        if let Ok(mut bodies) = self.bodies.lock() {
            bodies.insert(url.to_string(), body.into());
        }
    }

    pub fn remove(&self, url: &str) {
        if let Ok(mut bodies) = self.bodies.lock() {
            bodies.remove(url);
        }
    }

    /// Number of `get` calls served so far, successful or not.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpFetcher for MemoryFetcher {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let bodies = self
            .bodies
            .lock()
            .map_err(|_| WsawError::Http("memory fetcher poisoned".into()))?;
        bodies
            .get(url)
            .cloned()
            .ok_or_else(|| WsawError::Http(format!("status 404 (not found) for {url}")))
    }
}
