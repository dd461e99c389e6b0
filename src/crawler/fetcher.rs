//! HTTP fetcher implementation
//!
//! This module handles every HTTP request the crawler makes:
//! - Building the HTTP client with the configured timeout
//! - Plain GET requests with the client's default redirect policy
//! - Progressive body reads decoded as text
//! - Error classification into [`FetchError`]

use crate::config::FetcherConfig;
use crate::{FetchError, FetchResult};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Anything that can turn a URL into page text
///
/// The coordinator only talks to pages through this trait, so a crawl can be
/// driven by [`HttpFetcher`] in production or by an in-memory map in tests.
pub trait PageSource {
    /// Fetches `url` and returns its body as text
    fn fetch(&self, url: &str) -> impl Future<Output = FetchResult<String>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// No custom headers, cookies or redirect overrides are set; only the request
/// timeout comes from the configuration.
///
/// # Example
///
/// ```no_run
/// use spider_harvest::config::FetcherConfig;
/// use spider_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
}

/// Fetches a URL and returns the full body as text
///
/// # Request Flow
///
/// 1. Parse the URL; reject if malformed
/// 2. Send the GET request
/// 3. Reject any non-2xx status
/// 4. Read the body chunk by chunk into a growable buffer
/// 5. Decode as UTF-8, replacing invalid sequences
///
/// The buffer is never sized from `Content-Length`, so a lying header cannot
/// force a large allocation up front.
///
/// # Error Mapping
///
/// | Condition | Error |
/// |-----------|-------|
/// | Unparseable URL | `InvalidUrl` |
/// | Timeout (request or body) | `Timeout` |
/// | Connection refused / DNS / TLS | `Connect` |
/// | Non-success status | `Status` |
/// | Body stream failure | `Body` |
/// | Anything else | `Http` |
pub async fn fetch_page(client: &Client, url: &str) -> FetchResult<String> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let mut response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let mut body = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => body.extend_from_slice(&chunk),
            Ok(None) => break,
            Err(e) if e.is_timeout() => {
                return Err(FetchError::Timeout {
                    url: url.to_string(),
                })
            }
            Err(source) => {
                return Err(FetchError::Body {
                    url: url.to_string(),
                    source,
                })
            }
        }
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    let url = url.to_string();
    if error.is_timeout() {
        FetchError::Timeout { url }
    } else if error.is_connect() {
        FetchError::Connect { url, source: error }
    } else {
        FetchError::Http { url, source: error }
    }
}

/// [`PageSource`] backed by a real HTTP client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    /// Wraps an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl PageSource for HttpFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchResult<String>> + Send {
        fetch_page(&self.client, url)
    }
}
