//! Downloads station observations from the IEM with a bounded retry loop.

use std::time::Duration;

use anyhow::Result;

/// Production ASOS download endpoint. Plain HTTP: hosts without the Lets
/// Encrypt roots cannot negotiate the HTTPS endpoint.
const DATA_URL: &str = "http://mesonet.agron.iastate.edu/cgi-bin/request/asos.py?";

/// Production network metadata endpoint.
const NETWORK_URL: &str = "https://mesonet.agron.iastate.edu/geojson/network";

const MAX_ATTEMPTS: usize = 6;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Endpoints and retry policy for the IEM services.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Data endpoint, ready for query parameters (trailing `?`).
    pub data_url: String,
    /// Base of the per-network station metadata endpoint.
    pub network_url: String,
    /// Attempts per station before the download is abandoned.
    pub max_attempts: usize,
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Pause between failed attempts.
    pub retry_delay: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_url: DATA_URL.to_string(),
            network_url: NETWORK_URL.to_string(),
            max_attempts: MAX_ATTEMPTS,
            timeout: REQUEST_TIMEOUT,
            retry_delay: RETRY_DELAY,
        }
    }
}

/// Outcome of fetching one station's observations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Download {
    /// The service answered with a usable body.
    Complete(String),
    /// Every attempt failed; the station gets an empty file.
    Exhausted,
}

impl Download {
    /// The payload to persist, empty when the download was abandoned.
    pub fn into_text(self) -> String {
        match self {
            Download::Complete(body) => body,
            Download::Exhausted => String::new(),
        }
    }
}

/// Fetches observation data, treating every failure as retryable.
pub struct Downloader {
    client: reqwest::Client,
    max_attempts: usize,
    retry_delay: Duration,
}

impl Downloader {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            max_attempts: config.max_attempts,
            retry_delay: config.retry_delay,
        })
    }

    /// Fetches `uri`, returning the first non-empty body that does not start
    /// with `ERROR`.
    ///
    /// The IEM keeps inbound request volume in check by answering
    /// `ERROR: ...` instead of failing the request, so such bodies are
    /// retried like transport faults but without a console line.
    pub async fn fetch(&self, uri: &str) -> Download {
        for attempt in 1..=self.max_attempts {
            match self.request(uri).await {
                Ok(body) if !body.is_empty() && !body.starts_with("ERROR") => {
                    return Download::Complete(body);
                }
                Ok(_) => {}
                Err(err) => println!("download of {} failed with {}", uri, err),
            }

            if attempt < self.max_attempts {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        println!("Exhausted attempts to download {}, returning empty data", uri);

        Download::Exhausted
    }

    async fn request(&self, uri: &str) -> Result<String, reqwest::Error> {
        self.client
            .get(uri)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}


// -- Tests -------------------------------------------------------------------
