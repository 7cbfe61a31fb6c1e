//! Username probing.
//!
//! A probe substitutes the username into a platform url, issues one GET
//! through a [`Fetcher`] and classifies the outcome. Transport errors are
//! captured as [`ProbeOutcome::TransportFailure`] and never escape.

use crate::classifier::classify;
use crate::errors::FindmeResult;
use crate::models::{PlatformDefinition, ProbeOutcome, Verdict};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = concat!("findme/", env!("CARGO_PKG_VERSION"));

/// HTTP transport used by probes.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, headers: &BTreeMap<String, String>) -> ProbeOutcome;
}

/// reqwest-backed fetcher with a fixed per-request timeout and no retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> FindmeResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, headers: &BTreeMap<String, String>) -> ProbeOutcome {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                log::debug!("Request to {} failed: {}", url, e);
                return ProbeOutcome::TransportFailure(e.to_string());
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => {
                log::trace!("{} -> {} ({} bytes)", url, status, body.len());
                ProbeOutcome::Response { status, body }
            }
            Err(e) => {
                log::debug!("Reading body from {} failed: {}", url, e);
                ProbeOutcome::TransportFailure(e.to_string())
            }
        }
    }
}

/// Check one platform for `username`.
pub async fn probe_username(
    fetcher: &dyn Fetcher,
    definition: &PlatformDefinition,
    username: &str,
) -> Verdict {
    let url = definition.profile_url(username);
    let outcome = fetcher.fetch(&url, &definition.headers).await;
    classify(definition, &url, &outcome)
}
