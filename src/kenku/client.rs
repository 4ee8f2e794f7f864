//! HTTP client for the KenkuFM remote-control API
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.0.0: Typed GET/PUT wrapper with failure classification

use anyhow::Result;
use log::{debug, error, info};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::error::ClassifiedFailure;
use super::models::KenkuId;

/// Thin typed wrapper around the remote-control API
///
/// Every call is a single attempt bounded by the configured timeout. Failures are
/// classified and logged here, then returned to the caller; nothing is retried.
#[derive(Clone)]
pub struct KenkuClient {
    http: reqwest::Client,
    base_url: String,
}

impl KenkuClient {
    /// Create a client for `base_url` (e.g. `http://127.0.0.1:3333`)
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("KenkuChat/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL for a resource path such as `/v1/playlist`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a listing (playlists, soundboards, ...)
    pub async fn fetch_collection<T: DeserializeOwned>(
        &self,
        path: &str,
        task: &str,
    ) -> Result<T, ClassifiedFailure> {
        self.get_json(path, task).await
    }

    /// GET a playback snapshot
    pub async fn fetch_state<T: DeserializeOwned>(
        &self,
        path: &str,
        task: &str,
    ) -> Result<T, ClassifiedFailure> {
        self.get_json(path, task).await
    }

    /// PUT a playback command with an optional `{"id": ...}` body
    ///
    /// Returns the echoed id when the API sends one back, `None` for empty bodies.
    pub async fn issue_command(
        &self,
        path: &str,
        payload: Option<&KenkuId>,
        task: &str,
    ) -> Result<Option<KenkuId>, ClassifiedFailure> {
        let body = self.send(Method::PUT, path, payload, task).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| self.fail(ClassifiedFailure::from_decode(e, task)))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        task: &str,
    ) -> Result<T, ClassifiedFailure> {
        let body = self.send(Method::GET, path, None, task).await?;
        serde_json::from_str(&body).map_err(|e| self.fail(ClassifiedFailure::from_decode(e, task)))
    }

    /// Perform one request and return the raw body of a 2xx response
    async fn send(
        &self,
        method: Method,
        path: &str,
        payload: Option<&KenkuId>,
        task: &str,
    ) -> Result<String, ClassifiedFailure> {
        let url = self.url(path);
        info!("{method} {url} ({task})");

        let mut request = self.http.request(method, &url);
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.fail(ClassifiedFailure::from_reqwest(e, task)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok();
            return Err(self.fail(ClassifiedFailure::from_status(status.as_u16(), body, task)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.fail(ClassifiedFailure::from_reqwest(e, task)))?;
        debug!("Response from {url}: {body}");
        Ok(body)
    }

    fn fail(&self, failure: ClassifiedFailure) -> ClassifiedFailure {
        error!("[{}] {}", failure.kind, failure.message);
        failure
    }
}
