//! Client for the rasterization worker.
//!
//! The worker owns fonts and the SVG-to-bitmap conversion; this client just
//! submits composed markup and gets PNG bytes back. No retries here: a
//! failed or unreachable worker surfaces as `RasterizerUnavailable`.

use bytes::Bytes;
use reqwest::{header, Client};
use std::time::Duration;

use locator_common::{LocatorError, LocatorResult};

/// Client for the rasterization collaborator.
pub struct RasterClient {
    client: Client,
    endpoint: String,
}

impl RasterClient {
    pub fn new(endpoint: impl Into<String>) -> LocatorResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| LocatorError::Internal(format!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Submit SVG markup for rasterization; returns PNG bytes.
    pub async fn rasterize(&self, svg: String) -> LocatorResult<Bytes> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "image/svg+xml")
            .body(svg)
            .send()
            .await
            .map_err(|e| LocatorError::RasterizerUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LocatorError::RasterizerUnavailable(format!(
                "worker returned {}",
                response.status()
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| LocatorError::RasterizerUnavailable(e.to_string()))
    }
}
