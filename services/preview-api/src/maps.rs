//! Static map thumbnail client (Mapbox Static Images API).

use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;

use locator_common::{LocatorError, LocatorResult, Store};

/// Thumbnail size matching the card's map panel.
const THUMBNAIL_WIDTH: u32 = 675;
const THUMBNAIL_HEIGHT: u32 = 625;
const THUMBNAIL_ZOOM: f64 = 11.0;

const MAP_STYLE: &str = "mapbox/streets-v12";

/// Client for the map-tile collaborator.
pub struct MapClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl MapClient {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> LocatorResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| LocatorError::Internal(format!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            access_token: access_token.into(),
        })
    }

    /// Fetch a static map thumbnail centered on the store.
    pub async fn thumbnail(&self, store: &Store) -> LocatorResult<Bytes> {
        let url = format!(
            "{}/styles/v1/{}/static/{},{},{}/{}x{}?access_token={}",
            self.base_url,
            MAP_STYLE,
            store.longitude,
            store.latitude,
            THUMBNAIL_ZOOM,
            THUMBNAIL_WIDTH,
            THUMBNAIL_HEIGHT,
            self.access_token,
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LocatorError::Upstream(format!("Map fetch failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(LocatorError::Upstream(format!(
                "Map fetch returned {}",
                response.status()
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| LocatorError::Upstream(format!("Map body read failed: {}", e)))
    }
}
