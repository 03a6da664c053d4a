//! HTTP request handlers for the preview API.

use axum::{
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::Response,
};
use bytes::Bytes;
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use locator_common::{CountryDatum, Item, LocatorError, LocatorResult};
use renderer::StoreCard;
use storage::cache::PREVIEW_TTL;

use crate::request::{PreviewParams, PreviewRequest};
use crate::state::AppState;

// ============================================================================
// Preview
// ============================================================================

#[instrument(skip(state))]
pub async fn preview_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<PreviewParams>,
) -> Response {
    let request = match PreviewRequest::from_params(params) {
        Ok(request) => request,
        Err(e) => return error_response(&e),
    };

    match render_preview(state, &request).await {
        Ok(png) => png_response(png),
        Err(e) => {
            error!(request = ?request, error = %e, "Preview render failed");
            error_response(&e)
        }
    }
}

/// Serve from cache when possible, otherwise run the full render pipeline
/// and store the result off the response path.
async fn render_preview(
    state: Arc<AppState>,
    request: &PreviewRequest,
) -> LocatorResult<Bytes> {
    let key = request.cache_key();

    // A cache failure is a miss, not a render failure.
    let cached = match state.cache.lock().await.get(&key).await {
        Ok(hit) => hit,
        Err(e) => {
            warn!(key = %key, error = %e, "Preview cache get failed");
            None
        }
    };

    let hit = cached.is_some();
    if hit {
        info!(key = %key, "Preview cache hit");
    }

    let png = serve_or_render(cached, request, |item, store_id| {
        let state = state.clone();
        async move { render_store_preview(&state, item, &store_id).await }
    })
    .await?;

    // Fire-and-forget cache write; a failure only logs.
    if !hit {
        let state = state.clone();
        let key = key.clone();
        let png = png.clone();
        tokio::spawn(async move {
            if let Err(e) = state
                .cache
                .lock()
                .await
                .put(&key, &png, Some(PREVIEW_TTL))
                .await
            {
                warn!(key = %key, error = %e, "Failed to cache preview");
            }
        });
    }

    Ok(png)
}

/// Cache-then-dispatch: a hit is served as-is, a GLOBAL miss fails before
/// any data fetch, and only a store miss invokes the render pipeline.
async fn serve_or_render<F, Fut>(
    cached: Option<Bytes>,
    request: &PreviewRequest,
    render_store: F,
) -> LocatorResult<Bytes>
where
    F: FnOnce(Item, String) -> Fut,
    Fut: Future<Output = LocatorResult<Bytes>>,
{
    if let Some(hit) = cached {
        return Ok(hit);
    }

    match request {
        PreviewRequest::Store { item, store_id, .. } => {
            render_store(*item, store_id.clone()).await
        }
        PreviewRequest::Global { .. } => Err(LocatorError::NotImplemented(
            "global preview rendering".to_string(),
        )),
    }
}

/// The store-preview pipeline: resolve, fetch, classify, compose, rasterize.
async fn render_store_preview(
    state: &AppState,
    item: Item,
    store_id: &str,
) -> LocatorResult<Bytes> {
    let store = state
        .directory
        .find_store(store_id)
        .ok_or_else(|| LocatorError::StoreNotFound(store_id.to_string()))?;

    let country = state
        .directory
        .country_datum(store)
        .cloned()
        .unwrap_or_else(|| CountryDatum {
            name: store.country.to_uppercase(),
            code: store.country.clone(),
        });

    // Three independent reads; the first failure fails the whole render.
    let (observations, next_restock, map_image) = tokio::try_join!(
        async {
            state
                .inventory
                .stock_history(item, store_id)
                .await
                .map_err(upstream)
        },
        async {
            state
                .inventory
                .latest_restock(item, store_id)
                .await
                .map_err(upstream)
        },
        async { state.maps.thumbnail(store).await.map_err(upstream) },
    )?;

    let card = StoreCard {
        item,
        store,
        country: &country,
        observations: &observations,
        next_restock: next_restock.as_ref(),
        map_image: &map_image,
    };

    state.raster.rasterize(card.compose()).await
}

fn upstream(error: LocatorError) -> LocatorError {
    match error {
        // Map client failures are already tagged.
        LocatorError::Upstream(_) => error,
        other => LocatorError::Upstream(other.to_string()),
    }
}

fn png_response(png: Bytes) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/png")
        .header(
            header::CACHE_CONTROL,
            format!("public, max-age={}", PREVIEW_TTL.as_secs()),
        )
        .body(png.into())
        .unwrap()
}

fn error_response(error: &LocatorError) -> Response {
    let status = StatusCode::from_u16(error.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(error.to_string().into())
        .unwrap()
}

// ============================================================================
// Health
// ============================================================================

pub async fn health_handler() -> &'static str {
    "OK"
}

pub async fn ready_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let status = if state.directory.is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    Response::builder()
        .status(status)
        .body("".into())
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn store_request() -> PreviewRequest {
        PreviewRequest::Store {
            item: Item::Blahaj,
            store_id: "156".to_string(),
            cache_bust: None,
        }
    }

    #[tokio::test]
    async fn test_global_request_fails_before_any_fetch() {
        let fetches = Arc::new(AtomicUsize::new(0));
        let request = PreviewRequest::Global {
            item: Item::Blahaj,
            cache_bust: None,
        };

        let counter = fetches.clone();
        let result = serve_or_render(None, &request, move |_, _| async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Bytes::new())
        })
        .await;

        assert!(matches!(result, Err(LocatorError::NotImplemented(_))));
        assert_eq!(fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cache_hit_short_circuits_the_pipeline() {
        let fetches = Arc::new(AtomicUsize::new(0));

        let counter = fetches.clone();
        let png = serve_or_render(
            Some(Bytes::from_static(b"cached png")),
            &store_request(),
            move |_, _| async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Bytes::from_static(b"fresh png"))
            },
        )
        .await
        .unwrap();

        assert_eq!(png, Bytes::from_static(b"cached png"));
        assert_eq!(fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_store_miss_runs_the_pipeline_once() {
        let fetches = Arc::new(AtomicUsize::new(0));

        let counter = fetches.clone();
        let png = serve_or_render(None, &store_request(), move |item, store_id| async move {
            assert_eq!(item, Item::Blahaj);
            assert_eq!(store_id, "156");
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Bytes::from_static(b"fresh png"))
        })
        .await
        .unwrap();

        assert_eq!(png, Bytes::from_static(b"fresh png"));
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_upstream_wrapping_preserves_cause() {
        let wrapped = upstream(LocatorError::Database("Stock query failed: boom".to_string()));
        match wrapped {
            LocatorError::Upstream(message) => assert!(message.contains("Stock query failed")),
            other => panic!("expected Upstream, got {:?}", other),
        }
    }

    #[test]
    fn test_upstream_wrapping_is_idempotent() {
        let wrapped = upstream(LocatorError::Upstream("Map fetch returned 500".to_string()));
        assert!(matches!(wrapped, LocatorError::Upstream(m) if m == "Map fetch returned 500"));
    }

    #[test]
    fn test_error_response_statuses() {
        let bad_request = error_response(&LocatorError::NotImplemented("global".to_string()));
        assert_eq!(bad_request.status(), StatusCode::BAD_REQUEST);

        let not_found = error_response(&LocatorError::StoreNotFound("000".to_string()));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let unavailable =
            error_response(&LocatorError::RasterizerUnavailable("down".to_string()));
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);

        let upstream = error_response(&LocatorError::Upstream("boom".to_string()));
        assert_eq!(upstream.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
