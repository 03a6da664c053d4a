//! Preview request parameters and validation.
//!
//! Raw query parameters are validated into a `PreviewRequest` before any
//! work happens; invalid combinations never reach the fetch pipeline.

use serde::Deserialize;

use locator_common::{Item, LocatorError, LocatorResult};
use storage::PreviewCacheKey;

/// Raw query parameters for the preview endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PreviewParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub item: Option<String>,
    #[serde(rename = "storeId")]
    pub store_id: Option<String>,
    /// Client-supplied staleness token; participates in the cache key.
    #[serde(rename = "cacheBust")]
    pub cache_bust: Option<String>,
}

/// A validated preview request.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewRequest {
    /// Preview for a single store.
    Store {
        item: Item,
        store_id: String,
        cache_bust: Option<String>,
    },
    /// Preview for the global map. Accepted but not renderable yet.
    Global {
        item: Item,
        cache_bust: Option<String>,
    },
}

impl PreviewRequest {
    /// Validate raw query parameters.
    pub fn from_params(params: PreviewParams) -> LocatorResult<Self> {
        let kind = params
            .kind
            .ok_or_else(|| LocatorError::MissingParameter("type".to_string()))?;
        let item = params
            .item
            .ok_or_else(|| LocatorError::MissingParameter("item".to_string()))?
            .parse::<Item>()?;

        match kind.as_str() {
            "map_store" => {
                let store_id = params
                    .store_id
                    .ok_or_else(|| LocatorError::MissingParameter("storeId".to_string()))?;

                Ok(PreviewRequest::Store {
                    item,
                    store_id,
                    cache_bust: params.cache_bust,
                })
            }
            "map_global" => Ok(PreviewRequest::Global {
                item,
                cache_bust: params.cache_bust,
            }),
            other => Err(LocatorError::InvalidParameter {
                param: "type".to_string(),
                message: format!("unknown type: {}", other),
            }),
        }
    }

    /// Stable cache key over the normalized request parameters.
    pub fn cache_key(&self) -> PreviewCacheKey {
        match self {
            PreviewRequest::Store {
                item,
                store_id,
                cache_bust,
            } => PreviewCacheKey {
                kind: "map_store".to_string(),
                item: item.slug().to_string(),
                store_id: Some(store_id.clone()),
                cache_bust: cache_bust.clone(),
            },
            PreviewRequest::Global { item, cache_bust } => PreviewCacheKey {
                kind: "map_global".to_string(),
                item: item.slug().to_string(),
                store_id: None,
                cache_bust: cache_bust.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(kind: &str, item: &str, store_id: Option<&str>) -> PreviewParams {
        PreviewParams {
            kind: Some(kind.to_string()),
            item: Some(item.to_string()),
            store_id: store_id.map(str::to_string),
            cache_bust: None,
        }
    }

    #[test]
    fn test_valid_store_request() {
        let request = PreviewRequest::from_params(params("map_store", "blahaj", Some("156")));
        assert_eq!(
            request.unwrap(),
            PreviewRequest::Store {
                item: Item::Blahaj,
                store_id: "156".to_string(),
                cache_bust: None,
            }
        );
    }

    #[test]
    fn test_valid_global_request() {
        let request = PreviewRequest::from_params(params("map_global", "smolhaj", None));
        assert_eq!(
            request.unwrap(),
            PreviewRequest::Global {
                item: Item::Smolhaj,
                cache_bust: None,
            }
        );
    }

    #[test]
    fn test_missing_parameters_rejected() {
        let missing_kind = PreviewRequest::from_params(PreviewParams {
            item: Some("blahaj".to_string()),
            ..Default::default()
        });
        assert!(matches!(
            missing_kind,
            Err(LocatorError::MissingParameter(p)) if p == "type"
        ));

        let missing_item = PreviewRequest::from_params(PreviewParams {
            kind: Some("map_store".to_string()),
            ..Default::default()
        });
        assert!(matches!(
            missing_item,
            Err(LocatorError::MissingParameter(p)) if p == "item"
        ));

        let missing_store = PreviewRequest::from_params(params("map_store", "blahaj", None));
        assert!(matches!(
            missing_store,
            Err(LocatorError::MissingParameter(p)) if p == "storeId"
        ));
    }

    #[test]
    fn test_unknown_values_rejected() {
        assert!(PreviewRequest::from_params(params("map_stores", "blahaj", Some("156"))).is_err());
        assert!(PreviewRequest::from_params(params("map_store", "djungelskog", Some("156"))).is_err());
    }

    #[test]
    fn test_cache_key_is_normalized() {
        let a = PreviewRequest::from_params(params("map_store", "blahaj", Some("156"))).unwrap();
        let b = PreviewRequest::from_params(params("map_store", "blahaj", Some("156"))).unwrap();
        assert_eq!(a.cache_key(), b.cache_key());
        assert_eq!(a.cache_key().to_string(), "og:map_store:blahaj:156:0");

        let mut with_bust = params("map_store", "blahaj", Some("156"));
        with_bust.cache_bust = Some("0016fa3c".to_string());
        let c = PreviewRequest::from_params(with_bust).unwrap();
        assert_ne!(a.cache_key(), c.cache_key());
    }
}
