//! Store and country metadata types.

use serde::{Deserialize, Serialize};

/// A physical store location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    /// ISO 3166-1 alpha-2 country code, lowercase.
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Country metadata for a store's region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryDatum {
    pub name: String,
    pub code: String,
}
