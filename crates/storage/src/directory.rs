//! Store directory and country metadata.
//!
//! The directory is static reference data shipped with the binary; the
//! external source of truth changes rarely enough that a redeploy picks up
//! new stores.

use std::collections::HashMap;

use locator_common::{CountryDatum, LocatorResult, Store};

const STORES_JSON: &str = include_str!("../data/stores.json");
const COUNTRIES_JSON: &str = include_str!("../data/countries.json");

/// In-memory lookup tables for stores and countries.
pub struct StoreDirectory {
    stores: HashMap<String, Store>,
    countries: HashMap<String, CountryDatum>,
}

impl StoreDirectory {
    /// Load the directory shipped with the binary.
    pub fn embedded() -> LocatorResult<Self> {
        Self::from_json(STORES_JSON, COUNTRIES_JSON)
    }

    /// Build a directory from JSON documents.
    pub fn from_json(stores_json: &str, countries_json: &str) -> LocatorResult<Self> {
        let stores: Vec<Store> = serde_json::from_str(stores_json)?;
        let countries: Vec<CountryDatum> = serde_json::from_str(countries_json)?;

        Ok(Self {
            stores: stores.into_iter().map(|s| (s.id.clone(), s)).collect(),
            countries: countries.into_iter().map(|c| (c.code.clone(), c)).collect(),
        })
    }

    /// Look up a store by id.
    pub fn find_store(&self, store_id: &str) -> Option<&Store> {
        self.stores.get(store_id)
    }

    /// Country metadata for a store's region.
    pub fn country_datum(&self, store: &Store) -> Option<&CountryDatum> {
        self.countries.get(&store.country)
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_directory_loads() {
        let directory = StoreDirectory::embedded().unwrap();
        assert!(!directory.is_empty());
    }

    #[test]
    fn test_find_store() {
        let directory = StoreDirectory::embedded().unwrap();

        let store = directory.find_store("156").unwrap();
        assert_eq!(store.name, "Philadelphia");
        assert_eq!(store.country, "us");

        assert!(directory.find_store("000").is_none());
    }

    #[test]
    fn test_country_datum() {
        let directory = StoreDirectory::embedded().unwrap();

        let store = directory.find_store("445").unwrap();
        let country = directory.country_datum(store).unwrap();
        assert_eq!(country.name, "Sweden");
        assert_eq!(country.code, "se");
    }

    #[test]
    fn test_every_store_has_a_country() {
        let directory = StoreDirectory::embedded().unwrap();
        for store in directory.stores.values() {
            assert!(
                directory.country_datum(store).is_some(),
                "no country datum for store {}",
                store.id
            );
        }
    }
}
