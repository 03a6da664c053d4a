//! Common types and utilities shared across all stock-locator services.

pub mod error;
pub mod item;
pub mod stock;
pub mod store;
pub mod time;

pub use error::{LocatorError, LocatorResult};
pub use item::Item;
pub use stock::{classify, RestockRecord, StatusStyle, StockObservation, StockStatus};
pub use store::{CountryDatum, Store};
