//! Store-locator preview API service.
//!
//! HTTP server that renders social preview images showing live stock
//! availability for an item at a physical store, fronted by a Redis edge
//! cache.

pub mod handlers;
pub mod maps;
pub mod raster;
pub mod request;
pub mod state;
