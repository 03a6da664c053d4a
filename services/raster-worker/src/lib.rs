//! Rasterization worker library.

pub mod rasterize;
