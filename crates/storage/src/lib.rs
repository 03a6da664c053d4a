//! Storage layer: inventory database, preview cache, and store directory.

pub mod cache;
pub mod directory;
pub mod inventory;

pub use cache::{PreviewCache, PreviewCacheKey};
pub use directory::StoreDirectory;
pub use inventory::Inventory;
