//! Chart geometry and SVG card composition for stock previews.

pub mod card;
pub mod chart;
pub mod scale;

pub use card::StoreCard;
pub use chart::stock_area_path;
pub use scale::{LinearScale, TimeScale};
