//! Stock status classification and presentation styles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One reported inventory reading for an item at a store.
///
/// Immutable once recorded; produced by the external ingestion pipeline and
/// read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockObservation {
    pub quantity: i64,
    pub reported_at: DateTime<Utc>,
}

/// A predicted restock window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestockRecord {
    pub quantity: i64,
    pub reported_at: DateTime<Utc>,
    /// Earliest expected arrival.
    pub earliest: DateTime<Utc>,
    /// Latest expected arrival.
    pub latest: DateTime<Utc>,
}

/// Discrete availability state. Derived, never persisted; recomputed on every
/// render from the current observation and pending restocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
    RestockExpected,
    Unknown,
}

/// Quantity at or above this is considered fully in stock.
pub const IN_STOCK_THRESHOLD: i64 = 15;

/// Classify availability from the most recent observation and pending restocks.
///
/// The decision order matters:
/// 1. No observation: `RestockExpected` if any restock is pending, else `Unknown`.
/// 2. Quantity >= 15: `InStock`, regardless of restocks.
/// 3. Quantity == 0: `OutOfStock`, upgraded to `RestockExpected` when a
///    restock is pending.
/// 4. Anything else (1..=14): `LowStock`.
pub fn classify(
    current: Option<&StockObservation>,
    pending_restocks: &[RestockRecord],
) -> StockStatus {
    let Some(current) = current else {
        return if pending_restocks.is_empty() {
            StockStatus::Unknown
        } else {
            StockStatus::RestockExpected
        };
    };

    let mut status = StockStatus::LowStock;

    if current.quantity >= IN_STOCK_THRESHOLD {
        status = StockStatus::InStock;
    } else if current.quantity == 0 {
        status = StockStatus::OutOfStock;

        if !pending_restocks.is_empty() {
            status = StockStatus::RestockExpected;
        }
    }

    status
}

/// Presentation attached to a stock status: panel color and map pin markup.
///
/// The status -> style table is fixed at process start and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    /// Hex color used for the card panel and chart accents.
    pub color: &'static str,
    /// Inline SVG fragment for the map pin, drawn in a 27x40 box.
    pub pin: &'static str,
}

impl StockStatus {
    /// Look up the static presentation style for this status.
    pub fn style(&self) -> StatusStyle {
        match self {
            StockStatus::InStock => StatusStyle {
                color: "#2ed573",
                pin: PIN_IN_STOCK,
            },
            StockStatus::LowStock => StatusStyle {
                color: "#ffa502",
                pin: PIN_LOW_STOCK,
            },
            StockStatus::OutOfStock => StatusStyle {
                color: "#ff4757",
                pin: PIN_OUT_OF_STOCK,
            },
            StockStatus::RestockExpected => StatusStyle {
                color: "#5352ed",
                pin: PIN_RESTOCK_EXPECTED,
            },
            StockStatus::Unknown => StatusStyle {
                color: "#747d8c",
                pin: PIN_UNKNOWN,
            },
        }
    }
}

// Map pin glyphs, one per status. Same teardrop shape, colored per status,
// with a white well in the head.
const PIN_IN_STOCK: &str = r##"<path d="M13.5 0C6.04 0 0 6.04 0 13.5 0 23.63 13.5 40 13.5 40s13.5-16.37 13.5-26.5C27 6.04 20.96 0 13.5 0z" fill="#2ed573"/><circle cx="13.5" cy="13.5" r="5.5" fill="#ffffff"/>"##;

const PIN_LOW_STOCK: &str = r##"<path d="M13.5 0C6.04 0 0 6.04 0 13.5 0 23.63 13.5 40 13.5 40s13.5-16.37 13.5-26.5C27 6.04 20.96 0 13.5 0z" fill="#ffa502"/><circle cx="13.5" cy="13.5" r="5.5" fill="#ffffff"/>"##;

const PIN_OUT_OF_STOCK: &str = r##"<path d="M13.5 0C6.04 0 0 6.04 0 13.5 0 23.63 13.5 40 13.5 40s13.5-16.37 13.5-26.5C27 6.04 20.96 0 13.5 0z" fill="#ff4757"/><circle cx="13.5" cy="13.5" r="5.5" fill="#ffffff"/>"##;

const PIN_RESTOCK_EXPECTED: &str = r##"<path d="M13.5 0C6.04 0 0 6.04 0 13.5 0 23.63 13.5 40 13.5 40s13.5-16.37 13.5-26.5C27 6.04 20.96 0 13.5 0z" fill="#5352ed"/><circle cx="13.5" cy="13.5" r="5.5" fill="#ffffff"/>"##;

const PIN_UNKNOWN: &str = r##"<path d="M13.5 0C6.04 0 0 6.04 0 13.5 0 23.63 13.5 40 13.5 40s13.5-16.37 13.5-26.5C27 6.04 20.96 0 13.5 0z" fill="#747d8c"/><circle cx="13.5" cy="13.5" r="5.5" fill="#ffffff"/>"##;
