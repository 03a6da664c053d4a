//! Fixed-layout SVG card composition for preview images.
//!
//! The card is a 1000x650 canvas: a left column with branding, a
//! status-colored stock panel (store identity, history chart, current and
//! next-restock figures), and a right-hand map panel with a status pin and
//! attribution overlay. The composed markup is handed to the rasterization
//! worker as-is.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use locator_common::{classify, time, CountryDatum, Item, RestockRecord, StockObservation, Store};

use crate::chart;

pub const CARD_WIDTH: u32 = 1000;
pub const CARD_HEIGHT: u32 = 650;

const FONT_FAMILY: &str = "Poppins";

/// Everything needed to lay out a store preview card.
pub struct StoreCard<'a> {
    pub item: Item,
    pub store: &'a Store,
    pub country: &'a CountryDatum,
    /// Oldest first.
    pub observations: &'a [StockObservation],
    pub next_restock: Option<&'a RestockRecord>,
    /// PNG bytes from the map thumbnail collaborator.
    pub map_image: &'a [u8],
}

impl StoreCard<'_> {
    /// Compose the card as standalone SVG markup.
    pub fn compose(&self) -> String {
        let current = self.observations.last();
        let restocks: Vec<RestockRecord> = self.next_restock.cloned().into_iter().collect();
        let style = classify(current, &restocks).style();

        let area_path = chart::stock_area_path(self.observations);

        let current_figure = current
            .map(|o| o.quantity.to_string())
            .unwrap_or_else(|| "--".to_string());
        let current_label = current
            .map(|o| time::format_day_time(o.reported_at))
            .unwrap_or_else(|| "No Data".to_string());

        let restock_figure = self
            .next_restock
            .map(|r| r.quantity.to_string())
            .unwrap_or_else(|| "--".to_string());
        let restock_label = self
            .next_restock
            .map(|r| {
                format!(
                    "Expected {} – {}",
                    time::format_day(r.earliest),
                    time::format_day(r.latest)
                )
            })
            .unwrap_or_else(|| "No restock expected".to_string());

        let map_href = format!("data:image/png;base64,{}", STANDARD.encode(self.map_image));

        format!(
            r##"<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="{font}" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
<defs>
<linearGradient id="area-gradient" x1="0" y1="0" x2="0" y2="1">
<stop offset="0%" stop-color="rgba(255, 255, 255, 0.7)"/>
<stop offset="100%" stop-color="rgba(255, 255, 255, 0.075)"/>
</linearGradient>
<clipPath id="map-clip">
<path d="M345 25H1000V650H325V45Q325 25 345 25Z"/>
</clipPath>
</defs>
<rect width="{width}" height="{height}" fill="#ffffff"/>
<text x="162" y="56" text-anchor="middle" font-size="32" font-weight="700" fill="#1f2937">blahaj.app</text>
<rect x="0" y="78" width="325" height="572" fill="{color}"/>
<text x="24" y="114" font-size="20" font-weight="600" fill="#ffffff">{country}</text>
<text x="24" y="148" font-size="32" font-weight="700" fill="#ffffff">{store}</text>
<rect x="0" y="170" width="325" height="46" fill="#000000" fill-opacity="0.15"/>
<text x="162" y="201" text-anchor="middle" font-size="20" font-weight="700" fill="#ffffff">{item} Inventory</text>
<rect x="0" y="216" width="325" height="128" fill="#000000" fill-opacity="0.10"/>
<svg x="0" y="216" width="365" height="128">
<path d="{area_path}" stroke="url(#area-gradient)" stroke-width="2" fill="url(#area-gradient)"/>
</svg>
<text x="24" y="386" font-size="18" font-weight="600" fill="#ffffff">Current Stock</text>
<text x="24" y="408" font-size="16" font-weight="500" fill="#ffffff">{current_label}</text>
<text x="301" y="400" text-anchor="end" font-size="32" font-weight="700" fill="#ffffff">{current_figure}</text>
<text x="24" y="450" font-size="18" font-weight="600" fill="#ffffff">Next Restock</text>
<text x="24" y="472" font-size="16" font-weight="500" fill="#ffffff">{restock_label}</text>
<text x="301" y="464" text-anchor="end" font-size="32" font-weight="700" fill="#ffffff">{restock_figure}</text>
<text x="162" y="634" text-anchor="middle" font-size="14" font-weight="500" fill="#ffffff">All times are in UTC</text>
<image x="325" y="25" width="675" height="625" preserveAspectRatio="xMidYMid slice" clip-path="url(#map-clip)" href="{map_href}"/>
<g transform="translate(635.5,257.5) scale(2)">{pin}</g>
<text x="335" y="640" font-size="20" font-weight="600" fill="#ffffff" stroke="#00000040" stroke-width="0.5">mapbox</text>
<rect x="840" y="626" width="160" height="24" fill="#ffffff" fill-opacity="0.5"/>
<text x="996" y="643" text-anchor="end" font-size="12" font-weight="300" fill="#333333">© Mapbox © OpenStreetMap</text>
</svg>
"##,
            width = CARD_WIDTH,
            height = CARD_HEIGHT,
            font = FONT_FAMILY,
            color = style.color,
            country = xml_escape(&self.country.name),
            store = xml_escape(&self.store.name),
            item = xml_escape(self.item.display_name()),
            area_path = area_path,
            current_label = xml_escape(&current_label),
            current_figure = current_figure,
            restock_label = xml_escape(&restock_label),
            restock_figure = restock_figure,
            map_href = map_href,
            pin = style.pin,
        )
    }
}

/// Escape text for use in XML content and attribute values.
fn xml_escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use locator_common::StockStatus;

    fn store() -> Store {
        Store {
            id: "156".to_string(),
            name: "Philadelphia".to_string(),
            country: "us".to_string(),
            latitude: 39.9179,
            longitude: -75.1419,
        }
    }

    fn country() -> CountryDatum {
        CountryDatum {
            name: "United States".to_string(),
            code: "us".to_string(),
        }
    }

    fn history(quantities: &[i64]) -> Vec<StockObservation> {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        quantities
            .iter()
            .enumerate()
            .map(|(i, &quantity)| StockObservation {
                quantity,
                reported_at: start + Duration::days(i as i64),
            })
            .collect()
    }

    // A 1x1 transparent PNG stands in for the map collaborator's thumbnail.
    const MAP_PNG: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn test_in_stock_card() {
        let observations = history(&[12, 18, 20]);
        let card = StoreCard {
            item: Item::Blahaj,
            store: &store(),
            country: &country(),
            observations: &observations,
            next_restock: None,
            map_image: MAP_PNG,
        };

        let svg = card.compose();
        assert!(svg.contains("Philadelphia"));
        assert!(svg.contains("United States"));
        assert!(svg.contains("Blåhaj Inventory"));
        assert!(svg.contains(StockStatus::InStock.style().color));
        assert!(svg.contains(">20<"));
        assert!(svg.contains("No restock expected"));
        assert!(svg.contains("data:image/png;base64,"));
    }

    #[test]
    fn test_restock_window_text() {
        let observations = history(&[3, 1, 0]);
        let restock = RestockRecord {
            quantity: 50,
            reported_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            earliest: Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap(),
            latest: Utc.with_ymd_and_hms(2024, 3, 18, 0, 0, 0).unwrap(),
        };
        let card = StoreCard {
            item: Item::Blahaj,
            store: &store(),
            country: &country(),
            observations: &observations,
            next_restock: Some(&restock),
            map_image: MAP_PNG,
        };

        let svg = card.compose();
        assert!(svg.contains("Expected Mar 4 – Mar 18"));
        assert!(svg.contains(">50<"));
        assert!(svg.contains(StockStatus::RestockExpected.style().color));
    }

    #[test]
    fn test_no_data_card_renders_placeholders() {
        let card = StoreCard {
            item: Item::Smolhaj,
            store: &store(),
            country: &country(),
            observations: &[],
            next_restock: None,
            map_image: MAP_PNG,
        };

        let svg = card.compose();
        assert!(svg.contains("No Data"));
        assert!(svg.contains(">--<"));
        assert!(svg.contains(StockStatus::Unknown.style().color));
        // Degenerate chart: empty path attribute, not a missing element.
        assert!(svg.contains(r#"<path d="" "#));
    }

    #[test]
    fn test_store_names_are_escaped() {
        let mut odd_store = store();
        odd_store.name = "Fish & Chips <Plaza>".to_string();

        let card = StoreCard {
            item: Item::Blahaj,
            store: &odd_store,
            country: &country(),
            observations: &[],
            next_restock: None,
            map_image: MAP_PNG,
        };

        let svg = card.compose();
        assert!(svg.contains("Fish &amp; Chips &lt;Plaza&gt;"));
        assert!(!svg.contains("Fish & Chips <Plaza>"));
    }
}
