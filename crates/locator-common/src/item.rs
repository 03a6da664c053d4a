//! Tracked item catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LocatorError;

/// An item whose availability is tracked per store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    Blahaj,
    Smolhaj,
}

impl Item {
    /// Identifier used in URLs, cache keys, and database rows.
    pub fn slug(&self) -> &'static str {
        match self {
            Item::Blahaj => "blahaj",
            Item::Smolhaj => "smolhaj",
        }
    }

    /// Human-readable name shown on rendered cards.
    pub fn display_name(&self) -> &'static str {
        match self {
            Item::Blahaj => "Blåhaj",
            Item::Smolhaj => "Smolhaj",
        }
    }
}

impl FromStr for Item {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blahaj" => Ok(Item::Blahaj),
            "smolhaj" => Ok(Item::Smolhaj),
            other => Err(LocatorError::InvalidParameter {
                param: "item".to_string(),
                message: format!("unknown item: {}", other),
            }),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
