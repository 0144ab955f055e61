use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::GscError;

/// Breakdown axis for search-analytics rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Page,
    Query,
    Device,
    Country,
    Date,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Page => "page",
            Dimension::Query => "query",
            Dimension::Device => "device",
            Dimension::Country => "country",
            Dimension::Date => "date",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = GscError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "page" => Ok(Dimension::Page),
            "query" => Ok(Dimension::Query),
            "device" => Ok(Dimension::Device),
            "country" => Ok(Dimension::Country),
            "date" => Ok(Dimension::Date),
            other => Err(GscError::config(format!(
                "unknown dimension '{other}' (expected page, query, device, country or date)"
            ))),
        }
    }
}

/// Result type filter, sent as the `type` field of the query body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchType {
    Web,
    Image,
    Video,
    News,
    Discover,
    GoogleNews,
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchType::Web => "web",
            SearchType::Image => "image",
            SearchType::Video => "video",
            SearchType::News => "news",
            SearchType::Discover => "discover",
            SearchType::GoogleNews => "googleNews",
        };
        f.write_str(name)
    }
}

impl FromStr for SearchType {
    type Err = GscError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['_', '-'], "").as_str() {
            "web" => Ok(SearchType::Web),
            "image" => Ok(SearchType::Image),
            "video" => Ok(SearchType::Video),
            "news" => Ok(SearchType::News),
            "discover" => Ok(SearchType::Discover),
            "googlenews" => Ok(SearchType::GoogleNews),
            _ => Err(GscError::config(format!("unknown search type '{}'", s.trim()))),
        }
    }
}
