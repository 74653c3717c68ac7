use serde::{Deserialize, Serialize};

/// A single bookmarked entry scraped from one site card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Site {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "URL")]
    pub url: String,
    /// Local icon file, or empty when the icon could not be stored.
    #[serde(default)]
    pub icon: String,
}

impl Site {
    /// Case-insensitive substring match over name or URL.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.url.to_lowercase().contains(needle)
    }
}

/// A named group of sites, one per row on the source page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Category {
    #[serde(rename = "cateName")]
    pub name: String,
    #[serde(default)]
    pub sites: Vec<Site>,
}

/// The full scrape result, in source order. This is the unit of caching.
pub type CategorySet = Vec<Category>;
