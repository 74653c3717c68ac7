use serde::{Deserialize, Serialize};

/// One site card as found on the page, before its icon is stored.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawSite {
    pub name: String,
    pub url: String,
    pub description: String,
    /// Absolute icon URL, or empty.
    pub icon_url: String,
}

/// One row as found on the page.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawCategory {
    pub name: String,
    #[serde(default)]
    pub sites: Vec<RawSite>,
}
