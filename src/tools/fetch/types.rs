use async_trait::async_trait;
use scraper::Html;

use crate::error::Result;

/// Transport used for the directory page and for icon downloads.
///
/// One attempt per call, no retries. Implementations must be safe to call from
/// many tasks at once.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// GET `url` and return the body. Non-success statuses are errors.
    async fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// Outcome of fetching the directory page.
///
/// Keeps "page unreachable" apart from "page has no rows" so the caller can
/// report the two differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Fetched { html: String },
    Unreachable { reason: String },
}

impl Page {
    pub fn html(&self) -> Option<&str> {
        match self {
            Page::Fetched { html } => Some(html),
            Page::Unreachable { .. } => None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, Page::Fetched { .. })
    }

    /// Parse into a queryable document. An unreachable page yields an empty
    /// document that matches no selector.
    pub fn document(&self) -> Html {
        match self {
            Page::Fetched { html } => Html::parse_document(html),
            Page::Unreachable { .. } => Html::new_document(),
        }
    }
}
