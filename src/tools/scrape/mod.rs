//! Scrape Tools
//!
//! Turns a directory page into a [`CategorySet`]. Parsing is synchronous; the
//! icon stage fans out one task per row and one future per site, and gathers
//! results by source position so the output order always matches the page.

pub mod types;
mod utils;

pub use types::*;
use utils::*;

use futures_util::future::join_all;
use scraper::Html;
use url::Url;

use crate::error::{Result, WsawError};
use crate::tools::fetch::HttpFetcher;
use crate::tools::icons::IconStore;
use crate::types::{Category, CategorySet, Site};

/// Scrape rows and site cards from HTML without touching the network.
///
/// Relative icon URLs are resolved against `page_url` when it parses.
pub fn scrape_layout(html: &str, page_url: &str) -> Vec<RawCategory> {
    let base = Url::parse(page_url).ok();
    let doc = Html::parse_document(html);
    scrape_rows(&doc, base.as_ref())
}

/// Extract the full category set, storing icons concurrently.
pub async fn extract<F>(html: &str, page_url: &str, icons: &IconStore<F>) -> Result<CategorySet>
where
    F: HttpFetcher + ?Sized + 'static,
{
    let rows = parse_off_thread(html, page_url).await?;
    log::debug!("scraped {} rows from {page_url}", rows.len());

    let handles: Vec<_> = rows
        .into_iter()
        .map(|row| {
            let icons = icons.clone();
            tokio::spawn(async move { finish_row(row, &icons).await })
        })
        .collect();

    // Handles are awaited in row order, whatever order they finish in.
    join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.map_err(WsawError::from))
        .collect()
}

/// Same result as [`extract`], one site at a time.
pub async fn extract_sequential<F>(
    html: &str,
    page_url: &str,
    icons: &IconStore<F>,
) -> Result<CategorySet>
where
    F: HttpFetcher + ?Sized,
{
    let rows = parse_off_thread(html, page_url).await?;

    let mut categories = Vec::with_capacity(rows.len());
    for row in rows {
        let mut sites = Vec::with_capacity(row.sites.len());
        for raw in row.sites {
            sites.push(finish_site(raw, icons).await);
        }
        categories.push(Category {
            name: row.name,
            sites,
        });
    }
    Ok(categories)
}

async fn parse_off_thread(html: &str, page_url: &str) -> Result<Vec<RawCategory>> {
    let html = html.to_string();
    let page_url = page_url.to_string();
    let rows = tokio::task::spawn_blocking(move || scrape_layout(&html, &page_url)).await?;
    Ok(rows)
}

async fn finish_row<F>(row: RawCategory, icons: &IconStore<F>) -> Category
where
    F: HttpFetcher + ?Sized,
{
    let sites = join_all(row.sites.into_iter().map(|raw| finish_site(raw, icons))).await;
    Category {
        name: row.name,
        sites,
    }
}

async fn finish_site<F>(raw: RawSite, icons: &IconStore<F>) -> Site
where
    F: HttpFetcher + ?Sized,
{
    let icon = icons.ensure_local_icon(&raw.icon_url, &raw.url).await;
    Site {
        name: raw.name,
        description: raw.description,
        url: raw.url,
        icon,
    }
}
