mod client;
mod utils;

pub mod types;

// Re-export types for public use
pub use client::{MemoryFetcher, ReqwestFetcher};
pub use types::*;
pub use utils::{parse_http_url, resolve_reference};

use utils::decode_body;

/// Fetch the directory page.
///
/// Single attempt, no retries. Never fails: transport errors and error
/// statuses come back as [`Page::Unreachable`]. Bodies that are not valid
/// UTF-8 are decoded lossily.
///
/// # Examples
/// ```no_run
/// use wsaw::tools::fetch::{fetch_page, ReqwestFetcher};
///
/// # async fn example() -> wsaw::Result<()> {
/// let fetcher = ReqwestFetcher::new()?;
/// let page = fetch_page(&fetcher, "https://ws.wrss.top/").await;
/// if let Some(html) = page.html() {
///     println!("{} bytes", html.len());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn fetch_page<F>(fetcher: &F, url: &str) -> Page
where
    F: HttpFetcher + ?Sized,
{
    let bytes = match fetcher.get(url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("fetching {url} failed: {e}");
            return Page::Unreachable {
                reason: e.to_string(),
            };
        }
    };

    let html = decode_body(bytes);
    log::debug!("fetched {url} ({} bytes)", html.len());
    Page::Fetched { html }
}
