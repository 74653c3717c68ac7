//! Shared Selectors
//!
//! Fixed layout of a WebStack navigation page: every `.row` is one category,
//! headed by the element right before it, and every `.col-sm-3` card inside
//! the row is one site.

use once_cell::sync::Lazy;
use scraper::Selector;

/// Selector for category rows.
pub static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".row").expect("valid row selector"));

/// Selector for site cards within a row.
pub static COLUMN_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".col-sm-3").expect("valid column selector"));

/// Selector for the site display name.
pub static SITE_NAME_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".xe-comment a strong").expect("valid site name selector"));

/// Selector for the element carrying the site URL.
pub static SITE_URL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".label-info").expect("valid site url selector"));

/// Attribute of [`SITE_URL_SELECTOR`] holding the URL.
pub const SITE_URL_ATTR: &str = "data-original-title";

/// Selector for the site description.
pub static DESCRIPTION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".xe-comment p").expect("valid description selector"));

/// Selector for the lazily loaded icon image.
pub static ICON_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".xe-user-img img").expect("valid icon selector"));

/// Attribute of [`ICON_SELECTOR`] holding the icon URL.
pub const ICON_ATTR: &str = "data-src";
