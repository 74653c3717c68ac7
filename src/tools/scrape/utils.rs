use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::types::{RawCategory, RawSite};
use crate::selectors::*;
use crate::tools::fetch::resolve_reference;

/// Walk the rows of a parsed page. Missing nodes become empty strings.
pub(super) fn scrape_rows(doc: &Html, base: Option<&Url>) -> Vec<RawCategory> {
    doc.select(&ROW_SELECTOR)
        .map(|row| RawCategory {
            name: heading_text(row),
            sites: row
                .select(&COLUMN_SELECTOR)
                .map(|col| scrape_site(col, base))
                .collect(),
        })
        .collect()
}

fn scrape_site(col: ElementRef<'_>, base: Option<&Url>) -> RawSite {
    let icon = first_attr(col, &ICON_SELECTOR, ICON_ATTR);
    let icon_url = match base {
        Some(base) => resolve_reference(base, &icon)
            .map(|u| u.to_string())
            .unwrap_or_default(),
        None => icon.trim().to_string(),
    };

    RawSite {
        name: first_text(col, &SITE_NAME_SELECTOR),
        url: first_attr(col, &SITE_URL_SELECTOR, SITE_URL_ATTR).trim().to_string(),
        description: first_text(col, &DESCRIPTION_SELECTOR),
        icon_url,
    }
}

/// Text of the element right before the row (the category heading).
fn heading_text(row: ElementRef<'_>) -> String {
    row.prev_siblings()
        .find_map(ElementRef::wrap)
        .map(element_text)
        .unwrap_or_default()
}

fn first_text(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope
        .select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

fn first_attr(scope: ElementRef<'_>, selector: &Selector, attr: &str) -> String {
    scope
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .unwrap_or_default()
        .to_string()
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
