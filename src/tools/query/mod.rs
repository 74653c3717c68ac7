//! Query Tools
//!
//! Resolve a launcher query against a category set. No ranking: matches come
//! back in source order.

pub mod types;

pub use types::*;

use crate::types::{Category, Site};

/// Resolve `query` into the list of sites to show.
///
/// | query | result |
/// |---|---|
/// | `All` | every site |
/// | `Term(fi)` | sites of the category named `fi`, else sites whose name or URL contains `fi` |
/// | `Scoped { category, term }` | sites of `category` whose name or URL contains `term` |
///
/// Category names match exactly; terms match case-insensitively.
pub fn resolve(query: &Query, categories: &[Category]) -> Vec<Site> {
    match query {
        Query::All => all_sites(categories),
        Query::Term(fi) => {
            if has_category(fi, categories) {
                sites_in_category(fi, categories)
            } else {
                match_sites(fi, categories)
            }
        }
        Query::Scoped { category, term } => match_sites_in_category(category, term, categories),
    }
}

/// Every site of every category, concatenated in category order.
pub fn all_sites(categories: &[Category]) -> Vec<Site> {
    categories
        .iter()
        .flat_map(|c| c.sites.iter().cloned())
        .collect()
}

pub fn category_names(categories: &[Category]) -> Vec<&str> {
    categories.iter().map(|c| c.name.as_str()).collect()
}

pub fn has_category(name: &str, categories: &[Category]) -> bool {
    categories.iter().any(|c| c.name == name)
}

/// Sites of the category called `name`.
///
/// Categories sharing a name are concatenated in source order.
pub fn sites_in_category(name: &str, categories: &[Category]) -> Vec<Site> {
    categories
        .iter()
        .filter(|c| c.name == name)
        .flat_map(|c| c.sites.iter().cloned())
        .collect()
}

/// Sites anywhere whose name or URL contains `term`, ignoring case.
pub fn match_sites(term: &str, categories: &[Category]) -> Vec<Site> {
    let needle = term.to_lowercase();
    categories
        .iter()
        .flat_map(|c| c.sites.iter())
        .filter(|s| s.matches_lowercase(&needle))
        .cloned()
        .collect()
}

/// Sites of the category called `name` whose name or URL contains `term`.
/// Empty when no category has that name.
pub fn match_sites_in_category(name: &str, term: &str, categories: &[Category]) -> Vec<Site> {
    let needle = term.to_lowercase();
    categories
        .iter()
        .filter(|c| c.name == name)
        .flat_map(|c| c.sites.iter())
        .filter(|s| s.matches_lowercase(&needle))
        .cloned()
        .collect()
}
