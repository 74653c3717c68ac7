// Modular tools
pub mod feedback;
pub mod fetch;
pub mod icons;
pub mod query;
pub mod scrape;
