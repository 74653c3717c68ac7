pub mod activity;
pub mod cache;

pub use activity::*;
pub use cache::*;
