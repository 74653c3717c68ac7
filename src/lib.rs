#![doc = include_str!("../README.md")]

pub mod cli;
pub mod config;
pub mod error;
pub mod selectors;
pub mod services;
pub mod tools;
pub mod types;
pub mod workflow;

#[cfg(test)]
mod fixtures;
mod tests;

pub use config::*;
pub use error::{Result, WsawError};
pub use types::*;
pub use workflow::*;
