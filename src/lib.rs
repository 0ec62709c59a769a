//! buybox-checker - Amazon Buy Box lookup CLI backed by the Rainforest API
//!
//! Fetches product and offer pages from the Rainforest API and reports
//! Buy Box ownership, pricing, Prime status, and discounts per ASIN.

pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod rainforest;
pub mod report;

pub use config::Config;
pub use error::{ConfigError, LookupError};
pub use rainforest::models::{BuyBoxRecord, LookupFailure, LookupOutcome};
