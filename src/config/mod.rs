//! Persistent application configuration.
//!
//! A single JSON file holds the issuing company, the catalog of billable
//! items, and one running counter per document kind.

mod store;

pub use store::{AppConfig, CONFIG_PATH_ENV, ConfigStore};
