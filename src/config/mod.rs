//! Configuration module for Book-Trawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section has defaults pointing at the public books.toscrape.com catalog,
//! so a configuration file is optional.
//!
//! # Example
//!
//! ```no_run
//! use book_trawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("trawler.toml")).unwrap();
//! println!("Catalog root: {}", config.catalog.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CatalogConfig, Config, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
