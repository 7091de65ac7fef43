//! Configuration module for the APA crawler
//!
//! Configuration is optional. When no file is given the crawler runs with
//! [`Config::default`], which targets the Belastingdienst APA index page.
//!
//! # Example
//!
//! ```no_run
//! use apa_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("apa.toml")).unwrap();
//! println!("Crawler delay: {}ms", config.crawler.delay_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, FetchConfig, OutputConfig, WalkerConfig, DEFAULT_BASE_URL,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
