//! Configuration module for qstr
//!
//! Provides types, discovery and parsing for `qstr.toml`.

pub mod loader;
pub mod schema;

pub use loader::{
    candidate_paths, config_home, find_config, find_config_in, load_config, load_config_file,
    parse_config, ConfigError, CONFIG_FILE_NAME,
};
pub use schema::*;
