//! Configuration file parsing for Station Easy
//!
//! Supports a single read-only `config.toml`, either passed explicitly or
//! found under the platform config directory (`station-easy/config.toml`).

pub mod settings;
pub mod types;

pub use settings::{default_config_path, load_config, read_config, CONFIG_DIR, CONFIG_FILENAME};
pub use types::*;
