//! `hcml.toml` configuration

mod model;

pub use model::{Config, SessionConfig, DEFAULT_TAG_PREFIX};

/// File name looked up in the working directory when no path is given
pub const CONFIG_FILE_NAME: &str = "hcml.toml";
