//! Global context for CLI commands

use anyhow::Result;
use hcml_core::Session;
use hcml_core::config::{CONFIG_FILE_NAME, Config};
use log::debug;
use std::env;

use crate::cli::GlobalArgs;

/// Effective configuration after applying command line overrides
pub struct Context {
    pub config: Config,
    pub verbose: bool,
}

impl Context {
    /// Load hcml.toml and apply flag overrides
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit or discovered config file cannot be
    /// read or parsed
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Config::from_file(path)?,
            None => {
                let default_path = env::current_dir()?.join(CONFIG_FILE_NAME);
                if default_path.is_file() {
                    debug!("using {}", default_path.display());
                    Config::from_file(&default_path)?
                } else {
                    Config::default()
                }
            }
        };

        if let Some(prefix) = &args.prefix {
            config.session.tag_prefix = prefix.clone();
        }
        if let Some(method) = &args.print_method {
            config.session.print_method = method.clone();
        }

        Ok(Self {
            config,
            verbose: args.verbose,
        })
    }

    pub fn session(&self) -> Session {
        Session::from_config(&self.config.session)
    }
}
