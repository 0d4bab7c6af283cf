use serde::{Deserialize, Serialize};

use crate::error::{HcmlError, Result};
use crate::parser::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};

pub const DEFAULT_TAG_PREFIX: &str = "cxx";

/// hcml.toml schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Function text nodes are printed with, e.g. `resp.write`
    #[serde(default)]
    pub print_method: String,
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Ceiling on generated output in bytes, unlimited when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            print_method: String::new(),
            tag_prefix: default_tag_prefix(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_output: None,
        }
    }
}

fn default_tag_prefix() -> String {
    DEFAULT_TAG_PREFIX.to_string()
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Config {
    /// Read and validate hcml.toml
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            HcmlError::ConfigInvalid(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| HcmlError::ConfigInvalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.session.tag_prefix.is_empty() {
            return Err(HcmlError::ConfigInvalid(
                "session.tag_prefix must not be empty".to_string(),
            ));
        }
        if self.session.max_depth == 0 || self.session.max_depth > MAX_DEPTH_LIMIT {
            return Err(HcmlError::ConfigInvalid(format!(
                "session.max_depth must be between 1 and {}",
                MAX_DEPTH_LIMIT
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.session.tag_prefix, "cxx");
        assert_eq!(config.session.max_depth, 64);
        assert_eq!(config.session.max_output, None);
        assert!(config.session.print_method.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[session]
print_method = "resp.write"
tag_prefix = "tpl"
max_depth = 32
max_output = 65536
"#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.session.print_method, "resp.write");
        assert_eq!(config.session.tag_prefix, "tpl");
        assert_eq!(config.session.max_depth, 32);
        assert_eq!(config.session.max_output, Some(65536));
    }

    #[test]
    fn test_max_depth_outside_range_is_rejected() {
        let err = Config::from_toml("[session]\nmax_depth = 0\n").unwrap_err();
        assert!(matches!(err, HcmlError::ConfigInvalid(_)));

        let too_deep = format!("[session]\nmax_depth = {}\n", MAX_DEPTH_LIMIT + 1);
        let err = Config::from_toml(&too_deep).unwrap_err();
        assert_eq!(
            err.to_string(),
            "CONFIG_INVALID: session.max_depth must be between 1 and 64"
        );

        let at_limit = format!("[session]\nmax_depth = {}\n", MAX_DEPTH_LIMIT);
        assert!(Config::from_toml(&at_limit).is_ok());
    }

    #[test]
    fn test_partial_session_keeps_other_defaults() {
        let config = Config::from_toml("[session]\nprint_method = \"out\"\n").unwrap();
        assert_eq!(config.session.print_method, "out");
        assert_eq!(config.session.tag_prefix, "cxx");
    }

    #[test]
    fn test_empty_prefix_is_rejected() {
        let err = Config::from_toml("[session]\ntag_prefix = \"\"\n").unwrap_err();
        assert!(matches!(err, HcmlError::ConfigInvalid(_)));
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        let err = Config::from_toml("[session\n").unwrap_err();
        assert!(err.to_string().starts_with("CONFIG_INVALID:"));
    }

    #[test]
    fn test_from_file_reads_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("hcml.toml");
        std::fs::write(&path, "[session]\nprint_method = \"emit\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.session.print_method, "emit");

        let missing = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, HcmlError::ConfigInvalid(_)));
    }
}
