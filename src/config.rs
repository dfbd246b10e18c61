use std::path::Path;

use anyhow::{Context, Result};
use leb128_codec::DecodeOptions;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "leb128.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub decode: DecodeOptions,
    pub json_output: bool,
}

impl CliConfig {
    /// Load from `config_path`, or from `leb128.toml` if present.
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let (config_file, required) = match config_path {
            Some(path) => (path, true),
            None => (DEFAULT_CONFIG_FILE, false),
        };

        if !Path::new(config_file).exists() {
            if required {
                anyhow::bail!("config file not found: {}", config_file);
            }
            tracing::debug!("No {} found, using defaults", config_file);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_file)
            .with_context(|| format!("reading {}", config_file))?;
        let config: CliConfig = toml::from_str(&content)
            .with_context(|| format!("parsing {}", config_file))?;
        config.decode.validate()
            .with_context(|| format!("validating [decode] in {}", config_file))?;
        tracing::debug!(?config, "Loaded {}", config_file);
        Ok(config)
    }

    pub fn save(&self, config_path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)
            .with_context(|| format!("writing {}", config_path))?;
        Ok(())
    }
}
