use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Settings read once at start-up. Missing keys are left empty; nothing is validated.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProviderConfig {
    // base url of the Cloud Foundry API, e.g. https://api.example.com
    #[serde(alias = "CFAPI")]
    pub api: String,
    #[serde(alias = "Org")]
    pub org: String,
    #[serde(alias = "Space")]
    pub space: String,
    #[serde(alias = "AccessToken")]
    pub access_token: String,
    pub skip_ssl_validation: bool,
}

impl ProviderConfig {
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("Failed to read provider config")?;
        let cfg: ProviderConfig =
            toml::from_str(&content).context("Failed to parse TOML provider config")?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open provider config {}", path.display()))?;
        Self::from_reader(file)
            .with_context(|| format!("Failed to load provider config from {}", path.display()))
    }
}
