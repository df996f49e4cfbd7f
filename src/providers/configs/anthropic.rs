use super::base::ProviderConfig;
use anyhow::{Context, Result};

pub const ANTHROPIC_HOST: &str = "https://api.anthropic.com/";
const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
const HOST_VAR: &str = "ANTHROPIC_API_HOST";

#[derive(Debug, Clone)]
pub struct AnthropicProviderConfig {
    pub api_key: String,
    pub host: String,
}

impl AnthropicProviderConfig {
    pub fn new(api_key: String, host: String) -> Self {
        Self { api_key, host }
    }

    /// Merge explicit settings (e.g. command-line flags) over the environment.
    ///
    /// The key comes from `api_key`, then `ANTHROPIC_API_KEY`. The host comes
    /// from `host`, then `ANTHROPIC_API_HOST`, then the public endpoint.
    pub fn resolve(api_key: Option<String>, host: Option<String>) -> Result<Self> {
        let mut config = match api_key {
            Some(api_key) => Self::new(api_key, Self::env_host()?),
            None => Self::from_env().context(
                "API key must be provided via --api-key or ANTHROPIC_API_KEY environment variable",
            )?,
        };
        if let Some(host) = host {
            config.host = host;
        }
        Ok(config)
    }

    fn env_host() -> Result<String> {
        Ok(Self::get_env(HOST_VAR, false, None)?.unwrap_or_else(|| ANTHROPIC_HOST.to_string()))
    }
}

impl ProviderConfig for AnthropicProviderConfig {
    fn from_env() -> Result<Self> {
        let api_key = Self::get_env(API_KEY_VAR, true, None)?
            .ok_or_else(|| anyhow::anyhow!("Anthropic API key should be present"))?;

        Ok(Self::new(api_key, Self::env_host()?))
    }
}
