//! Service configuration loaded from the environment

use config::{Config, Environment};
use serde::Deserialize;

/// Runtime settings for the HTTP service
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Secret expected in `Authorization: Bearer <token>`
    #[serde(default)]
    pub bearer_token: String,
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

impl ServiceConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variables
    /// - `BIND_ADDRESS`: listen address (default: `0.0.0.0:8080`)
    /// - `BEARER_TOKEN`: secret for protected routes (required)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_source(Environment::default())
    }

    /// Load configuration from an explicit environment source
    pub fn from_source(source: Environment) -> anyhow::Result<Self> {
        let config: Self = Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the service cannot safely run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bearer_token.trim().is_empty() {
            anyhow::bail!("BEARER_TOKEN environment variable not set");
        }

        if self.bind_address.trim().is_empty() {
            anyhow::bail!("BIND_ADDRESS must not be empty");
        }

        Ok(())
    }
}
