//! Startup configuration.
//!
//! The orchestrator base URL is explicit configuration injected at startup,
//! resolved in precedence order: built-in default, then `ORMBENCH_`-prefixed
//! environment variables (a `.env` file is loaded before parsing), then the
//! command line.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Resolved CLI settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Orchestrator service address.
    pub base_url: String,
}

impl Settings {
    /// Load settings. `override_base_url` carries the command-line value
    /// and takes precedence over the environment.
    pub fn load(override_base_url: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("base_url", ormbench_client::DEFAULT_BASE_URL)?
            .add_source(Environment::with_prefix("ORMBENCH"));

        if let Some(base_url) = override_base_url {
            builder = builder.set_override("base_url", base_url)?;
        }

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.base_url, ormbench_client::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_command_line_override_wins() {
        let settings = Settings::load(Some("http://bench:9000".to_string())).unwrap();
        assert_eq!(settings.base_url, "http://bench:9000");
    }
}
