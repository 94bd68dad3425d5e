use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// Expands `{{ env.VAR }}` placeholders, deserializes and validates.
    ///
    /// # Errors
    ///
    /// Returns an error if variable expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not HTTP(S) or the timeouts are
    /// inconsistent
    pub fn validate(&self) -> anyhow::Result<()> {
        let service = &self.customer_service;

        if !matches!(service.base_url.scheme(), "http" | "https") {
            anyhow::bail!(
                "customer_service.base_url must use http or https, got '{}'",
                service.base_url.scheme()
            );
        }

        if service.timeout.is_zero() {
            anyhow::bail!("customer_service.timeout must be greater than 0");
        }

        if service.connect_timeout.is_zero() {
            anyhow::bail!("customer_service.connect_timeout must be greater than 0");
        }

        if service.connect_timeout > service.timeout {
            anyhow::bail!("customer_service.connect_timeout must not exceed customer_service.timeout");
        }

        Ok(())
    }
}
