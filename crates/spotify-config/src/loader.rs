use std::path::Path;

use crate::ClientConfig;

impl ClientConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are
    /// not a valid configuration
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config = Self::from_toml(&raw)?;
        tracing::debug!(path = %path.display(), base_url = %config.base_url, "loaded client configuration");

        Ok(config)
    }

    /// Parse configuration from TOML text
    ///
    /// Expands `{{ env.VAR }}` placeholders, then deserializes and validates
    /// the result.
    ///
    /// # Errors
    ///
    /// Returns an error if variable expansion, TOML parsing, or validation fails
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
    /// Returns an error if the base URL is not HTTP(S) or the timeout
    /// cannot be parsed
    pub fn validate(&self) -> anyhow::Result<()> {
        if !matches!(self.base_url.scheme(), "http" | "https") {
            anyhow::bail!("base_url must use http or https, got '{}'", self.base_url.scheme());
        }

        if self.base_url.cannot_be_a_base() {
            anyhow::bail!("base_url cannot be used as a base: {}", self.base_url);
        }

        if let Some(timeout) = self.timeout()?
            && timeout.is_zero()
        {
            anyhow::bail!("timeout must be greater than zero");
        }

        Ok(())
    }
}
