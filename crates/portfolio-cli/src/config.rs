//! Configuration loaded from `portfolio.toml`.

use portfolio_core::store::MAX_PAGE_SIZE;
use portfolio_core::{PortfolioError, PortfolioResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "portfolio.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// SQLite database file.
    pub database: PathBuf,
    pub host: String,
    pub port: u16,
    /// Default page size for project listings.
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("portfolio.db"),
            host: "127.0.0.1".to_string(),
            port: 3030,
            page_size: portfolio_core::store::DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from `portfolio.toml` when present.
    ///
    /// An explicit path must exist; the implicit file is optional.
    pub fn load(path: Option<&Path>) -> PortfolioResult<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|e| {
            PortfolioError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> PortfolioResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| PortfolioError::Config(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply values given on the command line or in the environment.
    pub fn with_overrides(
        mut self,
        database: Option<PathBuf>,
        host: Option<String>,
        port: Option<u16>,
    ) -> Self {
        if let Some(database) = database {
            self.database = database;
        }
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    fn validate(&self) -> PortfolioResult<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(PortfolioError::Config(format!(
                "page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        if self.host.trim().is_empty() {
            return Err(PortfolioError::Config("host must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = Config::from_toml("port = 8080\n").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.database, PathBuf::from("portfolio.db"));
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = Config::from_toml("database = \"file.db\"\nhost = \"0.0.0.0\"\n")
            .unwrap()
            .with_overrides(Some(PathBuf::from("flag.db")), None, Some(9000));
        assert_eq!(config.database, PathBuf::from("flag.db"));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(matches!(
            Config::from_toml("page_size = 0"),
            Err(PortfolioError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml("colour = \"blue\""),
            Err(PortfolioError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml("port = \"eighty\""),
            Err(PortfolioError::Config(_))
        ));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let result = Config::load(Some(Path::new("/nonexistent/portfolio.toml")));
        assert!(matches!(result, Err(PortfolioError::Config(_))));
    }
}
