use std::{env, time::Duration};

use log::{debug, error, info};
use url::Url;

use crate::error::{ProviderError, Result};

/// Default bound on the external mapping fetch.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub mappings_url: Option<Url>,
    pub fetch_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mappings_url: None,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from the environment (and `.env`, when present).
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but malformed.
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();

        let mappings_url = env::var("PROVIDER_MAPPINGS_URL").ok();
        let timeout_secs = env::var("PROVIDER_MAPPINGS_TIMEOUT_SECS").ok();

        let config = Self::from_values(mappings_url.as_deref(), timeout_secs.as_deref())
            .inspect_err(|e| error!("Failed to load configuration: {e}"))?;

        info!("Configuration loaded successfully");
        debug!(
            "Mapping source: {}",
            config
                .mappings_url
                .as_ref()
                .map_or("<built-in only>", Url::as_str)
        );
        debug!("Fetch timeout: {:?}", config.fetch_timeout);

        Ok(config)
    }

    /// Build a configuration from raw string values.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or the timeout is not a
    /// positive integer.
    pub fn from_values(mappings_url: Option<&str>, timeout_secs: Option<&str>) -> Result<Self> {
        let mappings_url = match mappings_url.map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(Url::parse(raw)?),
            _ => None,
        };

        let fetch_timeout = match timeout_secs.map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                let secs: u64 = raw.parse().map_err(|_| {
                    ProviderError::Config(format!(
                        "PROVIDER_MAPPINGS_TIMEOUT_SECS must be a whole number, got '{raw}'"
                    ))
                })?;
                if secs == 0 {
                    return Err(ProviderError::Config(
                        "PROVIDER_MAPPINGS_TIMEOUT_SECS must be greater than 0".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            _ => Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        };

        Ok(Self {
            mappings_url,
            fetch_timeout,
        })
    }
}
