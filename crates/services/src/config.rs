use std::env;

use persona_core::model::{ApiSettings, ApiSettingsDraft};
use persona_core::progress::ProgressDenominator;

use crate::error::ConfigError;

pub const API_URL_VAR: &str = "PERSONA_API_URL";
pub const API_TIMEOUT_VAR: &str = "PERSONA_API_TIMEOUT_SECS";
pub const DENOMINATOR_VAR: &str = "PERSONA_PROGRESS_DENOMINATOR";

/// Client-side knobs resolved at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub api: ApiSettings,
    pub denominator: ProgressDenominator,
}

impl ClientConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve configuration through `lookup`; unset or blank variables use defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|val| !val.trim().is_empty());

        let timeout_secs = read(API_TIMEOUT_VAR)
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::Timeout(raw.clone()))
            })
            .transpose()?;

        let api = ApiSettingsDraft {
            base_url: read(API_URL_VAR),
            timeout_secs,
        }
        .validate()?;

        let denominator = read(DENOMINATOR_VAR)
            .map(|raw| raw.parse::<ProgressDenominator>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self { api, denominator })
    }

    /// Replace the API base URL, e.g. from a command-line flag.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL is not http(s).
    pub fn with_api_url(self, base_url: &str) -> Result<Self, ConfigError> {
        let api = ApiSettingsDraft {
            base_url: Some(base_url.to_string()),
            timeout_secs: Some(self.api.timeout_secs()),
        }
        .validate()?;
        Ok(Self { api, ..self })
    }
}
