//! Probe configuration, read once from the process environment

use std::time::Duration;
use log::debug;

pub const API_URL_VAR: &str = "DEEPSEEK_API_URL";
pub const MODEL_VAR: &str = "DEEPSEEK_MODEL";
pub const TIMEOUT_VAR: &str = "DEEPSEEK_TIMEOUT_SECS";

/// Whole-request timeout used when `DEEPSEEK_TIMEOUT_SECS` is unset
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connect timeout, independent of the request timeout
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Probe configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig
{   /// Server base URL, without trailing slash
    pub api_url: String
  , /// Requested model identifier
    pub model: String
  , /// Whole-request timeout
    pub timeout: Duration
}

impl ProbeConfig
{   pub fn new(api_url: &str, model: &str) -> Self
    {   ProbeConfig
        {   api_url: api_url.trim_end_matches('/').to_string()
          , model: model.to_string()
          , timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self
    {   self.timeout = timeout;
        self
    }

    /// Load from the real process environment
    pub fn from_env() -> Result<Self, crate::error::Error>
    {   Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F)
      -> Result<Self, crate::error::Error>
    where
      F: Fn(&str) -> Option<String>
    {   let api_url = required(&lookup, API_URL_VAR)?;
        let model = required(&lookup, MODEL_VAR)?;

        let timeout_secs = match lookup(TIMEOUT_VAR)
        {   Some(raw) if !raw.trim().is_empty() => {
              parse_timeout(raw.trim())?
            }
          , _ => DEFAULT_TIMEOUT_SECS
        };

        let config = ProbeConfig::new(&api_url, &model)
          .with_timeout(Duration::from_secs(timeout_secs));
        debug!(
          "Loaded config: url={} model={} timeout={:?}",
          config.api_url, config.model, config.timeout
        );
        Ok(config)
    }
}

fn required<F>(lookup: &F, key: &str)
  -> Result<String, crate::error::Error>
where
  F: Fn(&str) -> Option<String>
{   lookup(key)
      .map(|v| v.trim().to_string())
      .filter(|v| !v.is_empty())
      .ok_or_else(|| crate::error::Error::MissingConfig(key.to_string()))
}

fn parse_timeout(raw: &str) -> Result<u64, crate::error::Error>
{   match raw.parse::<u64>()
    {   Ok(secs) if secs > 0 => Ok(secs)
      , _ => Err(crate::error::Error::InvalidConfiguration(
          format!("{} must be a positive integer, got {:?}", TIMEOUT_VAR, raw)
        ))
    }
}

#[cfg(test)]
mod tests
{   use super::*;
    use std::collections::HashMap;
    use crate::error::Error;

    fn lookup_from(pairs: &[(&str, &str)])
      -> impl Fn(&str) -> Option<String>
    {   let map: HashMap<String, String> = pairs
          .iter()
          .map(|(k, v)| (k.to_string(), v.to_string()))
          .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn loads_required_values_and_default_timeout()
    {   let config = ProbeConfig::from_lookup(lookup_from(&[
          (API_URL_VAR, "http://localhost:11434")
        , (MODEL_VAR, "deepseek-r1")
        ])).unwrap();

        assert_eq!(config.api_url, "http://localhost:11434");
        assert_eq!(config.model, "deepseek-r1");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn trims_trailing_slash()
    {   let config = ProbeConfig::from_lookup(lookup_from(&[
          (API_URL_VAR, "http://localhost:11434//")
        , (MODEL_VAR, "deepseek-r1")
        ])).unwrap();
        assert_eq!(config.api_url, "http://localhost:11434");
    }

    #[test]
    fn missing_or_blank_values_are_rejected()
    {   let err = ProbeConfig::from_lookup(lookup_from(&[
          (MODEL_VAR, "deepseek-r1")
        ])).unwrap_err();
        assert_eq!(err, Error::MissingConfig(API_URL_VAR.to_string()));

        let err = ProbeConfig::from_lookup(lookup_from(&[
          (API_URL_VAR, "http://localhost:11434")
        , (MODEL_VAR, "   ")
        ])).unwrap_err();
        assert_eq!(err, Error::MissingConfig(MODEL_VAR.to_string()));
    }

    #[test]
    fn timeout_override()
    {   let config = ProbeConfig::from_lookup(lookup_from(&[
          (API_URL_VAR, "http://localhost:11434")
        , (MODEL_VAR, "deepseek-r1")
        , (TIMEOUT_VAR, "5")
        ])).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));

        let err = ProbeConfig::from_lookup(lookup_from(&[
          (API_URL_VAR, "http://localhost:11434")
        , (MODEL_VAR, "deepseek-r1")
        , (TIMEOUT_VAR, "0")
        ])).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }
}
