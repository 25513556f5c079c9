//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Which directory implementation backs the browse screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryBackend {
    /// Built-in fixture dataset.
    Memory,
    /// Hosted PostgREST (Supabase) project.
    Supabase,
}

impl std::str::FromStr for DirectoryBackend {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "supabase" => Ok(Self::Supabase),
            other => Err(format!("Unknown directory backend: {}", other)),
        }
    }
}

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Anonymous (public) API key.
    pub anon_key: SecretString,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP port for the API server.
    pub port: u16,
    pub backend: DirectoryBackend,
    /// Present only when `backend` is `Supabase`.
    pub supabase: Option<SupabaseConfig>,
    /// Upper bound for a single directory request.
    pub request_timeout: Duration,
    /// Wizard sessions untouched this long are dropped.
    pub session_idle: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            backend: DirectoryBackend::Memory,
            supabase: None,
            request_timeout: Duration::from_secs(10),
            session_idle: Duration::from_secs(30 * 60),
        }
    }
}

impl AppConfig {
    /// Build the configuration from `CONNECT_PULSE_*` and `SUPABASE_*`
    /// environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("CONNECT_PULSE_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "CONNECT_PULSE_PORT".to_string(),
                message: e.to_string(),
            })?,
            None => defaults.port,
        };

        let backend = match lookup("CONNECT_PULSE_BACKEND") {
            Some(raw) => raw
                .parse::<DirectoryBackend>()
                .map_err(|message| ConfigError::InvalidValue {
                    key: "CONNECT_PULSE_BACKEND".to_string(),
                    message,
                })?,
            None => defaults.backend,
        };

        let request_timeout =
            positive_secs(&lookup, "CONNECT_PULSE_REQUEST_TIMEOUT_SECS")?.unwrap_or(defaults.request_timeout);
        let session_idle =
            positive_secs(&lookup, "CONNECT_PULSE_SESSION_IDLE_SECS")?.unwrap_or(defaults.session_idle);

        let supabase = match backend {
            DirectoryBackend::Memory => None,
            DirectoryBackend::Supabase => {
                let url = lookup("SUPABASE_URL")
                    .filter(|s| !s.trim().is_empty())
                    .ok_or_else(|| ConfigError::MissingEnvVar("SUPABASE_URL".to_string()))?;
                let anon_key = lookup("SUPABASE_ANON_KEY")
                    .filter(|s| !s.trim().is_empty())
                    .ok_or_else(|| ConfigError::MissingEnvVar("SUPABASE_ANON_KEY".to_string()))?;
                Some(SupabaseConfig {
                    url: url.trim().trim_end_matches('/').to_string(),
                    anon_key: SecretString::from(anon_key),
                })
            }
        };

        Ok(Self {
            port,
            backend,
            supabase,
            request_timeout,
            session_idle,
        })
    }
}

/// A whole number of seconds greater than zero, if `key` is set.
fn positive_secs<F>(lookup: &F, key: &str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    Ok(Some(Duration::from_secs(secs)))
}
