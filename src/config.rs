//! Configuration loading from the Rainforest env file and CLI overrides.

use crate::error::ConfigError;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Default env file consulted for the API key.
pub const DEFAULT_ENV_FILE: &str = ".env.rainforest";
/// Default marketplace domain for lookups.
pub const DEFAULT_DOMAIN: &str = "amazon.co.uk";
/// Default batch worker count.
pub const DEFAULT_WORKERS: usize = 5;

const API_KEY_VAR: &str = "RAINFOREST_API_KEY";

fn default_timeout_secs() -> u64 {
    30
}

/// Application configuration. Resolved once at startup and passed explicitly
/// to the client and commands; nothing downstream reads the process
/// environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Rainforest API key
    pub api_key: String,

    /// Marketplace domain (e.g., amazon.co.uk)
    pub domain: String,

    /// Concurrent workers for batch lookups
    pub workers: usize,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Resolves configuration from an env file, falling back to the process
    /// environment for the API key. A missing file is fine; a missing key is
    /// fatal.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file_vars = read_env_file(path)?;
        build_config(
            |key| {
                file_vars
                    .get(key)
                    .cloned()
                    .or_else(|| std::env::var(key).ok())
            },
            &path.display().to_string(),
        )
    }
}

/// Builds a config from a key lookup, validating the API key. The lookup is
/// injected so tests can run without touching the process environment.
fn build_config<F>(lookup: F, env_file: &str) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = lookup(API_KEY_VAR)
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| ConfigError::MissingApiKey {
            env_file: env_file.to_string(),
        })?;

    Ok(Config {
        api_key,
        domain: DEFAULT_DOMAIN.to_string(),
        workers: DEFAULT_WORKERS,
        timeout_secs: default_timeout_secs(),
    })
}

/// Reads the env file into a map. An absent file yields an empty map since
/// the key may come from the process environment instead; a file that exists
/// but cannot be parsed is an error.
fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            debug!(
                "Env file {} not found, relying on process environment",
                path.display()
            );
            return Ok(HashMap::new());
        }
        Err(source) => {
            return Err(ConfigError::EnvFile {
                path: path.display().to_string(),
                source,
            })
        }
    };

    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(|source| ConfigError::EnvFile {
            path: path.display().to_string(),
            source,
        })?;
        vars.insert(key, value);
    }

    debug!("Loaded {} entries from {}", vars.len(), path.display());
    Ok(vars)
}
