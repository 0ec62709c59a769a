//! Error types: fatal configuration errors and per-ASIN lookup errors.

use thiserror::Error;

/// Pre-flight configuration failures. Always fatal: the process aborts with
/// a non-zero exit before any network call is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing RAINFOREST_API_KEY (set it in {env_file} or your environment)")]
    MissingApiKey { env_file: String },

    #[error("Failed to read env file {path}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },
}

/// Per-ASIN lookup failures. Recorded as row-level errors and reported in
/// the output; never fatal to a batch and never a non-zero exit.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Invalid ASIN '{0}': expected 10 alphanumeric characters")]
    InvalidAsin(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected {page} payload: {source}")]
    Decode {
        page: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_message() {
        let err = ConfigError::MissingApiKey {
            env_file: ".env.rainforest".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("RAINFOREST_API_KEY"));
        assert!(msg.contains(".env.rainforest"));
    }

    #[test]
    fn test_invalid_asin_message() {
        let err = LookupError::InvalidAsin("nope".to_string());
        assert!(err.to_string().contains("nope"));
        assert!(err.to_string().contains("10 alphanumeric"));
    }

    #[test]
    fn test_status_message_includes_code_and_body() {
        let err = LookupError::Status {
            status: 429,
            body: "{\"request_info\":{\"success\":false}}".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("success"));
    }

    #[test]
    fn test_decode_message_names_page() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = LookupError::Decode {
            page: "offers",
            source,
        };
        assert!(err.to_string().contains("offers"));
    }
}
