//! Single-ASIN lookup command.

use crate::config::Config;
use crate::format;
use crate::rainforest::client::{RainforestApi, RainforestClient};
use crate::rainforest::models::LookupFailure;
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Looks up one ASIN and renders the aligned vertical table.
pub struct LookupCommand {
    config: Config,
}

impl LookupCommand {
    /// Creates a new lookup command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches a single ASIN and returns the rendered table.
    pub async fn execute(&self, asin: &str) -> Result<String> {
        let client = RainforestClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, asin).await
    }

    /// Runs the lookup with a provided client (for testing).
    ///
    /// Lookup failures are rendered as an error block in the same table
    /// layout rather than returned as errors; a failed lookup still exits
    /// cleanly.
    pub async fn execute_with_client(
        &self,
        client: &impl RainforestApi,
        asin: &str,
    ) -> Result<String> {
        info!("Looking up Buy Box for: {}", asin.trim());

        match super::fetch_record(client, asin).await {
            Ok(record) => Ok(format::render_record(&record)),
            Err(e) => {
                warn!("Lookup failed for {}: {}", asin.trim(), e);
                Ok(format::render_failure(&LookupFailure::new(asin.trim(), e)))
            }
        }
    }
}
