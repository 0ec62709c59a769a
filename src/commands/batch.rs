//! Batch lookup command: CSV in, bounded worker fan-out, CSV out.

use crate::config::Config;
use crate::rainforest::client::{RainforestApi, RainforestClient};
use crate::rainforest::models::{LookupFailure, LookupOutcome};
use crate::report;
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use std::path::Path;
use tracing::{info, warn};

/// Looks up a table of ASINs through a bounded worker pool and writes the
/// result table in input order.
pub struct BatchCommand {
    config: Config,
}

impl BatchCommand {
    /// Creates a new batch command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Reads ASINs from `input`, runs the lookups, writes `output`, and
    /// returns a one-line summary.
    pub async fn execute(&self, input: &Path, output: &Path) -> Result<String> {
        let client = RainforestClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, input, output).await
    }

    /// Runs the batch with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl RainforestApi,
        input: &Path,
        output: &Path,
    ) -> Result<String> {
        let asins = report::read_asins(input)?;
        info!(
            "Looking up {} ASIN(s) with {} worker(s)",
            asins.len(),
            self.config.workers.max(1)
        );

        let outcomes = self.run_pool(client, &asins).await;
        report::write_report(output, &outcomes)?;

        Ok(format!(
            "Wrote {} row(s) to {}",
            outcomes.len(),
            output.display()
        ))
    }

    /// Fans the lookups out across the worker pool. Each result lands in a
    /// slot indexed by input position, so output order matches input order
    /// no matter which worker finishes first. One row's failure never
    /// affects its siblings.
    async fn run_pool(&self, client: &impl RainforestApi, asins: &[String]) -> Vec<LookupOutcome> {
        let workers = self.config.workers.max(1);

        let completed: Vec<(usize, LookupOutcome)> = stream::iter(asins.iter().enumerate())
            .map(|(idx, asin)| {
                let fut = super::fetch_record(client, asin);
                async move {
                    let outcome = match fut.await {
                        Ok(record) => Ok(record),
                        Err(e) => {
                            warn!("Lookup failed for {}: {}", asin.trim(), e);
                            Err(LookupFailure::new(asin.trim(), e))
                        }
                    };
                    (idx, outcome)
                }
            })
            .buffer_unordered(workers)
            .collect()
            .await;

        let mut slots: Vec<Option<LookupOutcome>> = vec![None; asins.len()];
        for (idx, outcome) in completed {
            slots[idx] = Some(outcome);
        }
        // Every index was dispatched exactly once
        debug_assert!(slots.iter().all(Option::is_some));
        slots.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use crate::rainforest::models::{
        Money, Offer, OffersResponse, ProductPayload, ProductResponse, SellerInfo,
    };
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    /// Mock Rainforest client with per-ASIN failures and artificial delays.
    struct MockRainforestClient {
        fail_asins: Vec<String>,
        delays_ms: HashMap<String, u64>,
    }

    impl MockRainforestClient {
        fn new() -> Self {
            Self {
                fail_asins: Vec::new(),
                delays_ms: HashMap::new(),
            }
        }

        fn failing_for(asins: &[&str]) -> Self {
            Self {
                fail_asins: asins.iter().map(|a| a.to_string()).collect(),
                delays_ms: HashMap::new(),
            }
        }

        fn with_delay(mut self, asin: &str, millis: u64) -> Self {
            self.delays_ms.insert(asin.to_string(), millis);
            self
        }

        async fn simulate(&self, asin: &str) -> Result<(), LookupError> {
            if let Some(delay) = self.delays_ms.get(asin) {
                tokio::time::sleep(Duration::from_millis(*delay)).await;
            }
            if self.fail_asins.iter().any(|a| a == asin) {
                return Err(LookupError::Status {
                    status: 500,
                    body: "simulated network failure".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl RainforestApi for MockRainforestClient {
        async fn product(&self, asin: &str) -> Result<ProductResponse, LookupError> {
            self.simulate(asin).await?;
            Ok(ProductResponse {
                product: Some(ProductPayload {
                    title: Some(format!("Product {}", asin)),
                    ..ProductPayload::default()
                }),
            })
        }

        async fn offers(&self, asin: &str) -> Result<OffersResponse, LookupError> {
            self.simulate(asin).await?;
            Ok(OffersResponse {
                offers: Some(vec![Offer {
                    buybox_winner: Some(true),
                    price: Some(Money::new(9.99, "GBP")),
                    seller: Some(SellerInfo {
                        name: Some(format!("Seller of {}", asin)),
                        id: None,
                    }),
                    is_prime: Some(true),
                    ..Offer::default()
                }]),
            })
        }
    }

    fn make_test_config(workers: usize) -> Config {
        Config {
            api_key: "test-key".to_string(),
            domain: "amazon.co.uk".to_string(),
            workers,
            timeout_secs: 30,
        }
    }

    fn asin_list(asins: &[&str]) -> Vec<String> {
        asins.iter().map(|a| a.to_string()).collect()
    }

    fn write_input(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[tokio::test]
    async fn test_order_preserved_under_reverse_completion() {
        // Delays make workers finish in reverse input order.
        let asins = asin_list(&["B000000001", "B000000002", "B000000003"]);
        let client = MockRainforestClient::new()
            .with_delay("B000000001", 90)
            .with_delay("B000000002", 50)
            .with_delay("B000000003", 10);
        let cmd = BatchCommand::new(make_test_config(3));

        let outcomes = cmd.run_pool(&client, &asins).await;

        let order: Vec<&str> = outcomes
            .iter()
            .map(|o| o.as_ref().unwrap().asin.as_str())
            .collect();
        assert_eq!(order, vec!["B000000001", "B000000002", "B000000003"]);
    }

    #[tokio::test]
    async fn test_single_failure_is_isolated() {
        let asins = asin_list(&["B000000001", "B000000002", "B000000003"]);
        let client = MockRainforestClient::failing_for(&["B000000002"]);
        let cmd = BatchCommand::new(make_test_config(2));

        let outcomes = cmd.run_pool(&client, &asins).await;

        assert!(outcomes[0].is_ok());
        assert!(outcomes[2].is_ok());
        let failure = outcomes[1].as_ref().unwrap_err();
        assert_eq!(failure.asin, "B000000002");
        assert!(failure.error.contains("500"));
    }

    #[tokio::test]
    async fn test_invalid_asin_is_per_row_failure() {
        let asins = asin_list(&["B000000001", "bad", "B000000003"]);
        let client = MockRainforestClient::new();
        let cmd = BatchCommand::new(make_test_config(2));

        let outcomes = cmd.run_pool(&client, &asins).await;

        assert!(outcomes[0].is_ok());
        assert!(outcomes[2].is_ok());
        let failure = outcomes[1].as_ref().unwrap_err();
        assert_eq!(failure.asin, "bad");
        assert!(failure.error.contains("Invalid ASIN"));
    }

    #[tokio::test]
    async fn test_duplicates_processed_independently() {
        let asins = asin_list(&["B000000001", "B000000001"]);
        let client = MockRainforestClient::new();
        let cmd = BatchCommand::new(make_test_config(2));

        let outcomes = cmd.run_pool(&client, &asins).await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.is_ok()));
    }

    #[tokio::test]
    async fn test_zero_workers_clamped() {
        let asins = asin_list(&["B000000001"]);
        let client = MockRainforestClient::new();
        let cmd = BatchCommand::new(make_test_config(0));

        let outcomes = cmd.run_pool(&client, &asins).await;
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_ok());
    }

    #[tokio::test]
    async fn test_execute_writes_report_and_summary() {
        let input = write_input("asin\nB000000001\nB000000002\n");
        let output = NamedTempFile::new().unwrap();
        let client = MockRainforestClient::failing_for(&["B000000002"]);
        let cmd = BatchCommand::new(make_test_config(2));

        let summary = cmd
            .execute_with_client(&client, input.path(), output.path())
            .await
            .unwrap();
        assert!(summary.starts_with("Wrote 2 row(s) to "));

        let mut reader = csv::Reader::from_path(output.path()).unwrap();
        let rows: Vec<csv::StringRecord> =
            reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(&rows[0][0], "B000000001");
        assert_eq!(&rows[0][1], "Product B000000001");
        assert_eq!(&rows[0][11], "");

        assert_eq!(&rows[1][0], "B000000002");
        assert_eq!(&rows[1][1], "");
        assert!(rows[1][11].contains("500"));
    }

    #[tokio::test]
    async fn test_execute_empty_input_writes_header_only() {
        let input = write_input("asin\n");
        let output = NamedTempFile::new().unwrap();
        let client = MockRainforestClient::new();
        let cmd = BatchCommand::new(make_test_config(2));

        let summary = cmd
            .execute_with_client(&client, input.path(), output.path())
            .await
            .unwrap();
        assert!(summary.starts_with("Wrote 0 row(s)"));

        let content = std::fs::read_to_string(output.path()).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.starts_with("asin,product_name,"));
    }

    #[tokio::test]
    async fn test_execute_missing_input_is_fatal() {
        let output = NamedTempFile::new().unwrap();
        let client = MockRainforestClient::new();
        let cmd = BatchCommand::new(make_test_config(2));

        let err = cmd
            .execute_with_client(&client, Path::new("/nonexistent/input.csv"), output.path())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open input CSV"));
    }
}
