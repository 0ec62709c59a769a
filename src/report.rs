//! Batch table I/O: reading the input ASIN column and writing result rows.

use crate::format::{shorten, TITLE_MAX_CSV};
use crate::rainforest::models::{BuyBoxRecord, LookupFailure, LookupOutcome};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Output column set, in order. A successful row leaves `error` empty; a
/// failed row leaves every product field empty.
const COLUMNS: [&str; 12] = [
    "asin",
    "product_name",
    "price",
    "currency",
    "buybox_exists",
    "seller_name",
    "seller_id",
    "prime",
    "discounted",
    "rrp",
    "rrp_currency",
    "error",
];

/// One output row, success or failure. Absent values serialize as empty
/// cells.
#[derive(Debug, Clone, Serialize)]
struct ReportRow {
    asin: String,
    product_name: Option<String>,
    price: Option<f64>,
    currency: Option<String>,
    buybox_exists: Option<bool>,
    seller_name: Option<String>,
    seller_id: Option<String>,
    prime: Option<bool>,
    discounted: Option<bool>,
    rrp: Option<f64>,
    rrp_currency: Option<String>,
    error: Option<String>,
}

impl ReportRow {
    fn from_record(record: &BuyBoxRecord) -> Self {
        Self {
            asin: record.asin.clone(),
            product_name: record
                .product_name
                .as_deref()
                .map(|t| shorten(t, TITLE_MAX_CSV)),
            price: record.price,
            currency: record.currency.clone(),
            buybox_exists: Some(record.buybox_exists),
            seller_name: record.seller_name.clone(),
            seller_id: record.seller_id.clone(),
            prime: record.prime,
            discounted: record.discounted,
            rrp: record.rrp,
            rrp_currency: record.rrp_currency.clone(),
            error: None,
        }
    }

    fn from_failure(failure: &LookupFailure) -> Self {
        Self {
            asin: failure.asin.clone(),
            product_name: None,
            price: None,
            currency: None,
            buybox_exists: None,
            seller_name: None,
            seller_id: None,
            prime: None,
            discounted: None,
            rrp: None,
            rrp_currency: None,
            error: Some(failure.error.clone()),
        }
    }
}

impl From<&LookupOutcome> for ReportRow {
    fn from(outcome: &LookupOutcome) -> Self {
        match outcome {
            Ok(record) => Self::from_record(record),
            Err(failure) => Self::from_failure(failure),
        }
    }
}

/// Reads the `asin` column from the input table. Header matching is
/// case-insensitive, cells are trimmed, and blank cells are skipped.
pub fn read_asins(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open input CSV: {}", path.display()))?;

    let asin_col = {
        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read header row from {}", path.display()))?;
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case("asin"))
    }
    .with_context(|| format!("Input CSV {} has no 'asin' column", path.display()))?;

    let mut asins = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("Failed to read row from {}", path.display()))?;
        if let Some(value) = record.get(asin_col) {
            let value = value.trim();
            if !value.is_empty() {
                asins.push(value.to_string());
            }
        }
    }

    debug!("Read {} ASIN(s) from {}", asins.len(), path.display());
    Ok(asins)
}

/// Writes the output table in input order. The header row is always present,
/// even for an empty batch.
pub fn write_report(path: impl AsRef<Path>, outcomes: &[LookupOutcome]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create output CSV: {}", path.display()))?;

    writer
        .write_record(COLUMNS)
        .context("Failed to write CSV header")?;
    for outcome in outcomes {
        writer
            .serialize(ReportRow::from(outcome))
            .context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush output CSV")?;

    debug!("Wrote {} row(s) to {}", outcomes.len(), path.display());
    Ok(())
}
