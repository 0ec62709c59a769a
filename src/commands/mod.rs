//! CLI command implementations.

pub mod batch;
pub mod lookup;

pub use batch::BatchCommand;
pub use lookup::LookupCommand;

use crate::error::LookupError;
use crate::rainforest::client::RainforestApi;
use crate::rainforest::extract::extract;
use crate::rainforest::models::BuyBoxRecord;

/// Normalizes an ASIN: trims, uppercases, and checks the shape
/// (10 alphanumeric characters).
pub fn normalize_asin(raw: &str) -> Result<String, LookupError> {
    let asin = raw.trim().to_uppercase();
    if asin.len() != 10 || !asin.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(LookupError::InvalidAsin(raw.trim().to_string()));
    }
    Ok(asin)
}

/// Fetches both Rainforest pages for one ASIN and assembles the record.
/// Shared by single and batch mode.
pub(crate) async fn fetch_record(
    client: &impl RainforestApi,
    raw_asin: &str,
) -> Result<BuyBoxRecord, LookupError> {
    let asin = normalize_asin(raw_asin)?;
    let product = client.product(&asin).await?;
    let offers = client.offers(&asin).await?;
    Ok(extract(&asin, &product, &offers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_asin_valid() {
        assert_eq!(normalize_asin("B08N5WRWNW").unwrap(), "B08N5WRWNW");
    }

    #[test]
    fn test_normalize_asin_trims_and_uppercases() {
        assert_eq!(normalize_asin("  b08n5wrwnw  ").unwrap(), "B08N5WRWNW");
    }

    #[test]
    fn test_normalize_asin_too_short() {
        let err = normalize_asin("B08N5").unwrap_err();
        assert!(err.to_string().contains("Invalid ASIN"));
    }

    #[test]
    fn test_normalize_asin_too_long() {
        assert!(normalize_asin("TOOLONGASIN12345").is_err());
    }

    #[test]
    fn test_normalize_asin_special_chars() {
        let err = normalize_asin("B08N5-WRWN").unwrap_err();
        assert!(err.to_string().contains("B08N5-WRWN"));
    }

    #[test]
    fn test_normalize_asin_empty() {
        assert!(normalize_asin("").is_err());
        assert!(normalize_asin("   ").is_err());
    }
}
