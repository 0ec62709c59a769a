//! Data models for Rainforest API payloads and extracted Buy Box records.
//!
//! Every wire field is optional: the upstream schema is not under our
//! control and routinely omits fields, so deserialization must never fail
//! just because a listing is sparse.

use serde::{Deserialize, Serialize};

/// A monetary amount as reported by the API. Either part may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Money {
    /// Numeric amount
    #[serde(default)]
    pub value: Option<f64>,
    /// Currency code (GBP, USD, etc.)
    #[serde(default)]
    pub currency: Option<String>,
}

impl Money {
    /// Creates a money value with both parts set.
    pub fn new(value: f64, currency: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            currency: Some(currency.into()),
        }
    }
}

/// Seller identity attached to an offer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SellerInfo {
    /// Display name of the seller
    #[serde(default)]
    pub name: Option<String>,
    /// Marketplace seller ID
    #[serde(default)]
    pub id: Option<String>,
}

/// One listing from the `type=offers` page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Offer {
    /// True when this listing currently holds the Buy Box
    #[serde(default)]
    pub buybox_winner: Option<bool>,
    /// Current offer price
    #[serde(default)]
    pub price: Option<Money>,
    /// Recommended retail ("was") price
    #[serde(default)]
    pub rrp: Option<Money>,
    /// Savings amount, first variant
    #[serde(default)]
    pub save: Option<Money>,
    /// Savings amount, second variant
    #[serde(default)]
    pub savings: Option<Money>,
    /// Amazon-funded discount amount
    #[serde(default)]
    pub amazon_discount: Option<Money>,
    /// Seller behind the listing
    #[serde(default)]
    pub seller: Option<SellerInfo>,
    /// Prime eligibility; `None` when the listing does not say
    #[serde(default)]
    pub is_prime: Option<bool>,
}

impl Offer {
    /// Whether this listing is flagged as the Buy Box winner.
    pub fn is_buybox_winner(&self) -> bool {
        self.buybox_winner.unwrap_or(false)
    }
}

/// The Buy Box block embedded in the product page. Shaped like an offer but
/// never carries the winner flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuyBoxSnapshot {
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub seller: Option<SellerInfo>,
    #[serde(default)]
    pub is_prime: Option<bool>,
    #[serde(default)]
    pub save: Option<Money>,
    #[serde(default)]
    pub savings: Option<Money>,
    #[serde(default)]
    pub amazon_discount: Option<Money>,
}

/// Product summary from the `type=product` page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPayload {
    /// Full product title
    #[serde(default)]
    pub title: Option<String>,
    /// Manufacturer list price
    #[serde(default)]
    pub list_price: Option<Money>,
    /// Savings reported at product level
    #[serde(default)]
    pub savings: Option<Money>,
    /// Current Buy Box offer as the product page sees it
    #[serde(default)]
    pub buybox_winner: Option<BuyBoxSnapshot>,
}

/// `type=product` response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductResponse {
    #[serde(default)]
    pub product: Option<ProductPayload>,
}

/// `type=offers` response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OffersResponse {
    #[serde(default)]
    pub offers: Option<Vec<Offer>>,
}

impl OffersResponse {
    /// The offer list, empty when the page carried none.
    pub fn offers(&self) -> &[Offer] {
        self.offers.as_deref().unwrap_or(&[])
    }
}

/// Normalized Buy Box lookup result for one ASIN.
///
/// Every field except `asin` and `buybox_exists` may be absent because the
/// underlying listing omits it; absence is distinct from false or zero and
/// renders as a placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyBoxRecord {
    /// Product identifier this record describes
    pub asin: String,
    /// Full product title
    pub product_name: Option<String>,
    /// Current Buy Box (or top listing) price
    pub price: Option<f64>,
    /// Currency of `price`
    pub currency: Option<String>,
    /// True iff an offer is flagged as the Buy Box winner
    pub buybox_exists: bool,
    /// Seller name of the chosen listing
    pub seller_name: Option<String>,
    /// Seller ID of the chosen listing
    pub seller_id: Option<String>,
    /// Prime eligibility of the chosen listing
    pub prime: Option<bool>,
    /// Whether the offer is discounted against the RRP
    pub discounted: Option<bool>,
    /// Recommended retail price
    pub rrp: Option<f64>,
    /// Currency of `rrp`
    pub rrp_currency: Option<String>,
}

/// A lookup that produced no record: the ASIN plus a human-readable cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupFailure {
    pub asin: String,
    pub error: String,
}

impl LookupFailure {
    /// Builds a failure row from any displayable error.
    pub fn new(asin: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self {
            asin: asin.into(),
            error: error.to_string(),
        }
    }
}

/// Outcome of one lookup in a batch: a record or that row's failure.
pub type LookupOutcome = Result<BuyBoxRecord, LookupFailure>;
