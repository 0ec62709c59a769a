//! Rainforest API integration: HTTP client, payload models, and record
//! extraction.

pub mod client;
pub mod extract;
pub mod models;

pub use client::{RainforestApi, RainforestClient};
pub use extract::extract;
pub use models::{
    BuyBoxRecord, LookupFailure, LookupOutcome, Money, Offer, OffersResponse, ProductPayload,
    ProductResponse, SellerInfo,
};
