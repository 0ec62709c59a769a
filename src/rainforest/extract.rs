//! Field extraction: turns the raw product and offers payloads for one ASIN
//! into a normalized `BuyBoxRecord`.

use super::models::{BuyBoxRecord, Money, OffersResponse, ProductResponse};

/// Tolerance when comparing price against RRP for the discount flag.
const PRICE_EPSILON: f64 = 1e-9;

/// Builds a record from the two page payloads.
///
/// Never fails: every upstream field is optional and absent fields stay
/// `None` in the record. The offers page is the primary source for seller,
/// price, and Prime; the product page's Buy Box snapshot fills gaps.
pub fn extract(asin: &str, product: &ProductResponse, offers: &OffersResponse) -> BuyBoxRecord {
    let page = product.product.clone().unwrap_or_default();
    let snapshot = page.buybox_winner.clone().unwrap_or_default();

    let listings = offers.offers();
    let winner = listings.iter().find(|o| o.is_buybox_winner());
    let buybox_exists = winner.is_some();

    // Buy Box listing when one exists, top-ranked listing otherwise.
    let chosen = winner.or_else(|| listings.first());

    let (mut price, mut currency) = money_parts(chosen.and_then(|o| o.price.as_ref()));
    if price.is_none() {
        (price, currency) = money_parts(snapshot.price.as_ref());
    }

    // Empty strings from the API count as absent.
    let chosen_seller = chosen.and_then(|o| o.seller.as_ref());
    let snapshot_seller = snapshot.seller.as_ref();
    let seller_name = non_empty(chosen_seller.and_then(|s| s.name.clone()))
        .or_else(|| non_empty(snapshot_seller.and_then(|s| s.name.clone())));
    let seller_id = non_empty(chosen_seller.and_then(|s| s.id.clone()))
        .or_else(|| non_empty(snapshot_seller.and_then(|s| s.id.clone())));

    let prime = chosen.and_then(|o| o.is_prime).or(snapshot.is_prime);

    // RRP value and currency each fall back to the product list price
    // independently.
    let (list_price, list_price_ccy) = money_parts(page.list_price.as_ref());
    let (offer_rrp, offer_rrp_ccy) = money_parts(chosen.and_then(|o| o.rrp.as_ref()));
    let rrp = offer_rrp.or(list_price);
    let rrp_currency = offer_rrp_ccy.or(list_price_ccy);

    let discounted = match (price, rrp) {
        (Some(p), Some(r)) => Some(p < r - PRICE_EPSILON),
        // No price/RRP pair: the first reported savings-style amount decides.
        _ => [
            money_value(page.savings.as_ref()),
            money_value(chosen.and_then(|o| o.save.as_ref())),
            money_value(chosen.and_then(|o| o.savings.as_ref())),
            money_value(chosen.and_then(|o| o.amazon_discount.as_ref())),
            money_value(snapshot.save.as_ref()),
            money_value(snapshot.savings.as_ref()),
            money_value(snapshot.amazon_discount.as_ref()),
        ]
        .into_iter()
        .flatten()
        .next()
        .map(|v| v > 0.0),
    };

    BuyBoxRecord {
        asin: asin.to_string(),
        product_name: page.title,
        price,
        currency,
        buybox_exists,
        seller_name,
        seller_id,
        prime,
        discounted,
        rrp,
        rrp_currency,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn money_parts(money: Option<&Money>) -> (Option<f64>, Option<String>) {
    match money {
        Some(m) => (m.value, m.currency.clone()),
        None => (None, None),
    }
}

fn money_value(money: Option<&Money>) -> Option<f64> {
    money.and_then(|m| m.value)
}
