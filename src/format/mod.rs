//! Terminal rendering for lookup results: the aligned vertical table and the
//! shared value-formatting helpers.

use crate::rainforest::models::{BuyBoxRecord, LookupFailure};

/// Title display cap for the terminal table.
pub const TITLE_MAX_TERM: usize = 60;
/// Title display cap for CSV cells.
pub const TITLE_MAX_CSV: usize = 80;

/// Extra rule length past the label column in the vertical table.
const RULE_EXTRA: usize = 40;

/// Formats an optional boolean as Yes/No, with "-" for unknown.
pub fn fmt_bool(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "Yes",
        Some(false) => "No",
        None => "-",
    }
}

/// Formats an amount with its currency, "-" when the amount is missing.
/// An empty currency string counts as missing.
pub fn fmt_money(amount: Option<f64>, currency: Option<&str>) -> String {
    match (amount, currency.filter(|c| !c.is_empty())) {
        (Some(value), Some(ccy)) => format!("{} {}", value, ccy),
        (Some(value), None) => value.to_string(),
        (None, _) => "-".to_string(),
    }
}

/// Collapses whitespace and truncates to at most `max_len` characters,
/// cutting at a word boundary and appending an ellipsis. Character-based so
/// multibyte titles never split a code point.
pub fn shorten(text: &str, max_len: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_len {
        return collapsed;
    }

    let prefix: String = collapsed.chars().take(max_len).collect();
    let cut = match prefix.rfind(' ') {
        Some(idx) => &prefix[..idx],
        // Single long word, hard cut
        None => prefix.as_str(),
    };
    format!("{}…", cut)
}

/// Renders the aligned label/value table for one record.
pub fn render_record(record: &BuyBoxRecord) -> String {
    let title = record
        .product_name
        .as_deref()
        .map(|t| shorten(t, TITLE_MAX_TERM))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "-".to_string());

    let seller = format!(
        "{} (ID: {})",
        record.seller_name.as_deref().unwrap_or("-"),
        record.seller_id.as_deref().unwrap_or("-"),
    );

    let rows = [
        ("ASIN", record.asin.clone()),
        ("Title", title),
        (
            "Price",
            fmt_money(record.price, record.currency.as_deref()),
        ),
        (
            "Buy Box Exists",
            fmt_bool(Some(record.buybox_exists)).to_string(),
        ),
        ("Seller", seller),
        ("Prime", fmt_bool(record.prime).to_string()),
        ("Discounted", fmt_bool(record.discounted).to_string()),
        ("RRP", fmt_money(record.rrp, record.rrp_currency.as_deref())),
    ];
    vertical_table(&rows)
}

/// Renders the error block for a failed lookup in the same table layout.
pub fn render_failure(failure: &LookupFailure) -> String {
    let rows = [
        ("ASIN", failure.asin.clone()),
        ("Error", failure.error.clone()),
    ];
    vertical_table(&rows)
}

fn vertical_table(rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let rule = "-".repeat(width + 2 + RULE_EXTRA);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(rule.clone());
    for (label, value) in rows {
        lines.push(format!("{:<width$} : {}", label, value));
    }
    lines.push(rule);
    lines.join("\n")
}
