use chrono::{Duration, Months, NaiveDate};

use crate::analytics::display_merchant;
use crate::models::{Item, ReturnRequest, Transaction, Warranty};

const NON_RETURNABLE_ITEM_CATEGORIES: &[&str] = &[
    "food", "beverages", "prepared", "dessert", "service", "tax", "parking", "lodging", "hotel",
    "ride", "subscription",
];

const NON_RETURNABLE_MERCHANT_CATEGORIES: &[&str] = &["restaurant", "travel", "subscription"];

const WARRANTY_KEYWORDS: &[&str] = &[
    "tv", "phone", "laptop", "computer", "headphone", "camera", "console", "appliance", "washer",
    "dryer", "fridge", "microwave", "router", "monitor", "keyboard", "speaker", "audio", "tool",
    "drill", "saw",
];

const WARRANTY_CATEGORIES: &[&str] = &[
    "electronics", "appliance", "audio", "computer", "device", "hardware", "tools",
];

/// A transaction is returnable within a 30-day window of its purchase date.
pub fn is_return_eligible(txn: &Transaction, today: NaiveDate) -> bool {
    let Ok(purchased) = NaiveDate::parse_from_str(&txn.transaction_date, "%Y-%m-%d") else {
        return false;
    };
    (today - purchased).num_days().abs() <= 30
}

pub fn is_item_return_eligible(txn: &Transaction, item: &Item, today: NaiveDate) -> bool {
    if !is_return_eligible(txn, today) {
        return false;
    }
    let cat = item.category.to_lowercase();
    let merchant_cat = txn.merchant_category.to_lowercase();
    !NON_RETURNABLE_ITEM_CATEGORIES.contains(&cat.as_str())
        && !NON_RETURNABLE_MERCHANT_CATEGORIES.contains(&merchant_cat.as_str())
}

/// Durable goods qualify for warranty tracking, by category or device keyword.
pub fn is_warranty_eligible(item: &Item) -> bool {
    let cat = item.category.to_lowercase();
    if WARRANTY_CATEGORIES.contains(&cat.as_str()) {
        return true;
    }
    let name = item.name.to_lowercase();
    WARRANTY_KEYWORDS.iter().any(|k| name.contains(k))
}

fn pick_item(preferred: Option<usize>, requested: Option<usize>, len: usize) -> usize {
    preferred.unwrap_or_else(|| requested.unwrap_or(0)).min(len.saturating_sub(1))
}

/// Build a return request for the first eligible item (or the requested
/// index when nothing qualifies).
pub fn build_return_request(
    txn: &Transaction,
    requested: Option<usize>,
    today: NaiveDate,
) -> Option<(usize, ReturnRequest)> {
    if txn.items.is_empty() {
        return None;
    }
    let preferred = txn
        .items
        .iter()
        .position(|i| is_item_return_eligible(txn, i, today));
    let idx = pick_item(preferred, requested, txn.items.len());
    let item = &txn.items[idx];

    let purchase = if txn.transaction_date.is_empty() {
        today.format("%Y-%m-%d").to_string()
    } else {
        txn.transaction_date.clone()
    };
    let deadline = NaiveDate::parse_from_str(&purchase, "%Y-%m-%d")
        .unwrap_or(today)
        + Duration::days(30);

    let merchant = if txn.normalized_merchant.is_empty() {
        "Unknown".to_string()
    } else {
        txn.normalized_merchant.clone()
    };

    Some((
        idx,
        ReturnRequest {
            item_name: item.name.clone(),
            merchant,
            purchase_date: purchase,
            return_deadline: deadline.format("%Y-%m-%d").to_string(),
            status: "requested".to_string(),
            refund_amount: item.total_price,
            reason: "Initiated from statements view".to_string(),
            method: "mail".to_string(),
            transaction_id: txn.id.map(|id| id.to_string()).unwrap_or_default(),
            item_index: idx,
        },
    ))
}

/// Build a warranty record for the first warranty-eligible item (or the
/// requested index when nothing qualifies). 12-month coverage from purchase.
pub fn build_warranty(
    txn: &Transaction,
    requested: Option<usize>,
    today: NaiveDate,
) -> Option<(usize, Warranty)> {
    if txn.items.is_empty() {
        return None;
    }
    let preferred = txn.items.iter().position(is_warranty_eligible);
    let idx = pick_item(preferred, requested, txn.items.len());
    let item = &txn.items[idx];

    let purchase = if txn.transaction_date.is_empty() {
        today.format("%Y-%m-%d").to_string()
    } else {
        txn.transaction_date.clone()
    };
    let expiry = NaiveDate::parse_from_str(&purchase, "%Y-%m-%d")
        .unwrap_or(today)
        .checked_add_months(Months::new(12))
        .unwrap_or(today);

    let display = display_merchant(txn);
    Some((
        idx,
        Warranty {
            item_name: item.name.clone(),
            merchant: display.clone(),
            purchase_date: purchase,
            warranty_provider: format!("{display} / Manufacturer"),
            warranty_months: 12,
            warranty_expiry_date: expiry.format("%Y-%m-%d").to_string(),
            receipt_transaction_id: txn.id.map(|id| id.to_string()).unwrap_or_default(),
            item_index: idx,
            status: "active".to_string(),
            notes: "Tracked from statements view".to_string(),
        },
    ))
}
