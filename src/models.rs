use serde::{Deserialize, Serialize};

/// One line item embedded in a transaction's itemized breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
}

impl Item {
    pub fn new(name: &str, category: &str, quantity: i64, unit_price: f64) -> Self {
        let unit = (unit_price * 100.0).round() / 100.0;
        Self {
            name: name.to_string(),
            category: category.to_string(),
            quantity,
            unit_price: unit,
            total_price: (unit * quantity as f64 * 100.0).round() / 100.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
}

impl Location {
    pub fn new(address: &str, city: &str, state: &str, zip: &str) -> Self {
        Self {
            address: address.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            zip: zip.to_string(),
        }
    }
}

/// An enriched transaction as stored in the entity store.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: Option<i64>,
    pub raw_description: String,
    pub normalized_merchant: String,
    pub merchant_category: String,
    pub transaction_amount: f64,
    pub transaction_date: String,
    pub pos_format: String,
    pub confidence_score: f64,
    pub items: Vec<Item>,
    pub location: Location,
    pub fraud_risk_score: f64,
    pub fraud_flagged: bool,
    pub processing_time_ms: i64,
    pub status: String,
    pub created_date: String,
}

impl Transaction {
    /// Sum of item totals, rounded to cents.
    pub fn amount_from_items(items: &[Item]) -> f64 {
        let sum: f64 = items.iter().map(|i| i.total_price).sum();
        (sum * 100.0).round() / 100.0
    }
}

/// Field patch for `update`, mirroring the entity SDK's partial updates.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub fraud_flagged: Option<bool>,
    pub fraud_risk_score: Option<f64>,
}

// ---------------------------------------------------------------------------
// Simple records backed by the generic collection store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warranty {
    pub item_name: String,
    pub merchant: String,
    pub purchase_date: String,
    pub warranty_provider: String,
    pub warranty_months: i64,
    pub warranty_expiry_date: String,
    pub receipt_transaction_id: String,
    pub item_index: usize,
    pub status: String,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnRequest {
    pub item_name: String,
    pub merchant: String,
    pub purchase_date: String,
    pub return_deadline: String,
    pub status: String,
    pub refund_amount: f64,
    pub reason: String,
    pub method: String,
    pub transaction_id: String,
    pub item_index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub email: String,
    pub source: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantProfile {
    pub name: String,
    pub category: String,
    pub pos_format: String,
    pub sample_description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorporateExpense {
    pub description: String,
    pub amount: f64,
    pub expense_date: String,
    pub category: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_total_follows_quantity() {
        let it = Item::new("Hand Soap", "home", 2, 3.49);
        assert_eq!(it.total_price, 6.98);
    }

    #[test]
    fn test_amount_from_items_rounds() {
        let items = vec![
            Item::new("Grande Latte", "beverages", 1, 5.25),
            Item::new("Blueberry Muffin", "food", 1, 3.25),
        ];
        assert_eq!(Transaction::amount_from_items(&items), 8.50);
    }
}
