use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Transaction state reported by the payment backend.
///
/// Field names mirror the checkout API payload, which mixes snake_case and
/// camelCase (`receipt_id` vs `orderId`); serde renames keep the wire shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    pub step: TransactionStep,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionStep {
    pub data: Option<TransactionData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionData {
    pub receipt_id: Option<String>,

    #[serde(rename = "orderId")]
    pub order_id: Option<String>,

    /// Successful purchases keyed by site id
    pub purchases: HashMap<String, Value>,

    /// Failed purchases keyed by site id
    pub failed_purchases: HashMap<String, Value>,
}

impl Transaction {
    pub fn data(&self) -> Option<&TransactionData> {
        self.step.data.as_ref()
    }

    pub fn receipt_id(&self) -> Option<&str> {
        self.data().and_then(|d| d.receipt_id.as_deref())
    }

    pub fn order_id(&self) -> Option<&str> {
        self.data().and_then(|d| d.order_id.as_deref())
    }

    pub fn has_failed_purchases(&self) -> bool {
        self.data().is_some_and(|d| !d.failed_purchases.is_empty())
    }
}
