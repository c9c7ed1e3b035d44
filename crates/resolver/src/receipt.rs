//! Receipt fragment: the identifier segment appended to thank-you URLs.

use checkout_router_types::CheckoutCompletionContext;
use serde::Serialize;

/// Placeholder used when a receipt id is not known yet (redirect-type
/// payment methods resolve the destination before the receipt exists).
pub const RECEIPT_PLACEHOLDER: &str = ":receiptId";

/// Best available purchase identifier for the completed checkout, in
/// preference order: receipt id, pending order id, purchase id, then a
/// placeholder when the cart has products but no identifier exists yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReceiptFragment {
    Receipt(String),
    PendingOrder(String),
    Purchase(String),
    Placeholder,
    Absent,
}

impl ReceiptFragment {
    /// Empty-string identifiers count as absent, same as a missing field.
    pub fn from_context(ctx: &CheckoutCompletionContext) -> Self {
        let tx = ctx.transaction.as_ref();
        if let Some(id) = tx.and_then(|t| t.receipt_id()).filter(|id| !id.is_empty()) {
            return Self::Receipt(id.to_string());
        }
        if let Some(id) = tx.and_then(|t| t.order_id()).filter(|id| !id.is_empty()) {
            return Self::PendingOrder(id.to_string());
        }
        if let Some(id) = ctx.purchase_id.as_deref().filter(|id| !id.is_empty()) {
            return Self::Purchase(id.to_string());
        }
        if !ctx.cart_products_is_empty() {
            return Self::Placeholder;
        }
        Self::Absent
    }

    /// Path segment form: pending orders render as `pending/{orderId}`.
    pub fn as_path_segment(&self) -> Option<String> {
        match self {
            Self::Receipt(id) | Self::Purchase(id) => Some(id.clone()),
            Self::PendingOrder(id) => Some(format!("pending/{id}")),
            Self::Placeholder => Some(RECEIPT_PLACEHOLDER.to_string()),
            Self::Absent => None,
        }
    }

    /// Bare identifier, without the `pending/` prefix. Used where the id
    /// fills a single path slot (nudges, cookie-destination appends).
    pub fn raw_id(&self) -> Option<&str> {
        match self {
            Self::Receipt(id) | Self::PendingOrder(id) | Self::Purchase(id) => Some(id),
            Self::Placeholder => Some(RECEIPT_PLACEHOLDER),
            Self::Absent => None,
        }
    }
}
