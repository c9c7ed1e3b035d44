use serde::{Deserialize, Serialize};

/// Shopping cart contents at checkout completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cart {
    /// Ordered line items
    pub products: Vec<CartProduct>,

    /// The site was created as part of this checkout
    pub create_new_blog: bool,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// First line item whose product slug satisfies the predicate
    pub fn find_by_slug(&self, pred: impl Fn(&str) -> bool) -> Option<&CartProduct> {
        self.products
            .iter()
            .find(|p| p.product_slug.as_deref().is_some_and(&pred))
    }

    pub fn has_slug(&self, pred: impl Fn(&str) -> bool) -> bool {
        self.find_by_slug(pred).is_some()
    }
}

/// A single product line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartProduct {
    pub product_slug: Option<String>,

    /// Product-specific metadata; carries the domain name for
    /// domain-registration and mailbox products
    pub meta: Option<String>,

    pub is_domain_registration: bool,

    pub extra: ProductExtra,
}

/// Free-form "extra" metadata attached to a line item by the checkout flow.
///
/// Unlike the rest of the cart payload, this block uses camelCase on the
/// wire (`purchaseType`, `purchaseDomain`, `purchaseId`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductExtra {
    /// Flow that put the item in the cart (e.g., "signup")
    pub context: Option<String>,

    pub purchase_type: Option<PurchaseType>,

    /// Domain of the purchase being renewed
    pub purchase_domain: Option<String>,

    /// Identifier of the purchase being renewed
    pub purchase_id: Option<String>,
}

/// Purchase type marker on a line item's extra metadata.
///
/// Unrecognized wire values deserialize to `Other` rather than failing:
/// the resolver treats anything that is not a renewal as ordinary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseType {
    Renewal,
    NewPurchase,
    #[serde(other)]
    Other,
}

impl CartProduct {
    /// Renewal target, when this line item renews an existing purchase.
    ///
    /// Both the purchase domain and the purchase id must be present for a
    /// renewal to be actionable.
    pub fn renewal_target(&self) -> Option<(&str, &str)> {
        if self.extra.purchase_type != Some(PurchaseType::Renewal) {
            return None;
        }
        match (
            self.extra.purchase_domain.as_deref(),
            self.extra.purchase_id.as_deref(),
        ) {
            (Some(domain), Some(id)) => Some((domain, id)),
            _ => None,
        }
    }

    /// True for a domain registration added by the signup flow.
    pub fn is_signup_domain_registration(&self) -> bool {
        self.is_domain_registration && self.extra.context.as_deref() == Some("signup")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_purchase_type_degrades_to_other() {
        let extra: ProductExtra =
            serde_json::from_str(r#"{ "purchaseType": "some_future_type" }"#).unwrap();
        assert_eq!(extra.purchase_type, Some(PurchaseType::Other));
    }

    #[test]
    fn extra_block_uses_camel_case_wire_names() {
        let extra: ProductExtra = serde_json::from_str(
            r#"{ "purchaseType": "renewal", "purchaseDomain": "foo.bar", "purchaseId": "123abc" }"#,
        )
        .unwrap();
        assert_eq!(extra.purchase_type, Some(PurchaseType::Renewal));
        assert_eq!(extra.purchase_domain.as_deref(), Some("foo.bar"));
        assert_eq!(extra.purchase_id.as_deref(), Some("123abc"));
    }

    #[test]
    fn renewal_target_requires_domain_and_id() {
        let mut product = CartProduct {
            extra: ProductExtra {
                purchase_type: Some(PurchaseType::Renewal),
                purchase_domain: Some("foo.bar".to_string()),
                purchase_id: None,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(product.renewal_target(), None);

        product.extra.purchase_id = Some("123abc".to_string());
        assert_eq!(product.renewal_target(), Some(("foo.bar", "123abc")));
    }

    #[test]
    fn signup_domain_registration_needs_both_markers() {
        let product = CartProduct {
            is_domain_registration: true,
            extra: ProductExtra {
                context: Some("signup".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(product.is_signup_domain_registration());

        let without_context = CartProduct {
            is_domain_registration: true,
            ..Default::default()
        };
        assert!(!without_context.is_signup_domain_registration());
    }

    #[test]
    fn partial_cart_payload_deserializes() {
        let cart: Cart =
            serde_json::from_str(r#"{ "products": [ { "product_slug": "value_bundle" } ] }"#)
                .unwrap();
        assert!(!cart.create_new_blog);
        assert_eq!(cart.products.len(), 1);
        assert!(cart.has_slug(|slug| slug == "value_bundle"));
    }
}
