use serde::{Deserialize, Serialize};

use crate::{Cart, Site, Transaction};

/// Everything known about a completed checkout, assembled by the caller per
/// completion event and discarded after resolution.
///
/// Every field is optional by contract: an absent or malformed field selects
/// a default branch in the resolver instead of producing an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutCompletionContext {
    pub site_slug: Option<String>,

    pub site: Option<Site>,

    pub purchase_id: Option<String>,

    pub transaction: Option<Transaction>,

    pub cart: Option<Cart>,

    /// Requested post-purchase feature to highlight; ignored unless it is
    /// a recognized feature key
    pub feature: Option<String>,

    pub is_jetpack_not_atomic: bool,

    /// Product slug, consulted only on the Jetpack-non-atomic branch
    pub product: Option<String>,

    /// Caller-supplied destination, honored only when it stays inside the
    /// site's admin URL (or no admin URL is configured)
    pub redirect_to: Option<String>,

    pub is_newly_created_site: bool,

    pub is_eligible_for_signup_destination: bool,

    /// Route the user was on before arriving at checkout
    pub previous_route: Option<String>,
}

impl CheckoutCompletionContext {
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    /// Site slug, with the empty string treated as absent.
    pub fn site_slug(&self) -> Option<&str> {
        self.site_slug.as_deref().filter(|s| !s.is_empty())
    }

    pub fn admin_url(&self) -> Option<&str> {
        self.site.as_ref().and_then(|s| s.admin_url.as_deref())
    }

    pub fn cart_products_is_empty(&self) -> bool {
        self.cart.as_ref().map_or(true, Cart::is_empty)
    }

    pub fn create_new_blog(&self) -> bool {
        self.cart.as_ref().is_some_and(|c| c.create_new_blog)
    }

    pub fn has_failed_purchases(&self) -> bool {
        self.transaction
            .as_ref()
            .is_some_and(Transaction::has_failed_purchases)
    }
}

/// Builder for checkout completion contexts.
///
/// Infallible: all fields are optional, so `build` returns the context
/// directly rather than a `Result`.
#[derive(Debug, Default)]
pub struct ContextBuilder {
    ctx: CheckoutCompletionContext,
}

impl ContextBuilder {
    pub fn site_slug(mut self, slug: impl Into<String>) -> Self {
        self.ctx.site_slug = Some(slug.into());
        self
    }

    pub fn site(mut self, site: Site) -> Self {
        self.ctx.site = Some(site);
        self
    }

    pub fn purchase_id(mut self, id: impl Into<String>) -> Self {
        self.ctx.purchase_id = Some(id.into());
        self
    }

    pub fn transaction(mut self, transaction: Transaction) -> Self {
        self.ctx.transaction = Some(transaction);
        self
    }

    pub fn cart(mut self, cart: Cart) -> Self {
        self.ctx.cart = Some(cart);
        self
    }

    pub fn feature(mut self, feature: impl Into<String>) -> Self {
        self.ctx.feature = Some(feature.into());
        self
    }

    pub fn jetpack_not_atomic(mut self, value: bool) -> Self {
        self.ctx.is_jetpack_not_atomic = value;
        self
    }

    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.ctx.product = Some(product.into());
        self
    }

    pub fn redirect_to(mut self, url: impl Into<String>) -> Self {
        self.ctx.redirect_to = Some(url.into());
        self
    }

    pub fn newly_created_site(mut self, value: bool) -> Self {
        self.ctx.is_newly_created_site = value;
        self
    }

    pub fn eligible_for_signup_destination(mut self, value: bool) -> Self {
        self.ctx.is_eligible_for_signup_destination = value;
        self
    }

    pub fn previous_route(mut self, route: impl Into<String>) -> Self {
        self.ctx.previous_route = Some(route.into());
        self
    }

    pub fn build(self) -> CheckoutCompletionContext {
        self.ctx
    }
}
