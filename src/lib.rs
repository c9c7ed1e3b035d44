//! checkout-router
//!
//! Computes the post-purchase destination for a completed checkout: given
//! everything known at completion time (cart, transaction state, site,
//! requested feature, caller-supplied redirect), the resolver returns the
//! path or URL the user should land on next.

pub use checkout_router_config::{
    validate_config, AppConfig, ConfigError, ConfigLoader, ConfigWatcher, Environment,
    FlagsConfig, GsuiteConfig,
};
pub use checkout_router_resolver::{
    DisabledFlags, DisplayMode, FeatureFlags, GsuiteCountryCheck, IneligibleCountry,
    NoSavedDestination, ReceiptFragment, Resolver, SignupDestinationStore,
    CONCIERGE_UPSELL_FLAG, RECOGNIZED_FEATURES,
};
pub use checkout_router_types::{
    Cart, CartProduct, CheckoutCompletionContext, ContextBuilder, ProductExtra, PurchaseType,
    Site, Transaction, TransactionData, TransactionStep,
};
