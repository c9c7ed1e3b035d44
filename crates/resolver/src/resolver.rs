//! Destination resolution for completed checkouts.
//!
//! Resolution is an ordered table of named guard rules evaluated
//! top-to-bottom; the first rule that produces a destination wins. Keeping
//! the rules flat (instead of nested conditionals) keeps precedence
//! auditable and lets each rule be tested on its own.
//!
//! Rules produce either a [`Resolution::Final`] destination, returned
//! verbatim, or a [`Resolution::ThankYou`] destination, which still passes
//! through the signup-destination post-processing step.

use std::sync::Arc;

use checkout_router_types::CheckoutCompletionContext;
use tracing::debug;

use crate::features::is_recognized_feature;
use crate::products;
use crate::receipt::ReceiptFragment;
use crate::traits::{
    DisabledFlags, FeatureFlags, GsuiteCountryCheck, IneligibleCountry, NoSavedDestination,
    SignupDestinationStore,
};

/// Flag gating the concierge-session upsell nudges.
pub const CONCIERGE_UPSELL_FLAG: &str = "upsell/concierge-session";

/// Under `create_new_blog`, the receipt fragment is appended to the
/// thank-you base even when the base already ends with it, duplicating the
/// segment. Long-standing upstream behavior, kept bit-for-bit; flip to
/// false to append only after a saved signup destination.
const APPEND_RECEIPT_TO_FALLBACK_BASE: bool = true;

/// Computes the post-purchase destination for a checkout completion
/// context.
///
/// Total: every context maps to a destination string, worst case `/`.
pub struct Resolver {
    flags: Arc<dyn FeatureFlags>,
    gsuite: Arc<dyn GsuiteCountryCheck>,
    signup_destination: Arc<dyn SignupDestinationStore>,
}

impl Default for Resolver {
    /// Resolver with inert capabilities: no flags, no eligible country, no
    /// saved destination.
    fn default() -> Self {
        Self::new(
            Arc::new(DisabledFlags),
            Arc::new(IneligibleCountry),
            Arc::new(NoSavedDestination),
        )
    }
}

impl Resolver {
    pub fn new(
        flags: Arc<dyn FeatureFlags>,
        gsuite: Arc<dyn GsuiteCountryCheck>,
        signup_destination: Arc<dyn SignupDestinationStore>,
    ) -> Self {
        Self {
            flags,
            gsuite,
            signup_destination,
        }
    }

    pub fn with_flags(mut self, flags: impl FeatureFlags + 'static) -> Self {
        self.flags = Arc::new(flags);
        self
    }

    pub fn with_gsuite_check(mut self, gsuite: impl GsuiteCountryCheck + 'static) -> Self {
        self.gsuite = Arc::new(gsuite);
        self
    }

    pub fn with_signup_destination(
        mut self,
        store: impl SignupDestinationStore + 'static,
    ) -> Self {
        self.signup_destination = Arc::new(store);
        self
    }

    /// Resolve the destination for a completed checkout.
    pub fn resolve(&self, ctx: &CheckoutCompletionContext) -> String {
        let fragment = ReceiptFragment::from_context(ctx);
        let feature = ctx
            .feature
            .as_deref()
            .filter(|key| is_recognized_feature(key));

        let input = RuleInput {
            ctx,
            fragment: &fragment,
            feature,
            flags: self.flags.as_ref(),
            gsuite: self.gsuite.as_ref(),
        };

        for (name, rule) in RULES.iter().copied() {
            if let Some(resolution) = rule(&input) {
                debug!(rule = name, "destination rule matched");
                return self.finalize(resolution, &input);
            }
        }

        // The default-thank-you rule matches whenever a site slug exists
        // and the root rule matches otherwise, so this is unreachable.
        "/".to_string()
    }

    /// Post-processing for thank-you-style destinations: the saved signup
    /// destination can replace the base, and `create_new_blog` appends the
    /// receipt fragment as an extra segment.
    fn finalize(&self, resolution: Resolution, input: &RuleInput<'_>) -> String {
        let ThankYou { base, display_mode } = match resolution {
            Resolution::Final(url) => return url,
            Resolution::ThankYou(thank_you) => thank_you,
        };

        let ctx = input.ctx;
        let create_new_blog = ctx.create_new_blog();

        let saved = if ctx.is_eligible_for_signup_destination || create_new_blog {
            self.signup_destination
                .saved_destination()
                .filter(|url| !url.is_empty())
        } else {
            None
        };

        let url = if create_new_blog {
            match (saved, input.fragment.raw_id()) {
                (Some(saved_base), Some(id)) => format!("{saved_base}/{id}"),
                (Some(saved_base), None) => saved_base,
                (None, Some(id)) if APPEND_RECEIPT_TO_FALLBACK_BASE => format!("{base}/{id}"),
                (None, _) => base,
            }
        } else if ctx.is_eligible_for_signup_destination {
            saved.unwrap_or(base)
        } else {
            base
        };

        match display_mode {
            Some(mode) => format!("{url}?d={}", mode.query_value()),
            None => url,
        }
    }
}

/// Display mode hint carried to the thank-you page as `?d=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Gsuite,
    Concierge,
}

impl DisplayMode {
    pub fn query_value(self) -> &'static str {
        match self {
            Self::Gsuite => "gsuite",
            Self::Concierge => "concierge",
        }
    }
}

/// Everything a rule may consult, precomputed once per resolution.
struct RuleInput<'a> {
    ctx: &'a CheckoutCompletionContext,
    fragment: &'a ReceiptFragment,
    /// Requested feature, already gated on the recognized set
    feature: Option<&'a str>,
    flags: &'a dyn FeatureFlags,
    gsuite: &'a dyn GsuiteCountryCheck,
}

impl RuleInput<'_> {
    fn site_slug(&self) -> Option<&str> {
        self.ctx.site_slug()
    }
}

struct ThankYou {
    base: String,
    display_mode: Option<DisplayMode>,
}

enum Resolution {
    /// Returned verbatim; exempt from signup-destination post-processing
    Final(String),
    /// Thank-you-style destination; post-processing applies
    ThankYou(ThankYou),
}

type Rule = fn(&RuleInput<'_>) -> Option<Resolution>;

/// Ordered rule table. First match wins.
const RULES: &[(&str, Rule)] = &[
    ("root-when-no-site", root_when_no_site),
    ("explicit-redirect", explicit_redirect),
    ("renewal", renewal),
    ("jetpack-plans", jetpack_plans),
    ("feature-thank-you", feature_thank_you),
    ("new-site-domain", new_site_domain),
    ("concierge-nudge", concierge_nudge),
    ("default-thank-you", default_thank_you),
];

fn root_when_no_site(input: &RuleInput<'_>) -> Option<Resolution> {
    match input.site_slug() {
        None => Some(Resolution::Final("/".to_string())),
        Some(_) => None,
    }
}

/// Caller-supplied destinations are honored only when they stay inside the
/// site's admin URL; anything else falls back to the root path. Sites
/// without a configured admin URL trust the caller. An empty string counts
/// as no destination at all.
fn explicit_redirect(input: &RuleInput<'_>) -> Option<Resolution> {
    let redirect_to = input
        .ctx
        .redirect_to
        .as_deref()
        .filter(|url| !url.is_empty())?;

    let destination = match input.ctx.admin_url() {
        Some(admin_url) if redirect_to.starts_with(admin_url) => {
            let join = if redirect_to.contains('?') { '&' } else { '?' };
            format!("{redirect_to}{join}action=edit&plan_upgraded=1")
        }
        Some(_) => "/".to_string(),
        None => redirect_to.to_string(),
    };
    Some(Resolution::Final(destination))
}

fn renewal(input: &RuleInput<'_>) -> Option<Resolution> {
    let cart = input.ctx.cart.as_ref()?;
    let (domain, id) = cart.products.iter().find_map(|p| p.renewal_target())?;
    Some(Resolution::Final(format!("/me/purchases/{domain}/{id}")))
}

/// Self-hosted Jetpack sites land on their plans page; the feature request
/// is ignored on this branch.
fn jetpack_plans(input: &RuleInput<'_>) -> Option<Resolution> {
    if !input.ctx.is_jetpack_not_atomic {
        return None;
    }
    let slug = input.site_slug()?;
    let url = match input.ctx.product.as_deref().filter(|p| !p.is_empty()) {
        Some(product) => format!("/plans/my-plan/{slug}?thank-you=true&product={product}"),
        None => format!("/plans/my-plan/{slug}?thank-you=true&install=all"),
    };
    Some(Resolution::Final(url))
}

fn feature_thank_you(input: &RuleInput<'_>) -> Option<Resolution> {
    let feature = input.feature?;
    let slug = input.site_slug()?;
    let base = match input.fragment.as_path_segment() {
        Some(segment) => format!("/checkout/thank-you/features/{feature}/{slug}/{segment}"),
        None => format!("/checkout/thank-you/features/{feature}/{slug}"),
    };
    Some(Resolution::ThankYou(ThankYou {
        base,
        display_mode: None,
    }))
}

/// A brand-new site that registered a domain during signup gets special
/// treatment, as long as nothing in the transaction failed: a mailbox or
/// concierge purchase sets the display mode, and otherwise eligible
/// countries are detoured to the G Suite upsell.
fn new_site_domain(input: &RuleInput<'_>) -> Option<Resolution> {
    if !input.ctx.is_newly_created_site {
        return None;
    }
    let cart = input.ctx.cart.as_ref()?;
    let domain_item = cart
        .products
        .iter()
        .find(|p| p.is_signup_domain_registration())?;
    if input.ctx.has_failed_purchases() {
        return None;
    }
    let slug = input.site_slug()?;

    if products::cart_has_gsuite(cart) {
        return Some(Resolution::ThankYou(ThankYou {
            base: thank_you_base(input, slug),
            display_mode: Some(DisplayMode::Gsuite),
        }));
    }
    if products::cart_has_concierge_session(cart) {
        return Some(Resolution::ThankYou(ThankYou {
            base: thank_you_base(input, slug),
            display_mode: Some(DisplayMode::Concierge),
        }));
    }
    if input.gsuite.is_eligible_country() {
        if let (Some(domain), Some(id)) = (domain_item.meta.as_deref(), input.fragment.raw_id())
        {
            return Some(Resolution::Final(format!(
                "/checkout/{slug}/with-gsuite/{domain}/{id}"
            )));
        }
    }

    // Matching this rule still suppresses the upsell nudges below.
    Some(Resolution::ThankYou(ThankYou {
        base: thank_you_base(input, slug),
        display_mode: None,
    }))
}

/// Upsell nudges shown instead of the thank-you page for qualifying plan
/// tiers, unless the user just came from the nudge itself.
fn concierge_nudge(input: &RuleInput<'_>) -> Option<Resolution> {
    if !input.flags.is_enabled(CONCIERGE_UPSELL_FLAG) {
        return None;
    }
    let cart = input.ctx.cart.as_ref()?;
    if products::cart_has_concierge_session(cart) || products::cart_has_jetpack_plan(cart) {
        return None;
    }
    let slug = input.site_slug()?;
    let id = input.fragment.raw_id()?;

    let url = if products::cart_has_personal_plan(cart) {
        format!("/checkout/{slug}/offer-plan-upgrade/premium/{id}")
    } else if products::cart_has_blogger_plan(cart) || products::cart_has_premium_plan(cart) {
        format!("/checkout/offer-quickstart-session/{id}/{slug}")
    } else {
        return None;
    };

    if input.ctx.previous_route.as_deref() == Some(url.as_str()) {
        return None;
    }
    Some(Resolution::Final(url))
}

fn default_thank_you(input: &RuleInput<'_>) -> Option<Resolution> {
    let slug = input.site_slug()?;
    let display_mode = input
        .ctx
        .cart
        .as_ref()
        .filter(|cart| products::cart_has_concierge_session(cart))
        .map(|_| DisplayMode::Concierge);
    Some(Resolution::ThankYou(ThankYou {
        base: thank_you_base(input, slug),
        display_mode,
    }))
}

fn thank_you_base(input: &RuleInput<'_>, slug: &str) -> String {
    match input.fragment.as_path_segment() {
        Some(segment) => format!("/checkout/thank-you/{slug}/{segment}"),
        None => format!("/checkout/thank-you/{slug}"),
    }
}
