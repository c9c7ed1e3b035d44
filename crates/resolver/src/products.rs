//! Product-slug classification tables.
//!
//! Destination rules care about a handful of product families (mail,
//! concierge sessions, plan tiers). The well-known slugs live here as
//! explicit tables so a new billing slug is a one-line addition.

use checkout_router_types::Cart;

pub const GSUITE_SLUGS: &[&str] = &["gapps", "gapps_extra_license", "gapps_unlimited"];

pub const CONCIERGE_SESSION_SLUG: &str = "concierge-session";

const JETPACK_PLAN_PREFIX: &str = "jetpack_";

pub const PERSONAL_PLAN_SLUGS: &[&str] = &[
    "personal-bundle",
    "personal-bundle-2y",
    "personal-bundle-monthly",
];

pub const BLOGGER_PLAN_SLUGS: &[&str] = &["blogger-bundle", "blogger-bundle-2y"];

pub const PREMIUM_PLAN_SLUGS: &[&str] = &[
    "value_bundle",
    "value_bundle-2y",
    "value_bundle-monthly",
];

pub fn is_gsuite(slug: &str) -> bool {
    GSUITE_SLUGS.contains(&slug)
}

pub fn is_concierge_session(slug: &str) -> bool {
    slug == CONCIERGE_SESSION_SLUG
}

pub fn is_jetpack_plan(slug: &str) -> bool {
    slug.starts_with(JETPACK_PLAN_PREFIX)
}

pub fn is_personal_plan(slug: &str) -> bool {
    PERSONAL_PLAN_SLUGS.contains(&slug)
}

pub fn is_blogger_plan(slug: &str) -> bool {
    BLOGGER_PLAN_SLUGS.contains(&slug)
}

pub fn is_premium_plan(slug: &str) -> bool {
    PREMIUM_PLAN_SLUGS.contains(&slug)
}

pub fn cart_has_gsuite(cart: &Cart) -> bool {
    cart.has_slug(is_gsuite)
}

pub fn cart_has_concierge_session(cart: &Cart) -> bool {
    cart.has_slug(is_concierge_session)
}

pub fn cart_has_jetpack_plan(cart: &Cart) -> bool {
    cart.has_slug(is_jetpack_plan)
}

pub fn cart_has_personal_plan(cart: &Cart) -> bool {
    cart.has_slug(is_personal_plan)
}

pub fn cart_has_blogger_plan(cart: &Cart) -> bool {
    cart.has_slug(is_blogger_plan)
}

pub fn cart_has_premium_plan(cart: &Cart) -> bool {
    cart.has_slug(is_premium_plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_router_types::CartProduct;

    fn cart_with(slugs: &[&str]) -> Cart {
        Cart {
            products: slugs
                .iter()
                .map(|slug| CartProduct {
                    product_slug: Some(slug.to_string()),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn plan_tier_classification() {
        assert!(is_personal_plan("personal-bundle"));
        assert!(is_blogger_plan("blogger-bundle"));
        assert!(is_premium_plan("value_bundle"));
        assert!(!is_premium_plan("personal-bundle"));
    }

    #[test]
    fn jetpack_plans_match_by_prefix() {
        assert!(is_jetpack_plan("jetpack_premium"));
        assert!(is_jetpack_plan("jetpack_backup_daily"));
        assert!(!is_jetpack_plan("value_bundle"));
    }

    #[test]
    fn cart_level_lookups() {
        let cart = cart_with(&["gapps", "some_domain"]);
        assert!(cart_has_gsuite(&cart));
        assert!(!cart_has_concierge_session(&cart));

        let cart = cart_with(&["concierge-session", "value_bundle"]);
        assert!(cart_has_concierge_session(&cart));
        assert!(cart_has_premium_plan(&cart));
    }

    #[test]
    fn products_without_slug_never_match() {
        let cart = Cart {
            products: vec![CartProduct::default()],
            ..Default::default()
        };
        assert!(!cart_has_gsuite(&cart));
        assert!(!cart_has_jetpack_plan(&cart));
    }
}
