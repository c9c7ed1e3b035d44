//! Adversarial tests for the caller-supplied redirect destination
//!
//! The `redirect_to` field arrives from the browser and must never send the
//! user off-site unless the destination sits inside the site's own admin
//! URL. These tests throw hostile values at the resolver and check that
//! every one of them degrades to the root path.

use checkout_router::{CheckoutCompletionContext, Resolver, Site};

const ADMIN_URL: &str = "https://my.site/wp-admin/";

fn resolve_with_redirect(redirect_to: &str) -> String {
    let ctx = CheckoutCompletionContext::builder()
        .site_slug("foo.bar")
        .site(Site::with_admin_url(ADMIN_URL))
        .redirect_to(redirect_to)
        .build();
    Resolver::default().resolve(&ctx)
}

#[test]
fn off_site_absolute_urls_are_rejected() {
    for hostile in [
        "https://evil.example/wp-admin/",
        "https://my.site.evil.example/wp-admin/post.php",
        "http://my.site/wp-admin/post.php", // downgraded scheme
        "//evil.example/phishing",
        "javascript:alert(1)",
    ] {
        assert_eq!(resolve_with_redirect(hostile), "/", "accepted {hostile}");
    }
}

#[test]
fn prefix_lookalikes_are_rejected() {
    // Same registrable domain, wrong path prefix
    assert_eq!(resolve_with_redirect("https://my.site/wp-admin2/"), "/");
    assert_eq!(resolve_with_redirect("https://my.site/other/wp-admin/"), "/");
}

#[test]
fn admin_destinations_gain_edit_params_and_nothing_else() {
    let url = resolve_with_redirect("https://my.site/wp-admin/post.php?post=515");
    assert_eq!(
        url,
        "https://my.site/wp-admin/post.php?post=515&action=edit&plan_upgraded=1"
    );
    assert!(url.starts_with(ADMIN_URL));
}

#[test]
fn admin_destination_without_query_gets_question_mark_join() {
    let url = resolve_with_redirect("https://my.site/wp-admin/edit.php");
    assert_eq!(
        url,
        "https://my.site/wp-admin/edit.php?action=edit&plan_upgraded=1"
    );
}

#[test]
fn empty_redirect_counts_as_no_redirect() {
    // An empty destination falls through to the thank-you rules instead of
    // short-circuiting, with or without a configured admin URL.
    let ctx = CheckoutCompletionContext::builder()
        .site_slug("foo.bar")
        .site(Site::with_admin_url(ADMIN_URL))
        .redirect_to("")
        .purchase_id("1234abcd")
        .build();
    assert_eq!(
        Resolver::default().resolve(&ctx),
        "/checkout/thank-you/foo.bar/1234abcd"
    );

    let ctx = CheckoutCompletionContext::builder()
        .site_slug("foo.bar")
        .redirect_to("")
        .purchase_id("1234abcd")
        .build();
    assert_eq!(
        Resolver::default().resolve(&ctx),
        "/checkout/thank-you/foo.bar/1234abcd"
    );
}

#[test]
fn trusted_redirect_only_without_admin_url() {
    // Without a configured admin URL the caller is trusted; the renewal and
    // receipt machinery must still not interfere.
    let ctx = CheckoutCompletionContext::builder()
        .site_slug("foo.bar")
        .redirect_to("/foo/bar")
        .purchase_id("1234abcd")
        .build();
    assert_eq!(Resolver::default().resolve(&ctx), "/foo/bar");
}
