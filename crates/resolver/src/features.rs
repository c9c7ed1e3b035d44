//! Recognized post-purchase feature keys.

/// Feature keys the thank-you page knows how to highlight.
///
/// A requested feature outside this set is treated as if no feature was
/// requested at all.
pub const RECOGNIZED_FEATURES: &[&str] = &[
    "all-free-features",
    "all-personal-features",
    "all-premium-features",
    "advanced-seo",
    "custom-domain",
    "google-analytics",
    "google-my-business",
    "no-ads",
    "simple-payments",
    "upload-plugins",
    "upload-themes",
    "video-upload",
];

pub fn is_recognized_feature(key: &str) -> bool {
    RECOGNIZED_FEATURES.contains(&key)
}
