//! Capability seams for the resolver's external collaborators.
//!
//! The resolver itself is a pure function over the checkout completion
//! context; everything it needs from the outside world comes in through
//! these traits. Each trait has a blanket impl for plain closures so tests
//! and small callers can inject behavior without defining a type.

/// Feature-flag evaluation service.
pub trait FeatureFlags: Send + Sync {
    fn is_enabled(&self, flag: &str) -> bool;
}

impl<F> FeatureFlags for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_enabled(&self, flag: &str) -> bool {
        self(flag)
    }
}

/// All flags off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledFlags;

impl FeatureFlags for DisabledFlags {
    fn is_enabled(&self, _flag: &str) -> bool {
        false
    }
}

/// Country-level eligibility check for the G Suite upsell.
pub trait GsuiteCountryCheck: Send + Sync {
    fn is_eligible_country(&self) -> bool;
}

impl<F> GsuiteCountryCheck for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_eligible_country(&self) -> bool {
        self()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IneligibleCountry;

impl GsuiteCountryCheck for IneligibleCountry {
    fn is_eligible_country(&self) -> bool {
        false
    }
}

/// Cookie-backed store for a previously saved signup destination.
///
/// Consulted at most once per resolution, and only for thank-you-style
/// destinations.
pub trait SignupDestinationStore: Send + Sync {
    fn saved_destination(&self) -> Option<String>;
}

impl<F> SignupDestinationStore for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn saved_destination(&self) -> Option<String> {
        self()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoSavedDestination;

impl SignupDestinationStore for NoSavedDestination {
    fn saved_destination(&self) -> Option<String> {
        None
    }
}
