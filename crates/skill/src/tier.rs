//! Access tier resolution.
//!
//! The tier is derived from the catalog snapshot on every request and never
//! stored: entitlement can change between turns.

use serde::Serialize;

use premium_hello_catalog::{is_entitled, ProductCatalog, ReferenceName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessTier {
    /// Premium Subscription entitled (subsumes the Greetings Pack).
    Premium,
    /// Greetings Pack entitled, no Premium Subscription.
    GreetingsPackOnly,
    None,
}

/// Premium first, then Greetings Pack, then nothing.
///
/// Every response path that branches on entitlement goes through here so
/// they all agree on precedence.
pub fn resolve_tier(catalog: &ProductCatalog) -> AccessTier {
    if is_entitled(catalog.find_by_reference_name(&ReferenceName::PremiumSubscription)) {
        AccessTier::Premium
    } else if is_entitled(catalog.find_by_reference_name(&ReferenceName::GreetingsPack)) {
        AccessTier::GreetingsPackOnly
    } else {
        AccessTier::None
    }
}
