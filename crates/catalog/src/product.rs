use serde::{Deserialize, Serialize};

use premium_hello_core::ProductId;

/// Reference name the skill uses to address a product independently of its
/// marketplace-specific id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReferenceName {
    GreetingsPack,
    PremiumSubscription,
    /// Any reference name this skill does not know about (raw value kept).
    Unknown(String),
}

impl ReferenceName {
    pub const GREETINGS_PACK: &'static str = "Greetings_Pack";
    pub const PREMIUM_SUBSCRIPTION: &'static str = "Premium_Subscription";

    pub fn as_str(&self) -> &str {
        match self {
            ReferenceName::GreetingsPack => Self::GREETINGS_PACK,
            ReferenceName::PremiumSubscription => Self::PREMIUM_SUBSCRIPTION,
            ReferenceName::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ReferenceName::Unknown(_))
    }
}

impl From<&str> for ReferenceName {
    fn from(value: &str) -> Self {
        match value {
            Self::GREETINGS_PACK => ReferenceName::GreetingsPack,
            Self::PREMIUM_SUBSCRIPTION => ReferenceName::PremiumSubscription,
            other => ReferenceName::Unknown(other.to_string()),
        }
    }
}

impl From<String> for ReferenceName {
    fn from(value: String) -> Self {
        ReferenceName::from(value.as_str())
    }
}

impl From<ReferenceName> for String {
    fn from(value: ReferenceName) -> Self {
        value.as_str().to_string()
    }
}

impl core::fmt::Display for ReferenceName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the current user already owns the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntitlementStatus {
    Entitled,
    NotEntitled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Purchasability {
    Purchasable,
    NotPurchasable,
}

/// One in-skill product as reported by the monetization backend.
///
/// Immutable snapshot for a single request; entitlement can change between
/// turns, so products are never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    product_id: ProductId,
    reference_name: ReferenceName,
    #[serde(rename = "name")]
    display_name: String,
    #[serde(default)]
    summary: String,
    #[serde(rename = "entitled")]
    entitlement: EntitlementStatus,
    purchasable: Purchasability,
}

impl Product {
    /// A purchasable product the user does not own yet.
    pub fn new(
        product_id: impl Into<ProductId>,
        reference_name: impl Into<ReferenceName>,
        display_name: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            reference_name: reference_name.into(),
            display_name: display_name.into(),
            summary: summary.into(),
            entitlement: EntitlementStatus::NotEntitled,
            purchasable: Purchasability::Purchasable,
        }
    }

    pub fn with_entitlement(mut self, entitlement: EntitlementStatus) -> Self {
        self.entitlement = entitlement;
        self
    }

    pub fn with_purchasability(mut self, purchasable: Purchasability) -> Self {
        self.purchasable = purchasable;
        self
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn reference_name(&self) -> &ReferenceName {
        &self.reference_name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn entitlement(&self) -> EntitlementStatus {
        self.entitlement
    }

    pub fn purchasable(&self) -> Purchasability {
        self.purchasable
    }

    pub fn is_entitled(&self) -> bool {
        self.entitlement == EntitlementStatus::Entitled
    }

    /// Can be offered for purchase right now (not owned and purchasable).
    pub fn is_offerable(&self) -> bool {
        self.entitlement == EntitlementStatus::NotEntitled
            && self.purchasable == Purchasability::Purchasable
    }
}
