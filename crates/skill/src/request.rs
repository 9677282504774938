//! Incoming request model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use premium_hello_core::{Locale, ProductId};

use crate::purchase::{PurchaseEvent, PurchaseOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IntentName {
    Yes,
    SimpleHello,
    No,
    WhatCanIBuy,
    TellMeMoreAboutGreetingsPack,
    TellMeMoreAboutPremiumSubscription,
    BuyGreetingsPack,
    GetSpecialGreetings,
    BuyPremiumSubscription,
    PurchaseHistory,
    RefundGreetingsPack,
    CancelPremiumSubscription,
    Help,
    Cancel,
    Stop,
    Unknown(String),
}

impl IntentName {
    pub fn as_str(&self) -> &str {
        match self {
            IntentName::Yes => "AMAZON.YesIntent",
            IntentName::SimpleHello => "SimpleHelloIntent",
            IntentName::No => "AMAZON.NoIntent",
            IntentName::WhatCanIBuy => "WhatCanIBuyIntent",
            IntentName::TellMeMoreAboutGreetingsPack => "TellMeMoreAboutGreetingsPackIntent",
            IntentName::TellMeMoreAboutPremiumSubscription => "TellMeMoreAboutPremiumSubscription",
            IntentName::BuyGreetingsPack => "BuyGreetingsPackIntent",
            IntentName::GetSpecialGreetings => "GetSpecialGreetingsIntent",
            IntentName::BuyPremiumSubscription => "BuyPremiumSubscriptionIntent",
            IntentName::PurchaseHistory => "PurchaseHistoryIntent",
            IntentName::RefundGreetingsPack => "RefundGreetingsPackIntent",
            IntentName::CancelPremiumSubscription => "CancelPremiumSubscriptionIntent",
            IntentName::Help => "AMAZON.HelpIntent",
            IntentName::Cancel => "AMAZON.CancelIntent",
            IntentName::Stop => "AMAZON.StopIntent",
            IntentName::Unknown(name) => name,
        }
    }
}

impl From<String> for IntentName {
    fn from(value: String) -> Self {
        match value.as_str() {
            "AMAZON.YesIntent" => IntentName::Yes,
            "SimpleHelloIntent" => IntentName::SimpleHello,
            "AMAZON.NoIntent" => IntentName::No,
            "WhatCanIBuyIntent" => IntentName::WhatCanIBuy,
            "TellMeMoreAboutGreetingsPackIntent" => IntentName::TellMeMoreAboutGreetingsPack,
            // Registered both with and without the suffix in the interaction model.
            "TellMeMoreAboutPremiumSubscription" | "TellMeMoreAboutPremiumSubscriptionIntent" => {
                IntentName::TellMeMoreAboutPremiumSubscription
            }
            "BuyGreetingsPackIntent" => IntentName::BuyGreetingsPack,
            "GetSpecialGreetingsIntent" => IntentName::GetSpecialGreetings,
            "BuyPremiumSubscriptionIntent" => IntentName::BuyPremiumSubscription,
            "PurchaseHistoryIntent" => IntentName::PurchaseHistory,
            "RefundGreetingsPackIntent" => IntentName::RefundGreetingsPack,
            "CancelPremiumSubscriptionIntent" => IntentName::CancelPremiumSubscription,
            "AMAZON.HelpIntent" => IntentName::Help,
            "AMAZON.CancelIntent" => IntentName::Cancel,
            "AMAZON.StopIntent" => IntentName::Stop,
            _ => IntentName::Unknown(value),
        }
    }
}

impl From<&str> for IntentName {
    fn from(value: &str) -> Self {
        IntentName::from(value.to_string())
    }
}

impl From<IntentName> for String {
    fn from(value: IntentName) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub name: IntentName,
}

/// Which purchase flow a `Connections.Response` belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionName {
    Buy,
    Upsell,
    Cancel,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPayload {
    #[serde(default)]
    pub purchase_result: Option<String>,
    #[serde(default)]
    pub product_id: Option<ProductId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SkillRequest {
    #[serde(rename = "LaunchRequest")]
    Launch,

    #[serde(rename = "IntentRequest")]
    Intent { intent: Intent },

    #[serde(rename = "Connections.Response")]
    PurchaseResponse {
        name: ConnectionName,
        status: ConnectionStatus,
        #[serde(default)]
        payload: ConnectionPayload,
    },

    #[serde(rename = "SessionEndedRequest")]
    SessionEnded {
        #[serde(default)]
        reason: Option<String>,
    },
}

impl SkillRequest {
    pub fn intent(name: impl Into<IntentName>) -> Self {
        SkillRequest::Intent {
            intent: Intent { name: name.into() },
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &str {
        match self {
            SkillRequest::Launch => "LaunchRequest",
            SkillRequest::Intent { intent } => intent.name.as_str(),
            SkillRequest::PurchaseResponse { .. } => "Connections.Response",
            SkillRequest::SessionEnded { .. } => "SessionEndedRequest",
        }
    }
}

/// A purchase-flow response flattened into the handler's event.
pub fn purchase_event(status: &ConnectionStatus, payload: &ConnectionPayload) -> PurchaseEvent {
    PurchaseEvent {
        status_code: status.code.clone(),
        status_message: status.message.clone(),
        outcome: PurchaseOutcome::from(payload.purchase_result.clone().unwrap_or_default()),
        product_id: payload.product_id.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub locale: Locale,
    pub request: SkillRequest,
}

impl RequestEnvelope {
    pub fn new(request_id: impl Into<String>, locale: Locale, request: SkillRequest) -> Self {
        Self {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            locale,
            request,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
