//! Purchase and cancellation outcomes replayed by the platform.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use premium_hello_catalog::{ProductCatalog, ReferenceName};
use premium_hello_core::{Locale, ProductId};

use crate::composer::{ResponseComposer, Trigger};
use crate::phrases;
use crate::response::ResponseOutcome;

/// Status code of a completed purchase flow.
pub const STATUS_OK: &str = "200";

/// Placeholder spoken when the purchased product cannot be named.
const UNNAMED_PRODUCT: &str = "product";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PurchaseOutcome {
    Accepted,
    AlreadyPurchased,
    Declined,
    NotEntitled,
    /// Any result the platform adds later.
    Other(String),
}

impl PurchaseOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            PurchaseOutcome::Accepted => "ACCEPTED",
            PurchaseOutcome::AlreadyPurchased => "ALREADY_PURCHASED",
            PurchaseOutcome::Declined => "DECLINED",
            PurchaseOutcome::NotEntitled => "NOT_ENTITLED",
            PurchaseOutcome::Other(other) => other,
        }
    }
}

impl From<String> for PurchaseOutcome {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ACCEPTED" => PurchaseOutcome::Accepted,
            "ALREADY_PURCHASED" => PurchaseOutcome::AlreadyPurchased,
            "DECLINED" => PurchaseOutcome::Declined,
            "NOT_ENTITLED" => PurchaseOutcome::NotEntitled,
            _ => PurchaseOutcome::Other(value),
        }
    }
}

impl From<&str> for PurchaseOutcome {
    fn from(value: &str) -> Self {
        PurchaseOutcome::from(value.to_string())
    }
}

impl From<PurchaseOutcome> for String {
    fn from(value: PurchaseOutcome) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseEvent {
    pub status_code: String,
    #[serde(default)]
    pub status_message: String,
    pub outcome: PurchaseOutcome,
    #[serde(default)]
    pub product_id: Option<ProductId>,
}

impl PurchaseEvent {
    pub fn new(status_code: impl Into<String>, outcome: impl Into<PurchaseOutcome>) -> Self {
        Self {
            status_code: status_code.into(),
            status_message: String::new(),
            outcome: outcome.into(),
            product_id: None,
        }
    }

    pub fn with_product(mut self, product_id: impl Into<ProductId>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.status_message = message.into();
        self
    }

    pub fn succeeded(&self) -> bool {
        self.status_code == STATUS_OK
    }
}

/// Turns purchase-flow results into the next response.
pub struct PurchaseOutcomeHandler<'c, 'a> {
    composer: &'c ResponseComposer<'a>,
}

impl<'c, 'a> PurchaseOutcomeHandler<'c, 'a> {
    pub fn new(composer: &'c ResponseComposer<'a>) -> Self {
        Self { composer }
    }

    /// Confirmation fragment for a successful (status 200) buy or upsell.
    pub fn fragment(&self, event: &PurchaseEvent, catalog: &ProductCatalog) -> String {
        let product = event.product_id.as_ref().and_then(|id| catalog.find_by_id(id));

        match &event.outcome {
            PurchaseOutcome::Accepted | PurchaseOutcome::AlreadyPurchased => {
                let key = match product.map(|p| p.reference_name()) {
                    Some(ReferenceName::GreetingsPack) => phrases::BUY_ACCEPTED_GREETINGS_PACK,
                    Some(ReferenceName::PremiumSubscription) => phrases::BUY_ACCEPTED_PREMIUM_SUBSCRIPTION,
                    other => {
                        warn!(
                            product_id = ?event.product_id,
                            reference = ?other,
                            "purchase accepted for an undefined product"
                        );
                        phrases::BUY_ACCEPTED_UNDEFINED
                    }
                };
                let name = product.map(|p| p.display_name()).unwrap_or(UNNAMED_PRODUCT);
                self.composer.tr(key, &[name])
            }
            PurchaseOutcome::Declined => self.composer.tr(phrases::BUY_DECLINED, &[]),
            PurchaseOutcome::NotEntitled | PurchaseOutcome::Other(_) => {
                let name = product.map(|p| p.display_name()).unwrap_or(UNNAMED_PRODUCT);
                self.composer.tr(phrases::BUY_ERROR, &[name])
            }
        }
    }

    /// Buy/Upsell result: confirmation fragment then a greeting for the
    /// (possibly new) tier. Never upsells.
    pub fn handle_outcome(&self, event: &PurchaseEvent, catalog: &ProductCatalog, caller_locale: &Locale) -> ResponseOutcome {
        if !event.succeeded() {
            warn!(
                status = %event.status_code,
                message = %event.status_message,
                "purchase flow failed"
            );
            return self.composer.compose_purchase_error();
        }

        info!(outcome = event.outcome.as_str(), product_id = ?event.product_id, "purchase outcome");
        let fragment = self.fragment(event, catalog);
        self.composer
            .compose_greeting_response(catalog, caller_locale, &fragment, Trigger::PurchaseOutcome)
    }

    /// Cancel/refund result. The platform has already spoken the
    /// confirmation, so only the follow-up question is added.
    pub fn handle_cancel_outcome(&self, event: &PurchaseEvent) -> ResponseOutcome {
        if !event.succeeded() {
            warn!(
                status = %event.status_code,
                message = %event.status_message,
                "cancel flow failed"
            );
            return self.composer.compose_purchase_error();
        }

        info!(outcome = event.outcome.as_str(), product_id = ?event.product_id, "cancel outcome");
        let another = self.composer.tr(phrases::GREETINGS_ANOTHER, &[]);
        ResponseOutcome::speak(another.clone()).with_reprompt(another)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use premium_hello_catalog::{EntitlementStatus, Product};
    use premium_hello_core::FixedRandom;
    use premium_hello_i18n::PhraseBook;

    fn en_us() -> Locale {
        Locale::parse("en-US").unwrap()
    }

    fn catalog_after_pack_purchase() -> ProductCatalog {
        ProductCatalog::new(vec![
            Product::new("pack-id", ReferenceName::GreetingsPack, "Greetings Pack", "")
                .with_entitlement(EntitlementStatus::Entitled),
            Product::new("premium-id", ReferenceName::PremiumSubscription, "Premium Subscription", ""),
        ])
        .unwrap()
    }

    fn handle<R>(f: impl FnOnce(&PurchaseOutcomeHandler<'_, '_>) -> R) -> R {
        let book = PhraseBook::embedded().unwrap();
        let random = FixedRandom::first_heads();
        let t = book.localize(&en_us(), &random);
        let composer = ResponseComposer::new(&t, &random);
        f(&PurchaseOutcomeHandler::new(&composer))
    }

    #[test]
    fn outcome_parses_known_and_unknown_values() {
        assert_eq!(PurchaseOutcome::from("ACCEPTED"), PurchaseOutcome::Accepted);
        assert_eq!(PurchaseOutcome::from("ALREADY_PURCHASED"), PurchaseOutcome::AlreadyPurchased);
        assert_eq!(PurchaseOutcome::from("PENDING"), PurchaseOutcome::Other("PENDING".into()));
        assert_eq!(PurchaseOutcome::from("PENDING").as_str(), "PENDING");
    }

    #[test]
    fn accepted_pack_names_the_product_and_greets() {
        let catalog = catalog_after_pack_purchase();
        let event = PurchaseEvent::new("200", "ACCEPTED").with_product("pack-id");
        let outcome = handle(|h| h.handle_outcome(&event, &catalog, &en_us()));

        assert!(outcome.speech.starts_with(
            "With the Greetings Pack, I can now say hello in a variety of languages. Here's your special greeting:"
        ));
        assert_eq!(outcome.directive, None);
    }

    #[test]
    fn declined_with_no_tier_never_upsells() {
        let catalog = ProductCatalog::new(vec![Product::new("pack-id", ReferenceName::GreetingsPack, "Greetings Pack", "")]).unwrap();
        let event = PurchaseEvent::new("200", "DECLINED").with_product("pack-id");
        let outcome = handle(|h| h.handle_outcome(&event, &catalog, &en_us()));

        assert!(outcome.speech.starts_with("No Problem. Here's your simple greeting:"));
        assert_eq!(outcome.directive, None);
    }

    #[test]
    fn unknown_product_uses_undefined_phrase() {
        let catalog = catalog_after_pack_purchase();
        let event = PurchaseEvent::new("200", "ACCEPTED").with_product("nope");
        let fragment = handle(|h| h.fragment(&event, &catalog));
        assert_eq!(fragment, "Sorry, that's not a valid product");
    }

    #[test]
    fn unexpected_result_mentions_the_product() {
        let catalog = catalog_after_pack_purchase();
        let named = PurchaseEvent::new("200", "PENDING").with_product("premium-id");
        let unnamed = PurchaseEvent::new("200", "PENDING");
        assert_eq!(
            handle(|h| h.fragment(&named, &catalog)),
            "Something unexpected happened, but thanks for your interest in the Premium Subscription."
        );
        assert_eq!(
            handle(|h| h.fragment(&unnamed, &catalog)),
            "Something unexpected happened, but thanks for your interest in the product."
        );
    }

    #[test]
    fn failed_flow_gives_purchase_error() {
        let event = PurchaseEvent::new("500", "ACCEPTED").with_message("internal");
        let outcome = handle(|h| h.handle_outcome(&event, &catalog_after_pack_purchase(), &en_us()));
        assert_eq!(
            outcome.speech,
            "There was an error handling your purchase request. Please try again or contact us for help."
        );
        assert_eq!(outcome.directive, None);
        assert_eq!(outcome.reprompt, None);
    }

    #[test]
    fn cancel_outcome_asks_for_another_greeting() {
        for result in ["ACCEPTED", "DECLINED", "NOT_ENTITLED", "SOMETHING_ELSE"] {
            let outcome = handle(|h| h.handle_cancel_outcome(&PurchaseEvent::new("200", result)));
            assert_eq!(outcome.speech, "Would you like another greeting?");
            assert_eq!(outcome.reprompt.as_deref(), Some("Would you like another greeting?"));
        }
    }

    #[test]
    fn failed_cancel_gives_purchase_error() {
        let outcome = handle(|h| h.handle_cancel_outcome(&PurchaseEvent::new("404", "ACCEPTED")));
        assert!(outcome.speech.starts_with("There was an error handling your purchase request."));
    }
}
