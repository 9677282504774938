//! Intent responses built on top of the composer primitives.
//!
//! Each method re-derives entitlement from the catalog snapshot passed in;
//! nothing is remembered between turns.

use tracing::debug;

use premium_hello_catalog::{speakable_list, ProductCatalog, ReferenceName};
use premium_hello_core::SkillResult;

use crate::composer::ResponseComposer;
use crate::phrases;
use crate::response::{join_speech, ResponseOutcome};
use crate::tier::{resolve_tier, AccessTier};

impl ResponseComposer<'_> {
    /// `fragment` followed by the "another greeting?" question, which is
    /// also the reprompt.
    fn then_another(&self, fragment: &str) -> ResponseOutcome {
        let another = self.tr(phrases::GREETINGS_ANOTHER, &[]);
        ResponseOutcome::speak(join_speech([fragment, another.as_str()])).with_reprompt(another)
    }

    /// Products still for sale to this caller.
    pub fn compose_what_can_i_buy(&self, catalog: &ProductCatalog) -> ResponseOutcome {
        let offerable = catalog.purchasable_subset();
        debug!(count = offerable.len(), "purchasable products");

        let speech = if offerable.is_empty() {
            self.tr(phrases::PRODUCTS_NO_MORE_FOR_PURCHASE, &[])
        } else {
            self.tr(phrases::PRODUCTS_TO_PURCHASE, &[&speakable_list(&offerable)])
        };
        ResponseOutcome::speak(speech).with_reprompt(self.tr(phrases::PRODUCTS_REPROMPT, &[]))
    }

    pub fn compose_purchase_history(&self, catalog: &ProductCatalog) -> ResponseOutcome {
        let owned = catalog.entitled_subset();
        let another = self.tr(phrases::GREETINGS_ANOTHER, &[]);

        if owned.is_empty() {
            let reprompt = self.tr(phrases::PURCHASE_NONE_REPROMPT, &[]);
            return ResponseOutcome::speak(self.tr(phrases::PURCHASE_NONE, &[]))
                .with_reprompt(join_speech([reprompt.as_str(), another.as_str()]));
        }

        let list = speakable_list(&owned);
        let history = self.tr(phrases::PURCHASE_HISTORY, &[&list]);
        let reminder = self.tr(phrases::PURCHASE_HISTORY_REPROMPT, &[&list]);
        ResponseOutcome::speak(join_speech([history.as_str(), another.as_str()]))
            .with_reprompt(join_speech([reminder.as_str(), another.as_str()]))
    }

    /// Describe one product: a confirmation when already owned, otherwise an
    /// upsell.
    pub fn compose_tell_me_more(&self, catalog: &ProductCatalog, reference: &ReferenceName) -> SkillResult<ResponseOutcome> {
        let Some(product) = catalog.find_by_reference_name(reference) else {
            return Ok(self.compose_not_offered(reference));
        };

        if product.is_entitled() {
            let fragment = match reference {
                ReferenceName::PremiumSubscription => {
                    self.tr(phrases::PREMIUM_SUBSCRIPTION_PURCHASED, &[product.summary()])
                }
                _ => self.tr(phrases::GREETINGS_PACK_PURCHASED, &[]),
            };
            return Ok(self.then_another(&fragment));
        }

        let ok = self.tr(phrases::OK, &[]);
        self.compose_upsell(&ok, Some(product))
    }

    /// Shared entitlement answer for the Greetings Pack intents; `None` when
    /// the caller owns neither product.
    fn already_has_special_greetings(&self, catalog: &ProductCatalog) -> Option<ResponseOutcome> {
        match resolve_tier(catalog) {
            AccessTier::Premium => {
                let fragment = self.tr(phrases::GREETINGS_PACK_PREMIUM_SUBSCRIPTION_PURCHASED, &[]);
                Some(self.then_another(&fragment))
            }
            AccessTier::GreetingsPackOnly => {
                let fragment = self.tr(phrases::GREETINGS_PACK_PURCHASED, &[]);
                Some(self.then_another(&fragment))
            }
            AccessTier::None => None,
        }
    }

    pub fn compose_buy_greetings_pack(&self, catalog: &ProductCatalog) -> SkillResult<ResponseOutcome> {
        if let Some(owned) = self.already_has_special_greetings(catalog) {
            return Ok(owned);
        }
        match catalog.find_by_reference_name(&ReferenceName::GreetingsPack) {
            Some(pack) => self.compose_buy_offer(Some(pack)),
            None => Ok(self.compose_not_offered(&ReferenceName::GreetingsPack)),
        }
    }

    pub fn compose_special_greetings_request(&self, catalog: &ProductCatalog) -> SkillResult<ResponseOutcome> {
        if let Some(owned) = self.already_has_special_greetings(catalog) {
            return Ok(owned);
        }
        match catalog.find_by_reference_name(&ReferenceName::GreetingsPack) {
            Some(pack) => {
                let need = self.tr(phrases::GREETINGS_PACK_UPSELL, &[]);
                self.compose_upsell(&need, Some(pack))
            }
            None => Ok(self.compose_not_offered(&ReferenceName::GreetingsPack)),
        }
    }

    pub fn compose_buy_premium(&self, catalog: &ProductCatalog) -> SkillResult<ResponseOutcome> {
        match catalog.find_by_reference_name(&ReferenceName::PremiumSubscription) {
            Some(premium) => self.compose_buy_offer(Some(premium)),
            None => Ok(self.compose_not_offered(&ReferenceName::PremiumSubscription)),
        }
    }

    /// Refund the Greetings Pack or cancel the Premium Subscription.
    pub fn compose_cancel_request(&self, catalog: &ProductCatalog, reference: &ReferenceName) -> SkillResult<ResponseOutcome> {
        match catalog.find_by_reference_name(reference) {
            Some(product) => self.compose_cancel_offer(Some(product)),
            None => Ok(self.compose_not_offered(reference)),
        }
    }
}
