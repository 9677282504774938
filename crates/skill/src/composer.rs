//! Response composition.
//!
//! A composition runs to completion over one catalog snapshot:
//!
//! ```text
//! AwaitingTierResolution
//!   ├─ Premium           → ComposingPremiumGreeting → Done
//!   ├─ GreetingsPackOnly → ComposingPackGreeting    → Done
//!   └─ None              → ComposingSimpleGreeting  → DecidingUpsell
//!                              ├─ heads, intent, pack offered → EmittingUpsellDirective → Done
//!                              └─ otherwise                   → Done
//! buy entry point        → EmittingBuyDirective → Done
//! ```

use tracing::{debug, warn};

use premium_hello_catalog::{Product, ProductCatalog, ReferenceName};
use premium_hello_core::{Locale, RandomSource, SkillError, SkillResult};
use premium_hello_i18n::Translator;

use crate::greeting::{render_localized, render_voiced, select_special_greeting};
use crate::phrases;
use crate::response::{join_sentences, join_speech, Directive, DirectiveKind, ResponseOutcome};
use crate::tier::{resolve_tier, AccessTier};

/// What started the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A user intent.
    Intent,
    /// A purchase or cancel outcome replayed by the platform; has no
    /// originating intent and must never trigger an upsell.
    PurchaseOutcome,
}

impl Trigger {
    pub fn has_originating_intent(self) -> bool {
        matches!(self, Trigger::Intent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionState {
    AwaitingTierResolution,
    ComposingPremiumGreeting,
    ComposingPackGreeting,
    ComposingSimpleGreeting,
    DecidingUpsell,
    EmittingUpsellDirective,
    EmittingBuyDirective,
    Done,
}

/// Composes speech, cards and directives for one request.
///
/// Borrowing the translator and randomness keeps every composition scoped to
/// the request that created it.
pub struct ResponseComposer<'a> {
    t: &'a dyn Translator,
    random: &'a dyn RandomSource,
}

impl<'a> ResponseComposer<'a> {
    pub fn new(translator: &'a dyn Translator, random: &'a dyn RandomSource) -> Self {
        Self {
            t: translator,
            random,
        }
    }

    pub(crate) fn tr(&self, key: &str, args: &[&str]) -> String {
        self.t.translate(key, args)
    }

    fn enter(&self, state: CompositionState) {
        debug!(?state, "composition state");
    }

    /// Greeting for the caller's tier, preceded by `preceding` (e.g. a
    /// purchase confirmation).
    pub fn compose_greeting_response(
        &self,
        catalog: &ProductCatalog,
        caller_locale: &Locale,
        preceding: &str,
        trigger: Trigger,
    ) -> ResponseOutcome {
        self.enter(CompositionState::AwaitingTierResolution);
        let tier = resolve_tier(catalog);
        debug!(?tier, %caller_locale, "tier resolved");

        let outcome = match tier {
            AccessTier::Premium => {
                self.enter(CompositionState::ComposingPremiumGreeting);
                self.compose_special_greeting(caller_locale, preceding, true)
            }
            AccessTier::GreetingsPackOnly => {
                self.enter(CompositionState::ComposingPackGreeting);
                self.compose_special_greeting(caller_locale, preceding, false)
            }
            AccessTier::None => {
                self.enter(CompositionState::ComposingSimpleGreeting);
                self.compose_simple_greeting(catalog, preceding, trigger)
            }
        };

        self.enter(CompositionState::Done);
        outcome
    }

    fn compose_special_greeting(&self, caller_locale: &Locale, preceding: &str, voiced: bool) -> ResponseOutcome {
        let greeting = select_special_greeting(caller_locale.as_str(), self.random);

        let pre = self.tr(phrases::GREETINGS_SPECIAL_PRE, &[preceding]);
        let language = self.tr(&phrases::language_name(greeting.language.as_str()), &[]);
        let post = self.tr(phrases::GREETINGS_SPECIAL_POST, &[&language]);
        let another = self.tr(phrases::GREETINGS_ANOTHER, &[]);

        // Premium: language outer, voice inner. Pack: language only.
        let word = greeting.exclaimed();
        let inner = if voiced {
            let voice = greeting.random_voice(self.random);
            debug!(language = greeting.language.as_str(), ?voice, "premium voice selected");
            render_voiced(&word, voice)
        } else {
            word.clone()
        };
        let spoken_greeting = render_localized(&inner, Some(greeting.speech_locale));

        let card_body = join_speech([pre.as_str(), word.as_str(), post.as_str()]);
        let speech = join_speech([pre.as_str(), spoken_greeting.as_str(), post.as_str(), another.as_str()]);

        ResponseOutcome::speak(speech)
            .with_reprompt(another)
            .with_card(self.tr(phrases::SKILL_NAME, &[]), card_body)
    }

    fn compose_simple_greeting(&self, catalog: &ProductCatalog, preceding: &str, trigger: Trigger) -> ResponseOutcome {
        let hello = self.tr(phrases::SIMPLE_HELLO, &[]);
        let simple = self.tr(phrases::GREETINGS_SIMPLE, &[&hello]);
        let announcement = join_speech([preceding, simple.as_str()]);

        self.enter(CompositionState::DecidingUpsell);
        if trigger.has_originating_intent() && self.random.coin_flip() {
            if let Some(pack) = catalog.find_by_reference_name(&ReferenceName::GreetingsPack) {
                let upsell = self.tr(phrases::GREETINGS_UPSELL, &[]);
                let teaser = join_speech([announcement.as_str(), upsell.as_str()]);
                match self.compose_upsell(&teaser, Some(pack)) {
                    Ok(outcome) => return outcome,
                    Err(e) => warn!(error = %e, "upsell could not be composed; greeting without it"),
                }
            } else {
                debug!("greetings pack not offered in this marketplace; skipping upsell");
            }
        }

        let another = self.tr(phrases::GREETINGS_ANOTHER, &[]);
        ResponseOutcome::speak(join_speech([announcement.as_str(), another.as_str()]))
            .with_reprompt(another)
            .with_card(self.tr(phrases::SKILL_NAME, &[]), announcement)
    }

    /// Hand the turn to the platform's purchase flow for `product`.
    pub fn compose_buy_offer(&self, product: Option<&Product>) -> SkillResult<ResponseOutcome> {
        let product = product.ok_or_else(|| SkillError::configuration("buy offer for a product missing from the catalog"))?;
        self.enter(CompositionState::EmittingBuyDirective);
        Ok(ResponseOutcome::directive(Directive::new(
            DirectiveKind::Buy,
            product.product_id().clone(),
        )))
    }

    /// Soft offer: `preceding`, the product summary and a "learn more" prompt.
    pub fn compose_upsell(&self, preceding: &str, product: Option<&Product>) -> SkillResult<ResponseOutcome> {
        let product = product.ok_or_else(|| SkillError::configuration("upsell for a product missing from the catalog"))?;
        self.enter(CompositionState::EmittingUpsellDirective);

        let learn_more = self.tr(phrases::LEARN_MORE, &[]);
        let message = join_sentences([preceding, product.summary(), learn_more.as_str()]);
        let directive = Directive::new(DirectiveKind::Upsell, product.product_id().clone()).with_message(message.clone());

        Ok(ResponseOutcome::speak(message).with_directive(directive))
    }

    /// Ask the platform to cancel a subscription or refund a one-time purchase.
    pub fn compose_cancel_offer(&self, product: Option<&Product>) -> SkillResult<ResponseOutcome> {
        let product = product.ok_or_else(|| SkillError::configuration("cancel for a product missing from the catalog"))?;
        Ok(ResponseOutcome::directive(Directive::new(
            DirectiveKind::Cancel,
            product.product_id().clone(),
        )))
    }

    pub fn compose_launch(&self) -> ResponseOutcome {
        let skill_name = self.tr(phrases::SKILL_NAME, &[]);
        let speech = self.tr(phrases::WELCOME, &[&skill_name]);
        ResponseOutcome::speak(speech.clone())
            .with_reprompt(speech.clone())
            .with_card(skill_name, speech)
    }

    pub fn compose_help(&self) -> ResponseOutcome {
        let speech = self.tr(phrases::HELP, &[]);
        ResponseOutcome::speak(speech.clone())
            .with_reprompt(speech.clone())
            .with_card(self.tr(phrases::SKILL_NAME, &[]), speech)
    }

    /// Farewell; `with_card` for explicit cancel/stop.
    pub fn compose_goodbye(&self, with_card: bool) -> ResponseOutcome {
        let speech = self.tr(phrases::GOODBYE, &[]);
        let outcome = ResponseOutcome::speak(speech.clone()).ending_session();
        if with_card {
            outcome.with_card(self.tr(phrases::SKILL_NAME, &[]), speech)
        } else {
            outcome
        }
    }

    /// "Didn't catch that" with speech and reprompt.
    pub fn compose_fallback(&self) -> ResponseOutcome {
        let speech = self.tr(phrases::ERROR, &[]);
        ResponseOutcome::speak(speech.clone()).with_reprompt(speech)
    }

    pub fn compose_purchase_error(&self) -> ResponseOutcome {
        ResponseOutcome::speak(self.tr(phrases::PURCHASE_ERROR, &[]))
    }

    /// A product the request referred to is not sold in this marketplace.
    pub fn compose_not_offered(&self, reference: &ReferenceName) -> ResponseOutcome {
        warn!(%reference, "product not offered in this marketplace");
        let another = self.tr(phrases::GREETINGS_ANOTHER, &[]);
        let sorry = self.tr(phrases::PRODUCTS_NOT_OFFERED, &[]);
        ResponseOutcome::speak(join_speech([sorry.as_str(), another.as_str()])).with_reprompt(another)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use premium_hello_catalog::EntitlementStatus;
    use premium_hello_core::FixedRandom;
    use premium_hello_i18n::PhraseBook;

    fn en_us() -> Locale {
        Locale::parse("en-US").unwrap()
    }

    fn pack() -> Product {
        Product::new("pack-id", ReferenceName::GreetingsPack, "Greetings Pack", "Say hello in seven languages")
    }

    fn premium() -> Product {
        Product::new("premium-id", ReferenceName::PremiumSubscription, "Premium Subscription", "Hello in native voices")
    }

    fn entitled(p: Product) -> Product {
        p.with_entitlement(EntitlementStatus::Entitled)
    }

    fn with_composer<R>(random: FixedRandom, f: impl FnOnce(&ResponseComposer<'_>) -> R) -> R {
        let book = PhraseBook::embedded().unwrap();
        let t = book.localize(&en_us(), &random);
        let composer = ResponseComposer::new(&t, &random);
        f(&composer)
    }

    #[test]
    fn premium_greeting_is_voiced_and_localized() {
        let catalog = ProductCatalog::new(vec![entitled(pack()), entitled(premium())]).unwrap();
        let outcome = with_composer(FixedRandom::first_heads(), |c| {
            c.compose_greeting_response(&catalog, &en_us(), "", Trigger::Intent)
        });

        // First eligible non-English greeting is Hindi, first voice Aditi.
        assert_eq!(
            outcome.speech,
            "Here's your special greeting: <lang xml:lang=\"en-IN\"> <voice name=\"Aditi\"> Namaste! </voice> </lang> \
             That's hello in hindi. Would you like another greeting?"
        );
        assert_eq!(outcome.reprompt.as_deref(), Some("Would you like another greeting?"));
        assert_eq!(outcome.directive, None);

        let card = outcome.card.unwrap();
        assert_eq!(card.title, "Premium Hello World");
        assert_eq!(card.body, "Here's your special greeting: Namaste! That's hello in hindi.");
    }

    #[test]
    fn premium_voice_is_nested_inside_language() {
        let catalog = ProductCatalog::new(vec![entitled(premium())]).unwrap();
        let random = premium_hello_core::SeededRandom::new(21);
        let book = PhraseBook::embedded().unwrap();
        let t = book.localize(&en_us(), &random);
        let composer = ResponseComposer::new(&t, &random);

        for _ in 0..30 {
            let speech = composer
                .compose_greeting_response(&catalog, &en_us(), "", Trigger::Intent)
                .speech;
            let lang_open = speech.find("<lang").unwrap();
            let voice_open = speech.find("<voice").unwrap();
            let voice_close = speech.find("</voice>").unwrap();
            let lang_close = speech.find("</lang>").unwrap();
            assert!(lang_open < voice_open && voice_close < lang_close, "{speech}");
        }
    }

    #[test]
    fn pack_greeting_has_language_markup_only() {
        let catalog = ProductCatalog::new(vec![entitled(pack()), premium()]).unwrap();
        let outcome = with_composer(FixedRandom::first_heads(), |c| {
            c.compose_greeting_response(&catalog, &en_us(), "No Problem.", Trigger::Intent)
        });

        assert!(outcome.speech.starts_with("No Problem. Here's your special greeting:"));
        assert!(outcome.speech.contains("<lang xml:lang=\"en-IN\"> Namaste! </lang>"));
        assert!(!outcome.speech.contains("<voice"));
        assert_eq!(outcome.directive, None);
    }

    #[test]
    fn no_tier_heads_on_intent_upsells_the_pack() {
        let catalog = ProductCatalog::new(vec![pack(), premium()]).unwrap();
        let outcome = with_composer(FixedRandom::first_heads(), |c| {
            c.compose_greeting_response(&catalog, &en_us(), "", Trigger::Intent)
        });

        let directive = outcome.directive.unwrap();
        assert_eq!(directive.kind, DirectiveKind::Upsell);
        assert_eq!(directive.target_product_id.as_str(), "pack-id");
        assert_eq!(
            directive.auxiliary_message.as_deref(),
            Some(
                "Here's your simple greeting: Howdy!. By the way, you can now get greetings in more languages. \
                 Say hello in seven languages. Want to learn more about it?"
            )
        );
    }

    #[test]
    fn no_tier_tails_gives_simple_greeting() {
        let catalog = ProductCatalog::new(vec![pack()]).unwrap();
        let outcome = with_composer(FixedRandom::first_tails(), |c| {
            c.compose_greeting_response(&catalog, &en_us(), "", Trigger::Intent)
        });

        assert_eq!(outcome.speech, "Here's your simple greeting: Howdy!. Would you like another greeting?");
        assert_eq!(outcome.directive, None);
        assert_eq!(outcome.card.unwrap().body, "Here's your simple greeting: Howdy!.");
    }

    #[test]
    fn purchase_outcome_replay_never_upsells() {
        let catalog = ProductCatalog::new(vec![pack()]).unwrap();
        let outcome = with_composer(FixedRandom::first_heads(), |c| {
            c.compose_greeting_response(&catalog, &en_us(), "No Problem.", Trigger::PurchaseOutcome)
        });

        assert_eq!(outcome.directive, None);
        assert!(outcome.speech.starts_with("No Problem. Here's your simple greeting:"));
    }

    #[test]
    fn missing_pack_degrades_to_simple_greeting() {
        let outcome = with_composer(FixedRandom::first_heads(), |c| {
            c.compose_greeting_response(&ProductCatalog::empty(), &en_us(), "", Trigger::Intent)
        });
        assert_eq!(outcome.directive, None);
        assert!(outcome.reprompt.is_some());
    }

    #[test]
    fn buy_offer_requires_a_product() {
        let err = with_composer(FixedRandom::first_heads(), |c| c.compose_buy_offer(None)).unwrap_err();
        assert!(matches!(err, SkillError::Configuration(_)));
    }

    #[test]
    fn buy_offer_targets_the_product_silently() {
        let product = premium();
        let outcome = with_composer(FixedRandom::first_heads(), |c| c.compose_buy_offer(Some(&product))).unwrap();

        let directive = outcome.directive.as_ref().unwrap();
        assert_eq!(directive.kind, DirectiveKind::Buy);
        assert_eq!(directive.target_product_id, *product.product_id());
        assert!(outcome.speech.is_empty());
    }

    #[test]
    fn upsell_requires_a_product() {
        let err = with_composer(FixedRandom::first_heads(), |c| c.compose_upsell("Sure.", None)).unwrap_err();
        assert!(matches!(err, SkillError::Configuration(_)));
    }

    #[test]
    fn upsell_message_carries_summary_and_prompt() {
        let product = pack();
        let outcome = with_composer(FixedRandom::first_heads(), |c| c.compose_upsell("Sure.", Some(&product))).unwrap();
        assert_eq!(outcome.speech, "Sure. Say hello in seven languages. Want to learn more about it?");
        assert_eq!(outcome.directive.unwrap().auxiliary_message.as_deref(), Some(outcome.speech.as_str()));
    }

    #[test]
    fn fallback_sets_speech_and_reprompt() {
        let outcome = with_composer(FixedRandom::first_heads(), |c| c.compose_fallback());
        assert_eq!(outcome.speech, "Sorry, I didn't catch that. Can you please reformulate?");
        assert_eq!(outcome.reprompt.as_deref(), Some(outcome.speech.as_str()));
    }

    #[test]
    fn goodbye_ends_the_session() {
        let outcome = with_composer(FixedRandom::first_heads(), |c| c.compose_goodbye(true));
        assert_eq!(outcome.speech, "OK.  Goodbye!");
        assert!(outcome.end_session);
        assert!(outcome.card.is_some());
    }

    #[test]
    fn launch_welcomes_with_skill_name() {
        let outcome = with_composer(FixedRandom::first_heads(), |c| c.compose_launch());
        assert_eq!(outcome.speech, "Welcome to Premium Hello World, you can say hello! How can I help?");
        assert_eq!(outcome.card.unwrap().title, "Premium Hello World");
    }
}
