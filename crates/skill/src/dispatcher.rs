//! Request dispatch (one turn, end to end).
//!
//! ```text
//! RequestEnvelope
//!   ↓
//! 1. Bind phrases to the request locale
//!   ↓
//! 2. Fetch the catalog snapshot (only for requests that need it; the only await)
//!   ↓
//! 3. Compose the response
//!   ↓
//! 4. Hand any directive to the sink
//! ```
//!
//! Every failure along the way becomes the spoken fallback response; callers
//! never see a raw error.

use std::sync::Arc;

use tracing::{error, info, warn};

use premium_hello_catalog::{fetch_catalog, CatalogService, FetchPolicy, ProductCatalog, ReferenceName};
use premium_hello_core::{Locale, RandomSource, SkillError, SkillResult, ThreadRandom};
use premium_hello_i18n::PhraseBook;

use crate::composer::{ResponseComposer, Trigger};
use crate::directive_sink::DirectiveSink;
use crate::purchase::PurchaseOutcomeHandler;
use crate::request::{purchase_event, ConnectionName, IntentName, RequestEnvelope, SkillRequest};
use crate::response::{DirectiveKind, ResponseOutcome};

/// Routes requests to the composer.
///
/// Generic over the catalog backend and directive sink so tests can run the
/// whole turn with in-memory implementations.
pub struct SkillDispatcher<C, D> {
    catalog: C,
    sink: D,
    phrases: PhraseBook,
    random: Arc<dyn RandomSource>,
    policy: FetchPolicy,
}

impl<C, D> SkillDispatcher<C, D>
where
    C: CatalogService,
    D: DirectiveSink,
{
    pub fn new(catalog: C, sink: D, phrases: PhraseBook) -> Self {
        Self {
            catalog,
            sink,
            phrases,
            random: Arc::new(ThreadRandom),
            policy: FetchPolicy::default(),
        }
    }

    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn with_fetch_policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    /// Handle one request and produce the response to return.
    pub async fn dispatch(&self, envelope: &RequestEnvelope) -> ResponseOutcome {
        info!(
            request_id = %envelope.request_id,
            kind = envelope.request.kind(),
            locale = %envelope.locale,
            timestamp = %envelope.timestamp,
            "request received"
        );

        let random: &dyn RandomSource = self.random.as_ref();
        let translator = self.phrases.localize(&envelope.locale, random);
        let composer = ResponseComposer::new(&translator, random);

        let outcome = match self.handle(&composer, envelope).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(request_id = %envelope.request_id, error = %e, "request failed; answering with fallback");
                composer.compose_fallback()
            }
        };

        let outcome = match self.emit(&outcome) {
            Ok(()) => outcome,
            Err(e) => {
                error!(request_id = %envelope.request_id, error = %e, "directive could not be delivered");
                composer.compose_fallback()
            }
        };

        info!(
            request_id = %envelope.request_id,
            directive = outcome.directive_kind().map(DirectiveKind::as_str),
            end_session = outcome.end_session,
            "response composed"
        );
        outcome
    }

    async fn snapshot(&self, locale: &Locale) -> SkillResult<ProductCatalog> {
        Ok(fetch_catalog(&self.catalog, locale, self.policy).await?)
    }

    fn emit(&self, outcome: &ResponseOutcome) -> SkillResult<()> {
        if let Some(directive) = &outcome.directive {
            self.sink.send(directive)?;
        }
        Ok(())
    }

    async fn handle(&self, composer: &ResponseComposer<'_>, envelope: &RequestEnvelope) -> SkillResult<ResponseOutcome> {
        let locale = &envelope.locale;
        match &envelope.request {
            SkillRequest::Launch => Ok(composer.compose_launch()),
            SkillRequest::Intent { intent } => self.handle_intent(composer, &intent.name, locale).await,
            SkillRequest::PurchaseResponse { name, status, payload } => {
                let event = purchase_event(status, payload);
                match name {
                    ConnectionName::Buy | ConnectionName::Upsell => {
                        // A failed flow is answered without consulting the catalog.
                        let catalog = if event.succeeded() {
                            self.snapshot(locale).await?
                        } else {
                            ProductCatalog::empty()
                        };
                        Ok(PurchaseOutcomeHandler::new(composer).handle_outcome(&event, &catalog, locale))
                    }
                    ConnectionName::Cancel => Ok(PurchaseOutcomeHandler::new(composer).handle_cancel_outcome(&event)),
                    ConnectionName::Unknown => Err(SkillError::service(format!(
                        "unsupported purchase flow response (status {})",
                        event.status_code
                    ))),
                }
            }
            SkillRequest::SessionEnded { reason } => {
                info!(reason = reason.as_deref().unwrap_or("unspecified"), "session ended");
                Ok(ResponseOutcome::silent())
            }
        }
    }

    async fn handle_intent(
        &self,
        composer: &ResponseComposer<'_>,
        name: &IntentName,
        locale: &Locale,
    ) -> SkillResult<ResponseOutcome> {
        match name {
            IntentName::Yes | IntentName::SimpleHello => {
                let catalog = self.snapshot(locale).await?;
                Ok(composer.compose_greeting_response(&catalog, locale, "", Trigger::Intent))
            }
            IntentName::WhatCanIBuy => {
                let catalog = self.snapshot(locale).await?;
                Ok(composer.compose_what_can_i_buy(&catalog))
            }
            IntentName::TellMeMoreAboutGreetingsPack => {
                let catalog = self.snapshot(locale).await?;
                composer.compose_tell_me_more(&catalog, &ReferenceName::GreetingsPack)
            }
            IntentName::TellMeMoreAboutPremiumSubscription => {
                let catalog = self.snapshot(locale).await?;
                composer.compose_tell_me_more(&catalog, &ReferenceName::PremiumSubscription)
            }
            IntentName::BuyGreetingsPack => {
                let catalog = self.snapshot(locale).await?;
                composer.compose_buy_greetings_pack(&catalog)
            }
            IntentName::GetSpecialGreetings => {
                let catalog = self.snapshot(locale).await?;
                composer.compose_special_greetings_request(&catalog)
            }
            IntentName::BuyPremiumSubscription => {
                let catalog = self.snapshot(locale).await?;
                composer.compose_buy_premium(&catalog)
            }
            IntentName::PurchaseHistory => {
                let catalog = self.snapshot(locale).await?;
                Ok(composer.compose_purchase_history(&catalog))
            }
            IntentName::RefundGreetingsPack => {
                let catalog = self.snapshot(locale).await?;
                composer.compose_cancel_request(&catalog, &ReferenceName::GreetingsPack)
            }
            IntentName::CancelPremiumSubscription => {
                let catalog = self.snapshot(locale).await?;
                composer.compose_cancel_request(&catalog, &ReferenceName::PremiumSubscription)
            }
            IntentName::Help => Ok(composer.compose_help()),
            IntentName::No => Ok(composer.compose_goodbye(false)),
            IntentName::Cancel | IntentName::Stop => Ok(composer.compose_goodbye(true)),
            IntentName::Unknown(other) => {
                warn!(intent = %other, "unhandled intent");
                Ok(composer.compose_fallback())
            }
        }
    }
}
