//! `premium-hello-skill`: the entitlement-driven response engine.
//!
//! A turn flows through:
//! - [`request`]: the incoming envelope (launch, intent, purchase-flow
//!   response, session end)
//! - [`dispatcher`]: fetches the catalog snapshot when needed and routes to
//!   the composer
//! - [`composer`] / [`intents`]: resolve the access tier and build speech,
//!   cards and directives
//! - [`purchase`]: turns purchase and cancellation results into the next
//!   response
//! - [`directive_sink`]: receives any emitted directive
//!
//! Randomness and translation are passed explicitly to every composition so
//! a test can pin the whole turn.

pub mod composer;
pub mod config;
pub mod directive_sink;
pub mod dispatcher;
pub mod greeting;
pub mod intents;
pub mod phrases;
pub mod purchase;
pub mod request;
pub mod response;
pub mod tier;

pub use composer::{CompositionState, ResponseComposer, Trigger};
pub use config::SkillConfig;
pub use directive_sink::{DirectiveSink, InMemoryDirectiveSink, SinkError};
pub use dispatcher::SkillDispatcher;
pub use greeting::{render_localized, render_voiced, select_special_greeting, LanguageTag, SpecialGreeting};
pub use purchase::{PurchaseEvent, PurchaseOutcome, PurchaseOutcomeHandler};
pub use request::{ConnectionName, IntentName, RequestEnvelope, SkillRequest};
pub use response::{Card, Directive, DirectiveKind, ResponseOutcome};
pub use tier::{resolve_tier, AccessTier};
