//! Per-turn response payload handed back to the transport layer.

use serde::Serialize;

use premium_hello_core::{CorrelationToken, ProductId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DirectiveKind {
    Buy,
    Upsell,
    Cancel,
}

impl DirectiveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DirectiveKind::Buy => "Buy",
            DirectiveKind::Upsell => "Upsell",
            DirectiveKind::Cancel => "Cancel",
        }
    }
}

/// Instruction for the platform to start a purchase flow.
///
/// The flow's result comes back later as a purchase-outcome request carrying
/// the same correlation token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Directive {
    pub kind: DirectiveKind,
    pub target_product_id: ProductId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auxiliary_message: Option<String>,
    pub correlation_token: CorrelationToken,
}

impl Directive {
    pub fn new(kind: DirectiveKind, target_product_id: ProductId) -> Self {
        Self {
            kind,
            target_product_id,
            auxiliary_message: None,
            correlation_token: CorrelationToken::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.auxiliary_message = Some(message.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseOutcome {
    /// Spoken text; empty when a directive hands the turn to the platform.
    pub speech: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directive: Option<Directive>,
    pub end_session: bool,
}

impl ResponseOutcome {
    pub fn speak(speech: impl Into<String>) -> Self {
        Self {
            speech: speech.into(),
            ..Self::default()
        }
    }

    /// No speech, only a directive.
    pub fn directive(directive: Directive) -> Self {
        Self {
            directive: Some(directive),
            ..Self::default()
        }
    }

    /// Nothing to say (session end acknowledgements).
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn with_reprompt(mut self, reprompt: impl Into<String>) -> Self {
        self.reprompt = Some(reprompt.into());
        self
    }

    pub fn with_card(mut self, title: impl Into<String>, body: impl Into<String>) -> Self {
        self.card = Some(Card {
            title: title.into(),
            body: body.into(),
        });
        self
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directive = Some(directive);
        self
    }

    pub fn ending_session(mut self) -> Self {
        self.end_session = true;
        self
    }

    pub fn directive_kind(&self) -> Option<DirectiveKind> {
        self.directive.as_ref().map(|d| d.kind)
    }
}

/// Join speech fragments with single spaces, skipping empty ones.
pub(crate) fn join_speech<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join fragments as sentences, adding a full stop where one is missing.
pub(crate) fn join_sentences<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            if p.ends_with(['.', '!', '?']) {
                p.to_string()
            } else {
                format!("{p}.")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let outcome = ResponseOutcome::speak("Hi")
            .with_reprompt("Again?")
            .with_card("Skill", "Hi");
        assert_eq!(outcome.speech, "Hi");
        assert_eq!(outcome.reprompt.as_deref(), Some("Again?"));
        assert_eq!(outcome.card.as_ref().map(|c| c.title.as_str()), Some("Skill"));
        assert_eq!(outcome.directive_kind(), None);
        assert!(!outcome.end_session);
    }

    #[test]
    fn directive_kind_labels_match_connection_names() {
        assert_eq!(DirectiveKind::Buy.as_str(), "Buy");
        assert_eq!(DirectiveKind::Upsell.as_str(), "Upsell");
        assert_eq!(DirectiveKind::Cancel.as_str(), "Cancel");
    }

    #[test]
    fn join_speech_skips_blanks() {
        assert_eq!(join_speech([" Here's your special greeting: ", "", "Hola!"]), "Here's your special greeting: Hola!");
    }

    #[test]
    fn join_sentences_adds_missing_stops() {
        assert_eq!(
            join_sentences(["Sure.", "Say hello in 7 languages", "Want to learn more about it?"]),
            "Sure. Say hello in 7 languages. Want to learn more about it?"
        );
    }

    #[test]
    fn serializes_without_absent_fields() {
        let directive = Directive::new(DirectiveKind::Buy, ProductId::from("p1"));
        let value = serde_json::to_value(ResponseOutcome::directive(directive)).unwrap();
        assert_eq!(value["directive"]["kind"], "Buy");
        assert_eq!(value["directive"]["targetProductId"], "p1");
        assert!(value.get("reprompt").is_none());
        assert!(value["directive"].get("auxiliaryMessage").is_none());
    }
}
