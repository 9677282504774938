//! Where emitted purchase-flow directives go.

use std::sync::{Arc, Mutex};

use thiserror::Error;

use premium_hello_core::SkillError;

use crate::response::Directive;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("directive sink rejected the directive: {0}")]
    Rejected(String),

    /// Internal lock poisoning.
    #[error("directive sink is poisoned")]
    Poisoned,
}

impl From<SinkError> for SkillError {
    fn from(value: SinkError) -> Self {
        SkillError::service(value.to_string())
    }
}

/// Receives every directive the skill emits (Buy, Upsell, Cancel).
pub trait DirectiveSink: Send + Sync {
    fn send(&self, directive: &Directive) -> Result<(), SinkError>;
}

impl<T: DirectiveSink + ?Sized> DirectiveSink for Arc<T> {
    fn send(&self, directive: &Directive) -> Result<(), SinkError> {
        (**self).send(directive)
    }
}

/// In-memory sink for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryDirectiveSink {
    sent: Mutex<Vec<Directive>>,
}

impl InMemoryDirectiveSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, oldest first.
    pub fn all(&self) -> Vec<Directive> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

impl DirectiveSink for InMemoryDirectiveSink {
    fn send(&self, directive: &Directive) -> Result<(), SinkError> {
        let mut sent = self.sent.lock().map_err(|_| SinkError::Poisoned)?;
        sent.push(directive.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::DirectiveKind;
    use premium_hello_core::ProductId;

    #[test]
    fn in_memory_sink_records_in_order() {
        let sink = InMemoryDirectiveSink::new();
        sink.send(&Directive::new(DirectiveKind::Buy, ProductId::from("a"))).unwrap();
        sink.send(&Directive::new(DirectiveKind::Cancel, ProductId::from("b"))).unwrap();

        let kinds: Vec<DirectiveKind> = sink.all().iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DirectiveKind::Buy, DirectiveKind::Cancel]);
    }

    #[test]
    fn shared_sink_forwards() {
        let sink = Arc::new(InMemoryDirectiveSink::new());
        let shared: Arc<InMemoryDirectiveSink> = Arc::clone(&sink);
        shared.send(&Directive::new(DirectiveKind::Upsell, ProductId::from("a"))).unwrap();
        assert_eq!(sink.all().len(), 1);
    }

    #[test]
    fn sink_error_becomes_service_error() {
        let err: SkillError = SinkError::Rejected("queue full".into()).into();
        assert!(matches!(err, SkillError::Service(msg) if msg.contains("queue full")));
    }
}
