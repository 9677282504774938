//! Skill error model.

use std::time::Duration;

use thiserror::Error;

/// Result type used across the skill crates.
pub type SkillResult<T> = Result<T, SkillError>;

/// Skill-level error.
///
/// None of these reach the user as a raw fault: the dispatcher maps every
/// variant onto a spoken fallback response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SkillError {
    /// An operation referenced a product that is not in the catalog.
    ///
    /// Buying or upselling an unknown product is a programming error, not a
    /// user error; callers check availability first.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A collaborator (catalog service, directive sink) failed.
    #[error("service error: {0}")]
    Service(String),

    /// The catalog fetch did not complete within its deadline.
    #[error("service timed out after {0:?}")]
    Timeout(Duration),

    /// A locale string could not be parsed.
    #[error("invalid locale: {0}")]
    InvalidLocale(String),
}

impl SkillError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    pub fn invalid_locale(msg: impl Into<String>) -> Self {
        Self::InvalidLocale(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = SkillError::configuration("Greetings_Pack not in catalog");
        assert_eq!(err.to_string(), "configuration error: Greetings_Pack not in catalog");
    }
}
