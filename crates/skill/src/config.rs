//! Process configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use premium_hello_catalog::FetchPolicy;
use premium_hello_i18n::{I18nError, PhraseBook};

pub const ENV_CATALOG_TIMEOUT_MS: &str = "PREMIUM_HELLO_CATALOG_TIMEOUT_MS";
pub const ENV_CATALOG_RETRIES: &str = "PREMIUM_HELLO_CATALOG_RETRIES";
pub const ENV_PHRASES_DIR: &str = "PREMIUM_HELLO_PHRASES_DIR";
pub const ENV_FALLBACK_LANGUAGE: &str = "PREMIUM_HELLO_FALLBACK_LANGUAGE";

const DEFAULT_FALLBACK_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillConfig {
    pub catalog_timeout: Duration,
    pub catalog_retries: u32,
    /// Extra `<lang>.json` / `<locale>.json` tables layered over the embedded English one.
    pub phrases_dir: Option<PathBuf>,
    pub fallback_language: String,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            catalog_timeout: FetchPolicy::DEFAULT_TIMEOUT,
            catalog_retries: FetchPolicy::MAX_RETRIES,
            phrases_dir: None,
            fallback_language: DEFAULT_FALLBACK_LANGUAGE.to_string(),
        }
    }
}

impl SkillConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup. Invalid values are logged and replaced
    /// by their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let catalog_timeout = match lookup(ENV_CATALOG_TIMEOUT_MS) {
            None => defaults.catalog_timeout,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    tracing::warn!(value = %raw, "{ENV_CATALOG_TIMEOUT_MS} is not a positive integer; using default");
                    defaults.catalog_timeout
                }
            },
        };

        let catalog_retries = match lookup(ENV_CATALOG_RETRIES) {
            None => defaults.catalog_retries,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > FetchPolicy::MAX_RETRIES => {
                    tracing::warn!(value = n, max = FetchPolicy::MAX_RETRIES, "{ENV_CATALOG_RETRIES} clamped");
                    FetchPolicy::MAX_RETRIES
                }
                Ok(n) => n,
                Err(_) => {
                    tracing::warn!(value = %raw, "{ENV_CATALOG_RETRIES} is not a number; using default");
                    defaults.catalog_retries
                }
            },
        };

        let phrases_dir = lookup(ENV_PHRASES_DIR)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        let fallback_language = match lookup(ENV_FALLBACK_LANGUAGE) {
            Some(raw) if !raw.trim().is_empty() => raw.trim().to_ascii_lowercase(),
            Some(_) => {
                tracing::warn!("{ENV_FALLBACK_LANGUAGE} is empty; using default");
                defaults.fallback_language
            }
            None => defaults.fallback_language,
        };

        Self {
            catalog_timeout,
            catalog_retries,
            phrases_dir,
            fallback_language,
        }
    }

    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy::new(self.catalog_timeout, self.catalog_retries)
    }

    /// Embedded tables plus any from `phrases_dir`.
    pub fn phrase_book(&self) -> Result<PhraseBook, I18nError> {
        let mut book = PhraseBook::embedded()?.with_fallback_language(&self.fallback_language);
        if let Some(dir) = &self.phrases_dir {
            let loaded = book.load_dir(dir)?;
            tracing::info!(dir = %dir.display(), loaded, "phrase tables loaded");
        }
        if !book.has_table(book.fallback_language()) {
            tracing::warn!(
                language = book.fallback_language(),
                "no phrase table for the fallback language; using en"
            );
            book = book.with_fallback_language(DEFAULT_FALLBACK_LANGUAGE);
        }
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = SkillConfig::from_lookup(lookup(&[]));
        assert_eq!(config, SkillConfig::default());
        assert_eq!(config.fetch_policy(), FetchPolicy::default());
    }

    #[test]
    fn reads_valid_values() {
        let config = SkillConfig::from_lookup(lookup(&[
            (ENV_CATALOG_TIMEOUT_MS, "750"),
            (ENV_CATALOG_RETRIES, "0"),
            (ENV_PHRASES_DIR, "/srv/phrases"),
            (ENV_FALLBACK_LANGUAGE, "DE"),
        ]));
        assert_eq!(config.catalog_timeout, Duration::from_millis(750));
        assert_eq!(config.catalog_retries, 0);
        assert_eq!(config.phrases_dir, Some(PathBuf::from("/srv/phrases")));
        assert_eq!(config.fallback_language, "de");
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = SkillConfig::from_lookup(lookup(&[
            (ENV_CATALOG_TIMEOUT_MS, "soon"),
            (ENV_CATALOG_RETRIES, "-3"),
            (ENV_FALLBACK_LANGUAGE, "  "),
        ]));
        assert_eq!(config, SkillConfig::default());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = SkillConfig::from_lookup(lookup(&[(ENV_CATALOG_TIMEOUT_MS, "0")]));
        assert_eq!(config.catalog_timeout, FetchPolicy::DEFAULT_TIMEOUT);
    }

    #[test]
    fn retries_are_clamped_to_one() {
        let config = SkillConfig::from_lookup(lookup(&[(ENV_CATALOG_RETRIES, "5")]));
        assert_eq!(config.catalog_retries, 1);
    }

    #[test]
    fn missing_fallback_table_reverts_to_english() {
        let config = SkillConfig::from_lookup(lookup(&[(ENV_FALLBACK_LANGUAGE, "fr")]));
        let book = config.phrase_book().unwrap();
        assert_eq!(book.fallback_language(), "en");
    }
}
