use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use premium_hello_core::{choose, Locale, RandomSource};

use crate::format::sprintf;

/// English strings shipped with the skill.
const EMBEDDED_EN: &str = include_str!("../locales/en.json");

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("phrase table '{tag}' is not valid JSON: {message}")]
    Parse { tag: String, message: String },

    #[error("phrase table '{tag}' must be a JSON object")]
    NotAnObject { tag: String },

    #[error("failed to read phrase tables: {0}")]
    Io(#[from] std::io::Error),
}

/// Phrase lookup (`translate(key, ...args)`).
///
/// Keys are dotted paths (`"GREETINGS.SPECIAL.PRE"`). When the value is a
/// list, one entry is chosen at random.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str, args: &[&str]) -> String;
}

/// All loaded phrase tables, keyed by language or locale tag (lowercase).
#[derive(Debug, Clone)]
pub struct PhraseBook {
    tables: HashMap<String, Value>,
    fallback_language: String,
}

impl PhraseBook {
    /// Embedded English table only, falling back to `"en"`.
    pub fn embedded() -> Result<Self, I18nError> {
        let mut book = Self {
            tables: HashMap::new(),
            fallback_language: "en".to_string(),
        };
        book.insert_json("en", EMBEDDED_EN)?;
        Ok(book)
    }

    pub fn with_fallback_language(mut self, language: impl Into<String>) -> Self {
        self.fallback_language = language.into().to_ascii_lowercase();
        self
    }

    pub fn fallback_language(&self) -> &str {
        &self.fallback_language
    }

    /// Add (or replace) the table for `tag` (`"fr"`, `"fr-FR"`).
    pub fn insert_json(&mut self, tag: &str, json: &str) -> Result<(), I18nError> {
        let tag = tag.to_ascii_lowercase();
        let value: Value = serde_json::from_str(json).map_err(|e| I18nError::Parse {
            tag: tag.clone(),
            message: e.to_string(),
        })?;
        if !value.is_object() {
            return Err(I18nError::NotAnObject { tag });
        }
        debug!(%tag, "phrase table loaded");
        self.tables.insert(tag, value);
        Ok(())
    }

    /// Load every `<tag>.json` file in `dir`, layered over the current tables.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, I18nError> {
        let mut loaded = 0;
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(tag) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let json = std::fs::read_to_string(&path)?;
            self.insert_json(tag, &json)?;
            loaded += 1;
        }
        Ok(loaded)
    }

    pub fn has_table(&self, tag: &str) -> bool {
        self.tables.contains_key(&tag.to_ascii_lowercase())
    }

    /// Bind the book to one request's locale and randomness.
    pub fn localize<'a>(&'a self, locale: &Locale, random: &'a dyn RandomSource) -> Localizer<'a> {
        let mut chain: Vec<String> = Vec::with_capacity(3);
        for tag in [
            locale.as_str().to_ascii_lowercase(),
            locale.language(),
            self.fallback_language.clone(),
        ] {
            if self.tables.contains_key(&tag) && !chain.contains(&tag) {
                chain.push(tag);
            }
        }
        Localizer {
            book: self,
            chain,
            random,
        }
    }

    fn lookup(&self, tag: &str, key: &str) -> Option<&Value> {
        let mut node = self.tables.get(tag)?;
        for segment in key.split('.') {
            node = node.get(segment)?;
        }
        Some(node)
    }
}

/// Request-scoped translator: locale → language → fallback language.
pub struct Localizer<'a> {
    book: &'a PhraseBook,
    chain: Vec<String>,
    random: &'a dyn RandomSource,
}

impl Localizer<'_> {
    /// Tables consulted, most specific first.
    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    fn resolve(&self, key: &str) -> Option<&str> {
        self.chain.iter().find_map(|tag| match self.book.lookup(tag, key)? {
            Value::String(s) => Some(s.as_str()),
            Value::Array(items) => {
                let strings: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                choose(self.random, &strings).copied()
            }
            _ => None,
        })
    }
}

impl Translator for Localizer<'_> {
    fn translate(&self, key: &str, args: &[&str]) -> String {
        match self.resolve(key) {
            Some(template) => sprintf(template, args),
            None => {
                warn!(key, chain = ?self.chain, "missing phrase");
                key.to_string()
            }
        }
    }
}
