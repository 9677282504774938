//! Special greetings: "hello" in a language other than the caller's own.

use serde::Serialize;

use premium_hello_core::{choose, RandomSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LanguageTag {
    En,
    De,
    Hi,
    Fr,
    Es,
    Ja,
    It,
}

impl LanguageTag {
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageTag::En => "EN",
            LanguageTag::De => "DE",
            LanguageTag::Hi => "HI",
            LanguageTag::Fr => "FR",
            LanguageTag::Es => "ES",
            LanguageTag::Ja => "JA",
            LanguageTag::It => "IT",
        }
    }

    /// Primary subtag of a language or locale tag, case-insensitive
    /// (`"en-US"` → `En`). `None` for languages without a greeting.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_uppercase().as_str() {
            "EN" => Some(LanguageTag::En),
            "DE" => Some(LanguageTag::De),
            "HI" => Some(LanguageTag::Hi),
            "FR" => Some(LanguageTag::Fr),
            "ES" => Some(LanguageTag::Es),
            "JA" => Some(LanguageTag::Ja),
            "IT" => Some(LanguageTag::It),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpecialGreeting {
    pub language: LanguageTag,
    pub greeting_word: &'static str,
    /// Locale used for the language markup (`xml:lang`).
    pub speech_locale: &'static str,
    /// Voices able to speak the greeting natively.
    pub voices: &'static [&'static str],
}

pub static SPECIAL_GREETINGS: [SpecialGreeting; 7] = [
    SpecialGreeting {
        language: LanguageTag::En,
        greeting_word: "Hello",
        speech_locale: "en-US",
        voices: &["Ivy", "Joanna", "Joey", "Justin", "Kendra", "Kimberly", "Matthew", "Salli"],
    },
    SpecialGreeting {
        language: LanguageTag::Hi,
        greeting_word: "Namaste",
        speech_locale: "en-IN",
        voices: &["Aditi", "Raveena"],
    },
    SpecialGreeting {
        language: LanguageTag::De,
        greeting_word: "Hallo",
        speech_locale: "de-DE",
        voices: &["Hans", "Marlene", "Vicki"],
    },
    SpecialGreeting {
        language: LanguageTag::Es,
        greeting_word: "Hola",
        speech_locale: "es-ES",
        voices: &["Conchita", "Enrique"],
    },
    SpecialGreeting {
        language: LanguageTag::Fr,
        greeting_word: "Bonjour",
        speech_locale: "fr-FR",
        voices: &["Celine", "Lea", "Mathieu"],
    },
    SpecialGreeting {
        language: LanguageTag::Ja,
        greeting_word: "Konichiwa",
        speech_locale: "ja-JP",
        voices: &["Mizuki", "Takumi"],
    },
    SpecialGreeting {
        language: LanguageTag::It,
        greeting_word: "Ciao",
        speech_locale: "it-IT",
        voices: &["Carla", "Giorgio"],
    },
];

/// Greetings in any language but the caller's.
pub fn eligible_greetings(caller_language: &str) -> Vec<&'static SpecialGreeting> {
    let own = LanguageTag::from_tag(caller_language);
    SPECIAL_GREETINGS
        .iter()
        .filter(|g| Some(g.language) != own)
        .collect()
}

/// Uniform pick among [`eligible_greetings`].
pub fn select_special_greeting(
    caller_language: &str,
    random: &dyn RandomSource,
) -> &'static SpecialGreeting {
    let eligible = eligible_greetings(caller_language);
    // At least six entries remain for any caller.
    choose(random, &eligible)
        .copied()
        .unwrap_or(&SPECIAL_GREETINGS[0])
}

impl SpecialGreeting {
    /// `"Hallo!"`
    pub fn exclaimed(&self) -> String {
        format!("{}!", self.greeting_word)
    }

    pub fn random_voice(&self, random: &dyn RandomSource) -> Option<&'static str> {
        choose(random, self.voices).copied()
    }
}

/// Wrap `text` in a voice annotation; unchanged when either part is missing.
pub fn render_voiced(text: &str, voice_name: Option<&str>) -> String {
    match voice_name {
        Some(voice) if !text.is_empty() && !voice.is_empty() => {
            format!("<voice name=\"{voice}\"> {text} </voice>")
        }
        _ => text.to_string(),
    }
}

/// Wrap `text` in a language annotation; unchanged when either part is missing.
pub fn render_localized(text: &str, speech_locale: Option<&str>) -> String {
    match speech_locale {
        Some(locale) if !text.is_empty() && !locale.is_empty() => {
            format!("<lang xml:lang=\"{locale}\"> {text} </lang>")
        }
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use premium_hello_core::{FixedRandom, SeededRandom};

    #[test]
    fn caller_language_is_excluded() {
        let eligible = eligible_greetings("en-US");
        assert_eq!(eligible.len(), 6);
        assert!(eligible.iter().all(|g| g.language != LanguageTag::En));
    }

    #[test]
    fn unsupported_language_keeps_all_entries() {
        assert_eq!(eligible_greetings("xx").len(), 7);
        assert_eq!(eligible_greetings("pt-BR").len(), 7);
        assert_eq!(eligible_greetings("").len(), 7);
    }

    #[test]
    fn tag_match_is_case_insensitive() {
        assert_eq!(LanguageTag::from_tag("De-at"), Some(LanguageTag::De));
        assert_eq!(LanguageTag::from_tag("ja_JP"), Some(LanguageTag::Ja));
        assert_eq!(LanguageTag::from_tag("klingon"), None);
    }

    #[test]
    fn english_caller_never_gets_english() {
        let random = SeededRandom::new(7);
        for _ in 0..200 {
            assert_ne!(select_special_greeting("en", &random).language, LanguageTag::En);
        }
    }

    #[test]
    fn pinned_selection_is_deterministic() {
        let first = FixedRandom::first_heads();
        // EN is skipped for an English caller, so the first eligible is HI.
        assert_eq!(select_special_greeting("en-GB", &first).language, LanguageTag::Hi);
        assert_eq!(select_special_greeting("hi-IN", &first).language, LanguageTag::En);
    }

    #[test]
    fn voiced_markup() {
        assert_eq!(render_voiced("Hola!", None), "Hola!");
        assert_eq!(render_voiced("Hola!", Some("")), "Hola!");
        assert_eq!(render_voiced("", Some("Joanna")), "");

        let voiced = render_voiced("Hola!", Some("Joanna"));
        assert_eq!(voiced, "<voice name=\"Joanna\"> Hola! </voice>");
    }

    #[test]
    fn localized_markup() {
        assert_eq!(render_localized("Ciao!", None), "Ciao!");
        assert_eq!(
            render_localized("Ciao!", Some("it-IT")),
            "<lang xml:lang=\"it-IT\"> Ciao! </lang>"
        );
    }

    #[test]
    fn every_greeting_has_a_voice() {
        let random = FixedRandom::new(usize::MAX, true);
        for greeting in &SPECIAL_GREETINGS {
            assert!(greeting.random_voice(&random).is_some(), "{:?}", greeting.language);
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: selection never returns the caller's own language.
            #[test]
            fn selection_excludes_caller(seed in any::<u64>(), idx in 0usize..7) {
                let caller = SPECIAL_GREETINGS[idx].language;
                let random = SeededRandom::new(seed);
                let picked = select_special_greeting(&caller.as_str().to_lowercase(), &random);
                prop_assert_ne!(picked.language, caller);
            }

            /// Property: voice wrapping is a no-op without a voice.
            #[test]
            fn no_voice_is_identity(text in ".{0,40}") {
                prop_assert_eq!(render_voiced(&text, None), text.clone());
                prop_assert_eq!(render_localized(&text, None), text);
            }
        }
    }
}
