//! Phrase lookup.
//!
//! String tables are JSON documents keyed by language (`en.json`) or full
//! locale (`en-GB.json`). A request binds a [`Localizer`] to its locale and
//! passes it explicitly to whatever composes speech; nothing is global.

pub mod format;
pub mod phrase_book;

pub use format::sprintf;
pub use phrase_book::{I18nError, Localizer, PhraseBook, Translator};
