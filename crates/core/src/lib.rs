//! `premium-hello-core`: shared building blocks for the skill.
//!
//! This crate contains **pure** primitives (no IO, no async): the error model,
//! identifiers, locales and the injectable randomness used by every
//! composition path.

pub mod error;
pub mod id;
pub mod locale;
pub mod random;

pub use error::{SkillError, SkillResult};
pub use id::{CorrelationToken, ProductId};
pub use locale::Locale;
pub use random::{choose, FixedRandom, RandomSource, SeededRandom, ThreadRandom};
