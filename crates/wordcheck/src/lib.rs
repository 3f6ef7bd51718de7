//! Spell checking, suggestion and morphological analysis for single words.
//!
//! The engine combines a dictionary store, an affix rule engine and a
//! suggestion engine (all reached through the traits in
//! [`wordcheck_core::services`]) into the public operations of
//! [`SpellEngine`]: `spell`, `suggest`, `suggest_auto`, `analyze`,
//! `analyze_with_correction`, `stem` and `pos_stems`.
//!
//! # Architecture
//!
//! - [`engine`] -- The engine handle and the decision engine (`check`)
//! - [`lookup`] -- Per-call decision results
//! - [`speller`] -- Spell pipeline, break points, sharp-s search
//! - [`suggestion`] -- Suggestion orchestration across case variants
//! - [`morphology`] -- Analysis and stemming
//! - [`locale`] -- Language-specific policies

pub mod engine;
pub mod locale;
pub mod lookup;
pub mod morphology;
pub mod speller;
pub mod suggestion;

pub use engine::{EngineError, MAX_SUGGESTIONS, Services, SpellEngine};
pub use lookup::{Forbidden, Lookup, SpellInfo};
