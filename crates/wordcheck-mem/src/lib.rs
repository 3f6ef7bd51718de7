//! In-memory services for the wordcheck engine.
//!
//! - [`HashDictionary`] -- word store with homonym chains
//! - [`AffixTable`] -- prefix/suffix rules and compounding
//! - [`NgramSuggester`] -- edit-based and n-gram suggestions

pub mod affix;
pub mod dictionary;
pub mod suggest;

pub use affix::{AffixKind, AffixRule, AffixTable};
pub use dictionary::HashDictionary;
pub use suggest::NgramSuggester;
