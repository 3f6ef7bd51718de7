//! Text layer and service contracts of the wordcheck spelling engine.
//!
//! - [`encoding`] -- Dictionary codecs and per-character case metadata
//! - [`character`] -- Simple case mappings the codecs are built from
//! - [`case`] -- Capitalization classes and case transforms
//! - [`word`] -- Word buffers and the input normalizer
//! - [`flags`] -- Affix flag sets
//! - [`services`] -- Dictionary, affix rule and suggestion engine traits
//! - [`suggestions`] -- Bounded suggestion list

pub mod case;
pub mod character;
pub mod encoding;
pub mod flags;
pub mod services;
pub mod suggestions;
pub mod word;
