//! Dictionary building blocks for `opencc-spseg`.
//!
//! This module provides the components used to build and share the lexicons
//! the converter consults:
//!
//! - [`TextDictionary`] — sorted key → value table with longest-prefix lookup
//!   and all-prefix-length enumeration, both driven by binary search.
//! - [`DictionaryGroup`] — ordered dictionary alternatives forming one
//!   conversion stage, with a `current` cursor selecting the active one.
//! - [`DictionarySet`] — the standard conversion tables with text-file
//!   loading, CBOR/Zstd persistence, and stock chain presets.
//!
//! Although the module is publicly exposed for advanced users, most consumers
//! will interact only with the high-level [`Converter`](crate::Converter) API.
pub mod dictionary_group;
pub mod dictionary_set;
pub mod text_dictionary;

pub use self::dictionary_group::DictionaryGroup;
pub use self::dictionary_set::DictionarySet;
pub use self::text_dictionary::{DictionaryError, TextDictionary};
