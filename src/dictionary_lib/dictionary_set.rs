//! Loading and persistence for the standard conversion tables.
//!
//! This module defines the [`DictionarySet`] struct, which stores the
//! conversion tables used to assemble the stock chains (Simplified ↔
//! Traditional, plus the Taiwan variant stages). Each table is a shared
//! [`TextDictionary`]; chains built from the set clone the `Arc`s, never the
//! data.
//!
//! Users generally interact with this indirectly via chain presets, but
//! advanced users may access it for custom loading, serialization, or export.

use crate::dictionary_lib::{DictionaryError, DictionaryGroup, TextDictionary};
use serde::{Deserialize, Serialize};
use serde_cbor::{from_reader, from_slice};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use zstd::{Decoder, Encoder};

/// The standard conversion tables, each paired with its cached maximum key
/// length inside [`TextDictionary`].
///
/// Tables are shared through [`Arc`] so a single loaded set can feed any
/// number of chains and converters without copying.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct DictionarySet {
    #[serde(default)]
    pub st_characters: Arc<TextDictionary>,
    #[serde(default)]
    pub st_phrases: Arc<TextDictionary>,
    #[serde(default)]
    pub ts_characters: Arc<TextDictionary>,
    #[serde(default)]
    pub ts_phrases: Arc<TextDictionary>,
    #[serde(default)]
    pub tw_variants: Arc<TextDictionary>,
    #[serde(default)]
    pub tw_variants_rev: Arc<TextDictionary>,
}

impl DictionarySet {
    /// Loads all tables from text files in `base_dir`.
    ///
    /// # Expected directory structure
    ///
    /// ```bash
    /// dicts/
    /// ├── STCharacters.txt
    /// ├── STPhrases.txt
    /// ├── TSCharacters.txt
    /// ├── TSPhrases.txt
    /// ├── TWVariants.txt
    /// └── TWVariantsRev.txt
    /// ```
    ///
    /// Each file is a line-oriented table as accepted by
    /// [`TextDictionary::open`]: one `KEY` whitespace `VALUE` entry per line,
    /// further fields ignored.
    ///
    /// # Errors
    /// - [`DictionaryError::IoError`] if the directory or a file is missing.
    /// - [`DictionaryError::ParseError`] if a line is malformed.
    /// - [`DictionaryError::EncodingError`] if a file is not valid UTF-8.
    pub fn from_dicts<P: AsRef<Path>>(base_dir: P) -> Result<Self, DictionaryError> {
        let base_dir = base_dir.as_ref();

        if !base_dir.exists() {
            return Err(DictionaryError::IoError(format!(
                "Base directory not found: {}",
                base_dir.display()
            )));
        }

        let load = |filename: &str| -> Result<Arc<TextDictionary>, DictionaryError> {
            TextDictionary::open(base_dir.join(filename)).map(Arc::new)
        };

        Ok(DictionarySet {
            st_characters: load("STCharacters.txt")?,
            st_phrases: load("STPhrases.txt")?,
            ts_characters: load("TSCharacters.txt")?,
            ts_phrases: load("TSPhrases.txt")?,
            tw_variants: load("TWVariants.txt")?,
            tw_variants_rev: load("TWVariantsRev.txt")?,
        })
    }

    /// Writes all tables back to text files in `base_dir`.
    pub fn to_dicts<P: AsRef<Path>>(&self, base_dir: P) -> Result<(), DictionaryError> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir)?;

        for (filename, dict) in self.tables() {
            let mut file = File::create(base_dir.join(filename))?;
            for (key, value) in dict.entries() {
                let key_str: String = key.iter().collect();
                writeln!(file, "{}\t{}", key_str, value)?;
            }
        }

        Ok(())
    }

    /// Serializes the set to a CBOR file.
    pub fn serialize_to_cbor<P: AsRef<Path>>(&self, path: P) -> Result<(), DictionaryError> {
        let cbor_data = serde_cbor::to_vec(self)?;
        fs::write(path, cbor_data)?;
        Ok(())
    }

    /// Deserializes a set from a CBOR file.
    pub fn deserialize_from_cbor<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let cbor_data = fs::read(path)?;
        let set: DictionarySet = from_slice(&cbor_data)?;
        Ok(set.finish())
    }

    /// Saves the set as a Zstd-compressed CBOR file.
    pub fn save_compressed<P: AsRef<Path>>(&self, path: P) -> Result<(), DictionaryError> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        let mut encoder = Encoder::new(writer, 19)?;
        serde_cbor::to_writer(&mut encoder, self)?;
        encoder.finish()?;
        Ok(())
    }

    /// Loads a set from a Zstd-compressed CBOR file.
    pub fn load_compressed<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut decoder = Decoder::new(reader)?;
        let set: DictionarySet = from_reader(&mut decoder)?;
        Ok(set.finish())
    }

    /// Restores each table's sorted/unique invariants after deserialization.
    fn finish(mut self) -> Self {
        for dict in [
            &mut self.st_characters,
            &mut self.st_phrases,
            &mut self.ts_characters,
            &mut self.ts_phrases,
            &mut self.tw_variants,
            &mut self.tw_variants_rev,
        ] {
            // Freshly deserialized Arcs are unshared.
            if let Some(inner) = Arc::get_mut(dict) {
                inner.normalize();
            }
        }
        self
    }

    /// Fixed order view over the tables with their file names.
    fn tables(&self) -> [(&'static str, &TextDictionary); 6] {
        [
            ("STCharacters.txt", &self.st_characters),
            ("STPhrases.txt", &self.st_phrases),
            ("TSCharacters.txt", &self.ts_characters),
            ("TSPhrases.txt", &self.ts_phrases),
            ("TWVariants.txt", &self.tw_variants),
            ("TWVariantsRev.txt", &self.tw_variants_rev),
        ]
    }

    /// Simplified → Traditional: phrases first, leftover characters second.
    pub fn s2t_chain(&self) -> Vec<DictionaryGroup> {
        vec![
            DictionaryGroup::new(vec![Arc::clone(&self.st_phrases)]),
            DictionaryGroup::new(vec![Arc::clone(&self.st_characters)]),
        ]
    }

    /// Traditional → Simplified.
    pub fn t2s_chain(&self) -> Vec<DictionaryGroup> {
        vec![
            DictionaryGroup::new(vec![Arc::clone(&self.ts_phrases)]),
            DictionaryGroup::new(vec![Arc::clone(&self.ts_characters)]),
        ]
    }

    /// Simplified → Traditional (Taiwan): the Traditional stages plus the
    /// Taiwan variant pass.
    pub fn s2tw_chain(&self) -> Vec<DictionaryGroup> {
        vec![
            DictionaryGroup::new(vec![Arc::clone(&self.st_phrases)]),
            DictionaryGroup::new(vec![Arc::clone(&self.st_characters)]),
            DictionaryGroup::new(vec![Arc::clone(&self.tw_variants)]),
        ]
    }

    /// Traditional (Taiwan) → Simplified: undo the variants, then simplify.
    pub fn tw2s_chain(&self) -> Vec<DictionaryGroup> {
        vec![
            DictionaryGroup::new(vec![Arc::clone(&self.tw_variants_rev)]),
            DictionaryGroup::new(vec![Arc::clone(&self.ts_phrases)]),
            DictionaryGroup::new(vec![Arc::clone(&self.ts_characters)]),
        ]
    }

    /// Builds the chain for a conversion configuration name.
    ///
    /// Supported configurations (case-insensitive):
    ///
    /// | Config | Description                               |
    /// |--------|-------------------------------------------|
    /// | `s2t`  | Simplified Chinese → Traditional Chinese  |
    /// | `t2s`  | Traditional Chinese → Simplified Chinese  |
    /// | `s2tw` | Simplified Chinese → Traditional (Taiwan) |
    /// | `tw2s` | Traditional (Taiwan) → Simplified Chinese |
    ///
    /// Returns `None` for an unknown configuration.
    pub fn chain(&self, config: &str) -> Option<Vec<DictionaryGroup>> {
        match config.to_lowercase().as_str() {
            "s2t" => Some(self.s2t_chain()),
            "t2s" => Some(self.t2s_chain()),
            "s2tw" => Some(self.s2tw_chain()),
            "tw2s" => Some(self.tw2s_chain()),
            _ => None,
        }
    }
}
