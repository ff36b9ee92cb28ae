//! Sorted lexicon with longest-prefix lookup.
//!
//! This module defines [`TextDictionary`], the core dictionary structure used by
//! **opencc-spseg** for phrase lookup during segmentation.
//!
//! ## Overview
//!
//! `TextDictionary` stores `(key, value)` pairs as `(Box<[char]>, Box<str>)`,
//! kept sorted ascending by key under code-point lexicographic order, plus a
//! cached `max_key_length` (the longest key in code points). All lookups are
//! binary searches over the sorted table, probed from the longest viable
//! prefix length down to 1:
//!
//! - [`match_longest`](TextDictionary::match_longest) returns the single
//!   longest key that prefixes a word, together with its matched length.
//! - [`all_match_lengths`](TextDictionary::all_match_lengths) enumerates every
//!   prefix length that is a key, in descending order. The segmenter's
//!   single-character fallback check relies on that ordering.
//!
//! Dictionaries are immutable once built; the sorted order and the cached
//! maximum are established at construction and never change afterwards, which
//! is what makes sharing them across converters safe.
//!
//! ## Example
//! ```
//! use opencc_spseg::dictionary_lib::TextDictionary;
//!
//! let dict = TextDictionary::from_pairs(vec![
//!     ("你好".to_string(), "您好".to_string()),
//!     ("你".to_string(), "您".to_string()),
//! ]);
//!
//! let word: Vec<char> = "你好嗎".chars().collect();
//! let (value, len) = dict.match_longest(&word, 0).unwrap();
//! assert_eq!((value, len), ("您好", 2));
//!
//! let mut lengths = Vec::new();
//! dict.all_match_lengths(&word, &mut lengths);
//! assert_eq!(lengths, vec![2, 1]);
//! ```

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Print a developer note to **stderr** in *debug* builds; **no-op** in release.
///
/// This macro accepts the same syntax as [`eprintln!`], but it only emits output
/// when `cfg(debug_assertions)` is enabled. In release builds it expands to an
/// empty block, so it won't surprise end users.
///
/// # Examples
/// ```
/// use opencc_spseg::debug_note; // bring the macro into scope
///
/// // Shown during development (debug builds), silent in release:
/// debug_note!("duplicate key ignored (first-wins): key={}", "弁");
/// ```
#[macro_export]
macro_rules! debug_note {
    ($($arg:tt)*) => {
        #[allow(unused)]
        {
            if cfg!(debug_assertions) {
                eprintln!($($arg)*);
            }
        }
    };
}

/// A sorted key → value table of code-point strings.
///
/// Entries are held sorted ascending by key (lexicographic over `char`), with
/// unique keys and a cached maximum key length. Both lookup operations probe
/// candidate prefix lengths from longest to shortest, each probe being one
/// binary search over the table.
///
/// Built from pairs ([`from_pairs`](Self::from_pairs)), parsed from a text
/// table ([`from_text`](Self::from_text) / [`open`](Self::open)), or
/// deserialized through `serde` for CBOR/Zstd persistence.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct TextDictionary {
    /// Sorted `(key, value)` pairs. Keys are `Box<[char]>` so lookups compare
    /// code points directly without decoding.
    entries: Vec<(Box<[char]>, Box<str>)>,
    /// Length in code points of the longest key.
    max_key_length: usize,
}

impl TextDictionary {
    /// Builds a dictionary from `(key, value)` string pairs.
    ///
    /// Keys are decoded to code points, sorted, and deduplicated. Duplicate
    /// keys are **first-wins**: an identical duplicate is ignored silently,
    /// a conflicting one keeps the first value and prints a [`debug_note!`]
    /// in debug builds.
    ///
    /// ### Example
    /// ```
    /// use opencc_spseg::dictionary_lib::TextDictionary;
    ///
    /// let dict = TextDictionary::from_pairs(vec![
    ///     ("汉".to_string(), "漢".to_string()),
    ///     ("汉字".to_string(), "漢字".to_string()),
    /// ]);
    /// assert_eq!(dict.len(), 2);
    /// assert_eq!(dict.max_key_length(), 2);
    /// ```
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let entries: Vec<(Box<[char]>, Box<str>)> = pairs
            .into_iter()
            .map(|(k, v)| {
                let key: Box<[char]> = k.chars().collect::<Vec<_>>().into_boxed_slice();
                (key, v.into_boxed_str())
            })
            .collect();

        let mut dict = TextDictionary {
            entries,
            max_key_length: 0,
        };
        dict.normalize();
        dict
    }

    /// Parses a line-oriented dictionary table.
    ///
    /// One entry per line; fields are separated by whitespace, the first field
    /// is the key, the second the value, and any further fields are ignored.
    /// An empty line, or a line with fewer than two fields, is a
    /// [`DictionaryError::ParseError`]. A UTF-8 BOM on the first line is
    /// stripped.
    pub fn from_text(content: &str) -> Result<Self, DictionaryError> {
        let mut pairs: Vec<(String, String)> = Vec::new();

        for (lineno, raw_line) in content.lines().enumerate() {
            let mut line = raw_line;
            if lineno == 0 {
                if let Some(rest) = line.strip_prefix('\u{FEFF}') {
                    line = rest;
                }
            }

            let mut fields = line.split_whitespace();
            let (Some(key), Some(value)) = (fields.next(), fields.next()) else {
                return Err(DictionaryError::ParseError(format!(
                    "Line {} missing key/value fields",
                    lineno + 1
                )));
            };
            pairs.push((key.to_owned(), value.to_owned()));
        }

        Ok(Self::from_pairs(pairs))
    }

    /// Loads a dictionary from a text table file.
    ///
    /// The file must be UTF-8; undecodable bytes abort the load with
    /// [`DictionaryError::EncodingError`], a missing or unreadable file with
    /// [`DictionaryError::IoError`], and malformed content with
    /// [`DictionaryError::ParseError`]. No partially loaded dictionary is ever
    /// returned.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|err| {
            DictionaryError::IoError(format!("Failed to read {}: {}", path.display(), err))
        })?;
        let content = String::from_utf8(bytes).map_err(|err| {
            DictionaryError::EncodingError(format!(
                "{} is not valid UTF-8: {}",
                path.display(),
                err
            ))
        })?;
        Self::from_text(&content)
    }

    /// Restores the table invariants: non-empty keys, ascending sorted order,
    /// unique keys (first-wins), and a fresh `max_key_length`.
    ///
    /// Called by every constructor and after deserialization.
    pub(crate) fn normalize(&mut self) {
        self.entries.retain(|(k, _)| !k.is_empty());
        // Stable sort keeps the first occurrence of a duplicate key in front.
        self.entries.sort_by(|a, b| a.0.cmp(&b.0));
        self.entries.dedup_by(|dup, kept| {
            if dup.0 == kept.0 {
                if dup.1 != kept.1 {
                    debug_note!(
                        "duplicate key ignored (first-wins): key={:?}; kept={:?}, ignored={:?}",
                        kept.0,
                        kept.1,
                        dup.1
                    );
                }
                true
            } else {
                false
            }
        });
        self.max_key_length = self.entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    }

    /// Finds the longest key that prefixes `word` and returns its value with
    /// the matched length in code points.
    ///
    /// `maxlen` caps the probed length; `0` means "no cap beyond the word
    /// itself". Probing starts at `min(maxlen, max_key_length, word.len())`
    /// and walks down to 1, so the returned length is the **largest** prefix
    /// length that is a key.
    pub fn match_longest(&self, word: &[char], maxlen: usize) -> Option<(&str, usize)> {
        if self.entries.is_empty() || word.is_empty() {
            return None;
        }

        let maxlen = if maxlen == 0 { word.len() } else { maxlen };
        let mut len = maxlen.min(self.max_key_length).min(word.len());

        while len > 0 {
            let prefix = &word[..len];
            if let Ok(index) = self
                .entries
                .binary_search_by(|(key, _)| key.as_ref().cmp(prefix))
            {
                let value: &str = &self.entries[index].1;
                return Some((value, len));
            }
            len -= 1;
        }

        None
    }

    /// Collects every prefix length of `word` that is a key, in **descending**
    /// order, into `out`; returns the count.
    ///
    /// `out` is cleared first and reused across calls; the segmenter hands in
    /// its scratch vector. The descending order lets callers detect the
    /// presence of the length-1 entry by looking at the first element only
    /// when it is the sole match.
    pub fn all_match_lengths(&self, word: &[char], out: &mut Vec<usize>) -> usize {
        out.clear();

        if self.entries.is_empty() {
            return 0;
        }

        let mut len = self.max_key_length.min(word.len());
        while len > 0 {
            if self
                .entries
                .binary_search_by(|(key, _)| key.as_ref().cmp(&word[..len]))
                .is_ok()
            {
                out.push(len);
            }
            len -= 1;
        }

        out.len()
    }

    /// Iterates the sorted `(key, value)` pairs, e.g. for export.
    pub fn entries(&self) -> impl Iterator<Item = (&[char], &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length in code points of the longest key (`0` for an empty table).
    pub fn max_key_length(&self) -> usize {
        self.max_key_length
    }
}

/// Represents possible errors that can occur during dictionary loading,
/// parsing, or serialization.
///
/// # Variants
/// - `IoError(String)` — an error occurred during file access, reading, or writing.
/// - `ParseError(String)` — a table line or a serialized blob is malformed.
/// - `EncodingError(String)` — a dictionary file is not valid UTF-8.
#[derive(Debug)]
pub enum DictionaryError {
    IoError(String),
    ParseError(String),
    EncodingError(String),
}

impl fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionaryError::IoError(msg) => write!(f, "I/O Error: {}", msg),
            DictionaryError::ParseError(msg) => write!(f, "Parse Error: {}", msg),
            DictionaryError::EncodingError(msg) => write!(f, "Encoding Error: {}", msg),
        }
    }
}

impl Error for DictionaryError {}

impl From<io::Error> for DictionaryError {
    fn from(err: io::Error) -> Self {
        DictionaryError::IoError(err.to_string())
    }
}

impl From<serde_cbor::Error> for DictionaryError {
    fn from(err: serde_cbor::Error) -> Self {
        DictionaryError::ParseError(err.to_string())
    }
}
