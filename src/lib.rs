// Enable cfg badges on docs.rs (optional but nice)
#![cfg_attr(docsrs, feature(doc_cfg))]

//! OpenCC-style Chinese text converter using shortest-path segmentation.
//!
//! This crate provides segment-based conversion between Simplified and Traditional
//! Chinese. Input is segmented into dictionary keys by dynamic programming over
//! ambiguity windows (fewest segments wins), each key is replaced by its mapped
//! value, and multistage translation is supported by chaining dictionary groups
//! with double-buffered intermediate results.
//!
//! # Example
//! ```rust
//! use std::sync::Arc;
//! use opencc_spseg::{Converter, DictionaryGroup, TextDictionary};
//!
//! let phrases = Arc::new(TextDictionary::from_pairs(vec![
//!     ("汉字".to_string(), "漢字".to_string()),
//! ]));
//! let characters = Arc::new(TextDictionary::from_pairs(vec![
//!     ("汉".to_string(), "漢".to_string()),
//! ]));
//!
//! let mut converter = Converter::new();
//! converter.set_chain(vec![
//!     DictionaryGroup::new(vec![phrases]),
//!     DictionaryGroup::new(vec![characters]),
//! ]);
//! assert_eq!(converter.convert_string("汉字转换").unwrap(), "漢字转换");
//! ```
//!
//! Dictionaries are read-only after load and freely shared; a `Converter`
//! owns its segmentation scratch and is meant for single-threaded use.
use once_cell::sync::Lazy;
use rayon::prelude::*;
use std::fmt;
use std::mem;
use std::sync::Mutex;

/// Dictionary utilities: sorted lexicons, stage groups, and the standard table set.
pub mod dictionary_lib;
/// Shortest-path segmentation over ambiguity windows.
mod segmenter;

pub use crate::dictionary_lib::{DictionaryError, DictionaryGroup, DictionarySet, TextDictionary};

use crate::segmenter::{CharWriter, SpSegmenter};

/// Thread-safe holder for the last error message (if any).
static LAST_ERROR: Lazy<Mutex<Option<String>>> = Lazy::new(|| Mutex::new(None));

/// Error kinds reported by [`Converter::convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertError {
    /// The chain is empty, or a stage's group has no active dictionary.
    NoDict,
    /// The output buffer cannot hold even one emitted segment.
    OutputFull,
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::NoDict => write!(f, "No dictionary loaded"),
            ConvertError::OutputFull => write!(f, "Output buffer not enough for one segment"),
        }
    }
}

impl std::error::Error for ConvertError {}

/// Outcome of a successful [`Converter::convert`] call.
///
/// `consumed` counts input code points processed by the first stage — the
/// prefix the caller should treat as handled. `produced` counts code points
/// written by the last stage into the caller's output slice. A `consumed`
/// short of the input length is a clean partial result: the output filled and
/// the conversion stopped at a segment boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub consumed: usize,
    pub produced: usize,
}

/// Central interface for chained, segment-based text conversion.
///
/// A `Converter` holds a chain of [`DictionaryGroup`] stages and the scratch
/// buffers of the shortest-path segmenter. Each stage segments its input into
/// keys of the group's active dictionary and emits the mapped replacements;
/// stage outputs feed the next stage through two alternating scratch buffers.
///
/// The scratch is reused across calls and grows on demand, so a converter is
/// cheap to call repeatedly but must not be shared across threads. The
/// dictionaries themselves are immutable and freely shared.
pub struct Converter {
    /// Pipeline stages; each group contributes its active dictionary.
    chain: Vec<DictionaryGroup>,
    /// Shortest-path segmentation scratch, grown on demand.
    sp: SpSegmenter,
    /// Flag indicator for parallelism
    is_parallel: bool,
}

impl Converter {
    /// Creates a converter with an empty chain.
    ///
    /// Call [`set_chain`](Self::set_chain) before converting; a conversion
    /// without a chain fails with [`ConvertError::NoDict`].
    pub fn new() -> Self {
        Converter {
            chain: Vec::new(),
            sp: SpSegmenter::new(),
            is_parallel: true,
        }
    }

    /// Replaces the conversion chain.
    ///
    /// Each group is one pipeline stage; the stage consults the group's
    /// dictionary at its `current` cursor. Configure the cursors before
    /// converting — the pipeline never moves them.
    pub fn set_chain(&mut self, chain: Vec<DictionaryGroup>) {
        self.chain = chain;
    }

    /// The configured pipeline stages.
    pub fn chain(&self) -> &[DictionaryGroup] {
        &self.chain
    }

    /// Returns whether parallel code-point collection is currently enabled.
    ///
    /// # Example
    /// ```rust
    /// use opencc_spseg::Converter;
    /// let converter = Converter::new();
    /// assert_eq!(converter.get_parallel(), true);
    /// ```
    pub fn get_parallel(&self) -> bool {
        self.is_parallel
    }

    /// Sets whether [`convert_string`](Self::convert_string) collects code
    /// points with Rayon. Disable to reduce CPU usage on small strings or to
    /// avoid background threading.
    pub fn set_parallel(&mut self, is_parallel: bool) {
        self.is_parallel = is_parallel;
    }

    /// Runs the chain over `input`, writing replacements into `output`.
    ///
    /// On success returns the consumed/produced counts (see [`Conversion`]).
    /// A consumed count short of `input.len()` means the output filled and the
    /// conversion stopped cleanly at a segment boundary; call again with the
    /// unconsumed tail and a drained (or larger) output.
    ///
    /// # Errors
    /// - [`ConvertError::NoDict`] — empty chain, or a stage without an active
    ///   dictionary.
    /// - [`ConvertError::OutputFull`] — the output cannot hold even the first
    ///   segment's replacement; nothing was consumed, retry with a buffer of
    ///   at least the longest value's length.
    ///
    /// The error is also recorded in the last-error slot (see
    /// [`get_last_error`](Self::get_last_error)).
    pub fn convert(
        &mut self,
        input: &[char],
        output: &mut [char],
    ) -> Result<Conversion, ConvertError> {
        let result = self.run_chain(input, output);
        if let Err(err) = &result {
            Self::set_last_error(&err.to_string());
        }
        result
    }

    fn run_chain(
        &mut self,
        input: &[char],
        output: &mut [char],
    ) -> Result<Conversion, ConvertError> {
        if self.chain.is_empty() || self.chain.iter().any(|group| group.count() == 0) {
            return Err(ConvertError::NoDict);
        }

        let last = self.chain.len() - 1;
        let capacity = output.len();

        // Intermediate stages alternate between two owned buffers; the final
        // stage writes straight into the caller's slice, so no parity copy is
        // ever needed.
        let mut src: Vec<char> = Vec::new();
        let mut dst: Vec<char> = if last == 0 {
            Vec::new()
        } else {
            vec!['\0'; capacity]
        };

        let mut consumed = 0usize;
        let mut carried = 0usize;

        for (index, group) in self.chain[..last].iter().enumerate() {
            let Some(dict) = group.current() else {
                return Err(ConvertError::NoDict);
            };
            let stage_input: &[char] = if index == 0 { input } else { &src[..carried] };

            let mut out = CharWriter::new(&mut dst[..]);
            let stage_consumed = self.sp.segment(dict, stage_input, &mut out)?;
            if index == 0 {
                consumed = stage_consumed;
            }
            carried = out.written();

            mem::swap(&mut src, &mut dst);
            if dst.len() < capacity {
                dst.resize(capacity, '\0');
            }
        }

        let Some(dict) = self.chain[last].current() else {
            return Err(ConvertError::NoDict);
        };
        let stage_input: &[char] = if last == 0 { input } else { &src[..carried] };

        let mut out = CharWriter::new(output);
        let stage_consumed = self.sp.segment(dict, stage_input, &mut out)?;
        if last == 0 {
            consumed = stage_consumed;
        }

        Ok(Conversion {
            consumed,
            produced: out.written(),
        })
    }

    /// Converts a whole string, growing and draining output buffers as needed.
    ///
    /// This is the convenience driver over [`convert`](Self::convert): it
    /// collects the input into code points (with Rayon when parallel mode is
    /// on), then repeatedly converts, appends the produced text, and resumes
    /// from the unconsumed tail. An [`ConvertError::OutputFull`] answer grows
    /// the buffer and retries the same prefix.
    ///
    /// # Example
    /// ```rust
    /// use std::sync::Arc;
    /// use opencc_spseg::{Converter, DictionaryGroup, TextDictionary};
    ///
    /// let dict = Arc::new(TextDictionary::from_pairs(vec![
    ///     ("你好".to_string(), "您好".to_string()),
    /// ]));
    /// let mut converter = Converter::new();
    /// converter.set_chain(vec![DictionaryGroup::new(vec![dict])]);
    /// assert_eq!(converter.convert_string("你好，世界").unwrap(), "您好，世界");
    /// ```
    pub fn convert_string(&mut self, input: &str) -> Result<String, ConvertError> {
        if input.is_empty() {
            return Ok(String::new());
        }

        let chars: Vec<char> = if self.is_parallel {
            input.par_chars().collect()
        } else {
            input.chars().collect()
        };

        let mut output = vec!['\0'; (chars.len() * 2).max(16)];
        let mut result = String::with_capacity(input.len());
        let mut pos = 0usize;

        while pos < chars.len() {
            match self.convert(&chars[pos..], &mut output) {
                Ok(step) => {
                    result.extend(output[..step.produced].iter());
                    if step.consumed == 0 {
                        // No progress without an error: the output slice was
                        // too small to start a segment.
                        let grown = output.len() * 2;
                        output.resize(grown, '\0');
                        continue;
                    }
                    pos += step.consumed;
                }
                Err(ConvertError::OutputFull) => {
                    let grown = output.len() * 2;
                    output.resize(grown, '\0');
                }
                Err(err) => return Err(err),
            }
        }

        Ok(result)
    }

    /// Records an error message as the most recent conversion error.
    pub fn set_last_error(err_msg: &str) {
        let mut last_error = LAST_ERROR.lock().unwrap();
        *last_error = Some(err_msg.to_string());
    }

    /// Retrieves the most recently recorded error message, if any.
    ///
    /// # Example
    /// ```rust
    /// use opencc_spseg::Converter;
    /// if let Some(err) = Converter::get_last_error() {
    ///     eprintln!("conversion warning: {err}");
    /// }
    /// ```
    pub fn get_last_error() -> Option<String> {
        let last_error = LAST_ERROR.lock().unwrap();
        last_error.clone()
    }

    /// Prints `prefix` and the last recorded error message to standard error.
    pub fn perror(prefix: &str) {
        eprintln!("{}", prefix);
        if let Some(message) = Self::get_last_error() {
            eprintln!("{}", message);
        }
    }
}
