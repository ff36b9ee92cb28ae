//! Shortest-path segmentation over ambiguity windows.
//!
//! The segmenter turns a span of code points into dictionary keys and emits
//! their replacements. It works in two layers:
//!
//! - [`SpSegmenter::segment`] walks the input and grows a `bound` covering
//!   every match that overlaps the current region. When no match from an
//!   earlier position extends past the cursor, the ambiguity window is closed
//!   and handed to the shortest-path pass. Windows are therefore as small as
//!   the dictionary allows, which keeps the whole scan roughly linear.
//! - [`SpSegmenter::sp_seg`] resolves one window by dynamic programming over
//!   the match lengths at each position, choosing the segmentation with the
//!   fewest segments, then emits each segment's replacement.
//!
//! The DP scratch (`match_length`, `min_len`, `parent`, `path`) is owned by
//! the converter for its lifetime and grows by reallocation when a larger
//! window arrives.

use crate::dictionary_lib::TextDictionary;
use crate::ConvertError;

const SP_SEG_DEFAULT_BUFFER_SIZE: usize = 1024;

/// Bounded writer over a caller-supplied `char` slice.
///
/// Tracks how many code points have been written; callers check
/// [`remaining`](Self::remaining) before every write, so a push never runs
/// past the slice.
pub(crate) struct CharWriter<'a> {
    buf: &'a mut [char],
    written: usize,
}

impl<'a> CharWriter<'a> {
    pub fn new(buf: &'a mut [char]) -> Self {
        CharWriter { buf, written: 0 }
    }

    /// Code points written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Free slots left in the underlying slice.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.written
    }

    fn push(&mut self, c: char) {
        self.buf[self.written] = c;
        self.written += 1;
    }

    fn push_str(&mut self, s: &str) {
        for c in s.chars() {
            self.push(c);
        }
    }
}

/// Per-converter scratch arena for the shortest-path pass.
pub(crate) struct SpSegmenter {
    buffer_size: usize,
    match_length: Vec<usize>,
    min_len: Vec<usize>,
    parent: Vec<usize>,
    path: Vec<usize>,
}

impl SpSegmenter {
    pub fn new() -> Self {
        let mut segmenter = SpSegmenter {
            buffer_size: 0,
            match_length: Vec::new(),
            min_len: Vec::new(),
            parent: Vec::new(),
            path: Vec::new(),
        };
        segmenter.set_buffer_size(SP_SEG_DEFAULT_BUFFER_SIZE);
        segmenter
    }

    fn set_buffer_size(&mut self, buffer_size: usize) {
        self.buffer_size = buffer_size;
        self.match_length = Vec::with_capacity(buffer_size);
        self.min_len = vec![0; buffer_size];
        self.parent = vec![0; buffer_size];
        self.path = vec![0; buffer_size];
    }

    /// Segments `input` window by window, writing replacements into `out`.
    ///
    /// Returns the number of input code points consumed. A window cut short by
    /// output exhaustion ends the call cleanly at the last complete segment
    /// boundary; [`ConvertError::OutputFull`] is reported only when nothing
    /// was consumed at all.
    pub fn segment(
        &mut self,
        dict: &TextDictionary,
        input: &[char],
        out: &mut CharWriter,
    ) -> Result<usize, ConvertError> {
        let mut consumed = 0usize;
        let mut start = 0usize;
        let mut bound = 0usize;

        let mut i = 0usize;
        while i < input.len() && out.remaining() > 0 {
            if i != 0 && i == bound {
                // No match starting in [start, i) reaches past i: the window
                // is maximal, resolve it.
                let window = &input[start..bound];
                let n = match self.sp_seg(dict, window, out) {
                    Ok(n) => n,
                    Err(ConvertError::OutputFull) if consumed > 0 => return Ok(consumed),
                    Err(err) => return Err(err),
                };
                if n == 0 {
                    return if consumed > 0 {
                        Ok(consumed)
                    } else {
                        Err(ConvertError::OutputFull)
                    };
                }
                consumed += n;
                if n < window.len() {
                    // Output filled; stopped at a segment boundary.
                    return Ok(consumed);
                }
                start = i;
            }

            let match_len = match dict.match_longest(&input[i..], 0) {
                Some((_, len)) => len,
                None => 1,
            };
            if i + match_len > bound {
                bound = i + match_len;
            }
            i += 1;
        }

        if start < input.len() && out.remaining() > 0 {
            let window = &input[start..bound];
            let n = match self.sp_seg(dict, window, out) {
                Ok(n) => n,
                Err(ConvertError::OutputFull) if consumed > 0 => return Ok(consumed),
                Err(err) => return Err(err),
            };
            if n == 0 {
                return if consumed > 0 {
                    Ok(consumed)
                } else {
                    Err(ConvertError::OutputFull)
                };
            }
            consumed += n;
        }

        Ok(consumed)
    }

    /// Resolves one ambiguity window with the fewest-segments criterion and
    /// emits the replacements.
    ///
    /// Returns the number of window code points consumed. When the output
    /// cannot hold a segment's replacement the call stops at the previous
    /// segment boundary, or fails with [`ConvertError::OutputFull`] if no
    /// segment was emitted yet.
    fn sp_seg(
        &mut self,
        dict: &TextDictionary,
        window: &[char],
        out: &mut CharWriter,
    ) -> Result<usize, ConvertError> {
        let length = window.len();

        // Single-character windows skip the DP entirely.
        if length == 1 {
            return match dict.match_longest(window, 1) {
                None => {
                    out.push(window[0]);
                    Ok(1)
                }
                Some((value, _)) => {
                    if value.chars().count() > out.remaining() {
                        return Err(ConvertError::OutputFull);
                    }
                    out.push_str(value);
                    Ok(1)
                }
            };
        }

        let needed = length + 1;
        if self.buffer_size < needed {
            self.set_buffer_size(needed);
        }

        for slot in self.min_len[..=length].iter_mut() {
            *slot = usize::MAX;
        }
        self.min_len[0] = 0;
        self.parent[0] = 0;

        for i in 0..length {
            dict.all_match_lengths(&window[i..], &mut self.match_length);
            // Descending order: the first entry is 1 only when it is the sole
            // match. Append the fallback single-character edge otherwise; a
            // duplicate 1 is harmless under the strict `<` update below.
            if self.match_length.first().copied() != Some(1) {
                self.match_length.push(1);
            }

            // Every node is reachable through the fallback edges, so
            // min_len[i] is finite by the time it is expanded.
            let candidate = self.min_len[i] + 1;
            for j in 0..self.match_length.len() {
                let k = self.match_length[j];
                let target = i + k;
                if k > 1 {
                    // `<=` lets a later multi-character edge win ties, keeping
                    // longer keys toward the right of the window.
                    if candidate <= self.min_len[target] {
                        self.min_len[target] = candidate;
                        self.parent[target] = i;
                    }
                } else if candidate < self.min_len[target] {
                    self.min_len[target] = candidate;
                    self.parent[target] = i;
                }
            }
        }

        // Walk parents back from the end; path ends up in increasing order.
        let segments = self.min_len[length];
        let mut node = length;
        let mut slot = segments;
        while node != 0 {
            slot -= 1;
            self.path[slot] = node;
            node = self.parent[node];
        }

        let mut consumed = 0usize;
        let mut begin = 0usize;
        for seg in 0..segments {
            let end = self.path[seg];

            match dict.match_longest(&window[consumed..], end - begin) {
                None => {
                    // Unmatched single code point flows through verbatim.
                    if out.remaining() == 0 {
                        if consumed > 0 {
                            break;
                        }
                        return Err(ConvertError::OutputFull);
                    }
                    out.push(window[consumed]);
                    consumed += 1;
                }
                Some((value, match_len)) => {
                    if value.chars().count() > out.remaining() {
                        if consumed > 0 {
                            break;
                        }
                        return Err(ConvertError::OutputFull);
                    }
                    out.push_str(value);
                    consumed += match_len;
                }
            }

            begin = end;
        }

        Ok(consumed)
    }
}
