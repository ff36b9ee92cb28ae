//! One conversion stage: an ordered list of alternative dictionaries plus the
//! cursor selecting which one the stage consults.

use crate::dictionary_lib::TextDictionary;
use std::sync::Arc;

/// An ordered list of [`TextDictionary`] alternatives with a `current` cursor.
///
/// A group represents one stage of a conversion chain. Only the dictionary at
/// `current` is consulted during conversion; switching the cursor is O(1) and
/// never touches the underlying dictionaries. Dictionaries are held through
/// [`Arc`] — they are read-only after load and may be shared by any number of
/// groups and converters. The cursor itself is the only mutable part, so a
/// group shared across threads needs its [`set_current`](Self::set_current)
/// calls serialized by the caller.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use opencc_spseg::dictionary_lib::{DictionaryGroup, TextDictionary};
///
/// let main = Arc::new(TextDictionary::from_pairs(vec![("你".into(), "您".into())]));
/// let alt = Arc::new(TextDictionary::from_pairs(vec![("你".into(), "妳".into())]));
///
/// let mut group = DictionaryGroup::new(vec![main, alt]);
/// assert_eq!(group.count(), 2);
///
/// let word: Vec<char> = "你".chars().collect();
/// assert_eq!(group.match_longest(&word, 0), Some(("您", 1)));
///
/// assert!(group.set_current(1));
/// assert_eq!(group.match_longest(&word, 0), Some(("妳", 1)));
///
/// let mut lengths = Vec::new();
/// assert_eq!(group.all_match_lengths(&word, &mut lengths), 1);
/// assert_eq!(lengths, vec![1]);
/// ```
#[derive(Debug, Clone)]
pub struct DictionaryGroup {
    dicts: Vec<Arc<TextDictionary>>,
    current: usize,
}

impl DictionaryGroup {
    /// Creates a group over `dicts` with the cursor at 0.
    pub fn new(dicts: Vec<Arc<TextDictionary>>) -> Self {
        DictionaryGroup { dicts, current: 0 }
    }

    /// Number of dictionaries in the group.
    pub fn count(&self) -> usize {
        self.dicts.len()
    }

    /// Index of the active dictionary.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Moves the cursor to `index`. Returns `false` (and leaves the cursor
    /// unchanged) when `index` is out of range.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.dicts.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// The active dictionary, or `None` for an empty group.
    pub fn current(&self) -> Option<&TextDictionary> {
        self.dicts.get(self.current).map(Arc::as_ref)
    }

    /// Delegates to [`TextDictionary::match_longest`] on the active dictionary.
    pub fn match_longest(&self, word: &[char], maxlen: usize) -> Option<(&str, usize)> {
        self.current().and_then(|dict| dict.match_longest(word, maxlen))
    }

    /// Delegates to [`TextDictionary::all_match_lengths`] on the active
    /// dictionary; clears `out` and returns 0 for an empty group.
    pub fn all_match_lengths(&self, word: &[char], out: &mut Vec<usize>) -> usize {
        match self.current() {
            Some(dict) => dict.all_match_lengths(word, out),
            None => {
                out.clear();
                0
            }
        }
    }
}
