#[cfg(test)]
mod tests {
    use opencc_spseg::dictionary_lib::{DictionaryError, TextDictionary};
    use std::io::Write;

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn entries_sorted_and_unique() {
        let dict = TextDictionary::from_pairs(pairs(&[
            ("b", "B1"),
            ("a", "A"),
            ("b", "B2"),
            ("ab", "AB"),
        ]));

        let keys: Vec<String> = dict.entries().map(|(k, _)| k.iter().collect()).collect();
        assert_eq!(keys, vec!["a", "ab", "b"]);
        assert_eq!(dict.len(), 3);

        // First-wins for the duplicate key.
        let word = chars("b");
        assert_eq!(dict.match_longest(&word, 0), Some(("B1", 1)));
    }

    #[test]
    fn match_longest_returns_longest() {
        let dict = TextDictionary::from_pairs(pairs(&[("a", "Z"), ("ab", "X"), ("abc", "Y")]));

        let word = chars("abcd");
        assert_eq!(dict.match_longest(&word, 0), Some(("Y", 3)));
    }

    #[test]
    fn match_longest_respects_maxlen() {
        let dict = TextDictionary::from_pairs(pairs(&[("a", "Y"), ("abc", "X")]));

        let word = chars("abcd");
        assert_eq!(dict.match_longest(&word, 2), Some(("Y", 1)));
        assert_eq!(dict.match_longest(&word, 3), Some(("X", 3)));
        // maxlen 0 means the whole word.
        assert_eq!(dict.match_longest(&word, 0), Some(("X", 3)));
    }

    #[test]
    fn match_longest_caps_at_word_length() {
        let dict = TextDictionary::from_pairs(pairs(&[("abc", "X"), ("ab", "Y")]));

        let word = chars("ab");
        assert_eq!(dict.match_longest(&word, 9), Some(("Y", 2)));
    }

    #[test]
    fn match_longest_no_hit_is_none() {
        let dict = TextDictionary::from_pairs(pairs(&[("a", "A")]));

        assert_eq!(dict.match_longest(&chars("zzz"), 0), None);
        assert_eq!(dict.match_longest(&[], 0), None);
    }

    #[test]
    fn all_match_lengths_descending_exact() {
        let dict = TextDictionary::from_pairs(pairs(&[
            ("a", "1"),
            ("abc", "3"),
            ("abcde", "5"),
            ("zz", "0"),
        ]));

        let mut lengths = Vec::new();
        let count = dict.all_match_lengths(&chars("abcdef"), &mut lengths);
        assert_eq!(count, 3);
        assert_eq!(lengths, vec![5, 3, 1]);

        // Reused scratch is overwritten, not appended to.
        let count = dict.all_match_lengths(&chars("zz"), &mut lengths);
        assert_eq!(count, 1);
        assert_eq!(lengths, vec![2]);

        let count = dict.all_match_lengths(&chars("q"), &mut lengths);
        assert_eq!(count, 0);
        assert!(lengths.is_empty());
    }

    #[test]
    fn max_key_length_tracks_longest() {
        let dict = TextDictionary::from_pairs(pairs(&[("a", "A"), ("abcd", "D")]));
        assert_eq!(dict.max_key_length(), 4);

        let empty = TextDictionary::from_pairs(Vec::new());
        assert_eq!(empty.max_key_length(), 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn from_text_ignores_extra_fields() {
        let dict = TextDictionary::from_text("汉 漢 ignored tail\n语\t語\n").unwrap();

        assert_eq!(dict.len(), 2);
        assert_eq!(dict.match_longest(&chars("汉"), 0), Some(("漢", 1)));
        assert_eq!(dict.match_longest(&chars("语"), 0), Some(("語", 1)));
    }

    #[test]
    fn from_text_rejects_empty_line() {
        let result = TextDictionary::from_text("a A\n\nb B\n");
        assert!(matches!(result, Err(DictionaryError::ParseError(_))));
    }

    #[test]
    fn from_text_rejects_missing_value() {
        let result = TextDictionary::from_text("a A\nb\n");
        assert!(matches!(result, Err(DictionaryError::ParseError(_))));
    }

    #[test]
    fn from_text_strips_bom() {
        let dict = TextDictionary::from_text("\u{FEFF}a A\n").unwrap();
        assert_eq!(dict.match_longest(&chars("a"), 0), Some(("A", 1)));
    }

    #[test]
    fn open_missing_file_is_io_error() {
        let result = TextDictionary::open("no_such_dictionary.txt");
        assert!(matches!(result, Err(DictionaryError::IoError(_))));
    }

    #[test]
    fn open_invalid_utf8_is_encoding_error() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(b"\xff\xfe key value\n")
            .expect("Failed to write temp file");

        let result = TextDictionary::open(file.path());
        assert!(matches!(result, Err(DictionaryError::EncodingError(_))));
    }

    #[test]
    fn open_loads_table() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        file.write_all("你好 您好\n你 您\n".as_bytes())
            .expect("Failed to write temp file");

        let dict = TextDictionary::open(file.path()).expect("Failed to load dictionary");
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.max_key_length(), 2);
        assert_eq!(dict.match_longest(&chars("你好嗎"), 0), Some(("您好", 2)));
    }
}
