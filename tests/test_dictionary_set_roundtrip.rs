#[cfg(test)]
mod tests {
    use opencc_spseg::dictionary_lib::{DictionarySet, TextDictionary};
    use std::sync::Arc;

    type TestResult<T> = Result<T, Box<dyn std::error::Error>>;

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample_set() -> DictionarySet {
        DictionarySet {
            st_characters: Arc::new(TextDictionary::from_pairs(pairs(&[
                ("汉", "漢"),
                ("语", "語"),
                ("龙", "龍"),
            ]))),
            st_phrases: Arc::new(TextDictionary::from_pairs(pairs(&[
                ("汉语", "漢語"),
                ("龙马精神", "龍馬精神"),
            ]))),
            ts_characters: Arc::new(TextDictionary::from_pairs(pairs(&[
                ("漢", "汉"),
                ("語", "语"),
            ]))),
            ts_phrases: Arc::new(TextDictionary::from_pairs(pairs(&[("漢語", "汉语")]))),
            tw_variants: Arc::new(TextDictionary::from_pairs(pairs(&[("裡", "裏")]))),
            tw_variants_rev: Arc::new(TextDictionary::from_pairs(pairs(&[("裏", "裡")]))),
        }
    }

    /// Fixed order view over the six tables.
    fn all_tables(set: &DictionarySet) -> [&TextDictionary; 6] {
        [
            &set.st_characters,
            &set.st_phrases,
            &set.ts_characters,
            &set.ts_phrases,
            &set.tw_variants,
            &set.tw_variants_rev,
        ]
    }

    /// Structural stats compared across round-trips.
    fn collect_stats(set: &DictionarySet) -> Vec<(usize, usize)> {
        all_tables(set)
            .iter()
            .map(|table| (table.len(), table.max_key_length()))
            .collect()
    }

    #[test]
    fn roundtrip_cbor_file() -> TestResult<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("dictionary_set.cbor");

        let set = sample_set();
        set.serialize_to_cbor(&path)?;
        let roundtrip = DictionarySet::deserialize_from_cbor(&path)?;

        assert_eq!(collect_stats(&set), collect_stats(&roundtrip));

        // Lookups behave identically after the round-trip.
        let word: Vec<char> = "龙马精神".chars().collect();
        assert_eq!(
            roundtrip.st_phrases.match_longest(&word, 0),
            Some(("龍馬精神", 4))
        );
        Ok(())
    }

    #[test]
    fn roundtrip_compressed_zstd() -> TestResult<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("dictionary_set.zstd");

        let set = sample_set();
        set.save_compressed(&path)?;

        // The compressed file exists, is non-empty, and loads back intact.
        let metadata = std::fs::metadata(&path)?;
        assert!(metadata.len() > 0, "Compressed file should not be empty");

        let roundtrip = DictionarySet::load_compressed(&path)?;
        assert_eq!(collect_stats(&set), collect_stats(&roundtrip));
        Ok(())
    }

    #[test]
    fn roundtrip_single_table_json() -> TestResult<()> {
        let dict = TextDictionary::from_pairs(pairs(&[("你好", "您好"), ("你", "您")]));

        let json = serde_json::to_string(&dict)?;
        let roundtrip: TextDictionary = serde_json::from_str(&json)?;

        let before: Vec<(String, String)> = dict
            .entries()
            .map(|(k, v)| (k.iter().collect(), v.to_string()))
            .collect();
        let after: Vec<(String, String)> = roundtrip
            .entries()
            .map(|(k, v)| (k.iter().collect(), v.to_string()))
            .collect();

        assert_eq!(before, after);
        assert_eq!(dict.max_key_length(), roundtrip.max_key_length());
        Ok(())
    }
}
