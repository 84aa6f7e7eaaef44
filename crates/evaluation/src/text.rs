/// CJK unified ideographs: the URO block plus extension A. Matches the
/// character set produced by the zh-TW speech transcription path.
pub fn is_cjk(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}')
}

/// Script-aware word count.
///
/// Each CJK ideograph counts as one word on its own; ideographs are then
/// stripped and the remainder is whitespace-split for Latin-script words.
/// The two counts are additive, so mixed-script text is order-independent.
pub fn count_words(text: &str) -> usize {
    let cjk_count = text.chars().filter(|c| is_cjk(*c)).count();
    let stripped: String = text.chars().filter(|c| !is_cjk(*c)).collect();
    cjk_count + stripped.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_word_count() {
        assert_eq!(count_words("I led a team of five engineers"), 7);
        assert_eq!(count_words("  spaced   out   words  "), 3);
    }

    #[test]
    fn test_cjk_chars_count_individually() {
        assert_eq!(count_words("我帶領團隊"), 5);
        assert_eq!(count_words("當時"), 2);
    }

    #[test]
    fn test_mixed_script_is_additive() {
        // 4 ideographs + 2 Latin tokens
        assert_eq!(count_words("我使用 Rust 開發 backend"), 6);
    }

    #[test]
    fn test_mixed_script_order_independent() {
        assert_eq!(count_words("abc中def"), count_words("中abcdef"));
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t"), 0);
    }
}
