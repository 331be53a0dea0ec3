/// Characters that can make up a completable token.
///
/// Deliberately broader than natural-language word boundaries so that
/// identifiers, paths, and dotted or hyphenated names (`service-name`,
/// `module.submodule`, `/var/log`) complete as single units.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '/')
}

/// The partial word ending exactly at the cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenInfo {
    /// The token text (`text[start..end]`). May be empty.
    pub token: String,
    /// Byte offset of the first character of the token.
    pub start: usize,
    /// Byte offset of the cursor, clamped into the text.
    pub end: usize,
}

/// Find the partial word immediately left of `cursor`.
///
/// `cursor` is a byte offset; it is clamped into `[0, text.len()]` and
/// snapped down to a char boundary, so no input can panic. Only the run
/// of word characters immediately preceding the cursor is considered;
/// text after the cursor is never inspected, so accepting a completion
/// cannot overwrite characters typed after the caret.
pub fn detect(text: &str, cursor: usize) -> TokenInfo {
    let mut end = cursor.min(text.len());
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }

    // Word characters are all ASCII, so a byte-wise reverse scan is UTF-8
    // safe: continuation bytes (>= 0x80) never look like word characters,
    // and `start` always lands on a char boundary.
    let bytes = text.as_bytes();
    let mut start = end;
    while start > 0 && is_word_char(bytes[start - 1] as char) {
        start -= 1;
    }

    TokenInfo {
        token: text[start..end].to_string(),
        start,
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- word characters ---

    #[test]
    fn word_chars_include_identifier_punctuation() {
        for c in ['a', 'Z', '0', '9', '.', '_', '-', '/'] {
            assert!(is_word_char(c), "{c:?} should be a word char");
        }
    }

    #[test]
    fn word_chars_exclude_whitespace_and_symbols() {
        for c in [' ', '\t', '\n', '#', '@', '!', ',', ':', '(', '"'] {
            assert!(!is_word_char(c), "{c:?} should not be a word char");
        }
    }

    #[test]
    fn word_chars_exclude_non_ascii() {
        assert!(!is_word_char('é'));
        assert!(!is_word_char('你'));
    }

    // --- detection ---

    #[test]
    fn detects_trailing_hyphenated_token() {
        let info = detect("deploy to prod-", 15);
        assert_eq!(info.token, "prod-");
        assert_eq!(info.start, 10);
        assert_eq!(info.end, 15);
    }

    #[test]
    fn detects_token_mid_text() {
        // Cursor inside "bravo": only the part left of the cursor counts.
        let info = detect("alpha bravo charlie", 9);
        assert_eq!(info.token, "bra");
        assert_eq!(info.start, 6);
        assert_eq!(info.end, 9);
    }

    #[test]
    fn cursor_after_space_yields_empty_token() {
        let info = detect("alpha ", 6);
        assert_eq!(info.token, "");
        assert_eq!(info.start, 6);
        assert_eq!(info.end, 6);
    }

    #[test]
    fn path_completes_as_one_token() {
        let info = detect("see /var/log", 12);
        assert_eq!(info.token, "/var/log");
        assert_eq!(info.start, 4);
    }

    #[test]
    fn empty_text() {
        assert_eq!(detect("", 0), TokenInfo::default());
        assert_eq!(detect("", 10).end, 0);
    }

    #[test]
    fn cursor_clamped_to_len() {
        let info = detect("abc", 99);
        assert_eq!(info.token, "abc");
        assert_eq!(info.end, 3);
    }

    #[test]
    fn cursor_at_zero() {
        let info = detect("abc", 0);
        assert_eq!(info.token, "");
        assert_eq!(info.start, 0);
        assert_eq!(info.end, 0);
    }

    #[test]
    fn end_always_equals_clamped_cursor() {
        let text = "one two three";
        for cursor in 0..=text.len() + 3 {
            let info = detect(text, cursor);
            assert_eq!(info.end, cursor.min(text.len()));
            assert!(info.start <= info.end);
        }
    }

    #[test]
    fn non_ascii_neighbor_stops_the_scan() {
        // The multi-byte é must not be absorbed into the token.
        let text = "héllo";
        let info = detect(text, text.len());
        assert_eq!(info.token, "llo");
    }

    #[test]
    fn cursor_inside_multibyte_char_snaps_down() {
        let text = "日本 abc";
        // Byte 1 is inside 日 (3 bytes); must snap to a boundary, not panic.
        let info = detect(text, 1);
        assert_eq!(info.end, 0);
        assert_eq!(info.token, "");
    }

    #[test]
    fn mixed_unicode_text_detects_ascii_token() {
        let text = "메모 todo";
        let info = detect(text, text.len());
        assert_eq!(info.token, "todo");
        assert_eq!(info.end, text.len());
    }
}
