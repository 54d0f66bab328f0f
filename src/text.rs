use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Direction;

/// HTML-escaped `<br>` tags, as they sometimes come back inside answer text.
static ESCAPED_BR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)&lt;\s*br\s*/?&gt;").unwrap());
/// Literal `<br>` tags, case-insensitive, optional self-closing slash.
static LITERAL_BR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<\s*br\s*/?>").unwrap());
/// Three or more consecutive newlines.
static EXTRA_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Decides the rendering direction of a piece of text by counting characters
/// from right-to-left scripts (Arabic/Persian blocks and extensions) against
/// ASCII Latin letters. Ties and all-neutral text fall back to `rtl`, the
/// primary language of the UI.
pub fn detect_direction(text: &str) -> Direction {
    let mut rtl_count = 0usize;
    let mut ltr_count = 0usize;

    for ch in text.chars() {
        match ch {
            '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}' | '\u{08A0}'..='\u{08FF}' => {
                rtl_count += 1;
            }
            'A'..='Z' | 'a'..='z' => ltr_count += 1,
            _ => {}
        }
    }

    if ltr_count > rtl_count {
        Direction::Ltr
    } else {
        Direction::Rtl
    }
}

/// Rewrites answer text into a canonical displayable form: `<br>` tags
/// (escaped or literal) become newlines, and any run of 3+ newlines collapses
/// to exactly two. Idempotent.
pub fn normalize_answer(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let unescaped = ESCAPED_BR.replace_all(text, "\n");
    let unbroken = LITERAL_BR.replace_all(&unescaped, "\n");
    EXTRA_NEWLINES.replace_all(&unbroken, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_text_defaults_to_rtl() {
        assert_eq!(detect_direction(""), Direction::Rtl);
        assert_eq!(detect_direction("123 456 !?"), Direction::Rtl);
        assert_eq!(detect_direction("   \n\t"), Direction::Rtl);
    }

    #[test]
    fn equal_counts_resolve_to_rtl() {
        // One Persian letter vs one Latin letter.
        assert_eq!(detect_direction("سa"), Direction::Rtl);
        assert_eq!(detect_direction("abc سلام"), Direction::Rtl);
    }

    #[test]
    fn strict_majority_wins() {
        assert_eq!(detect_direction("hello سلام"), Direction::Ltr);
        assert_eq!(detect_direction("سلام عزیز ok"), Direction::Rtl);
        assert_eq!(detect_direction("hello"), Direction::Ltr);
        assert_eq!(detect_direction("سلام"), Direction::Rtl);
    }

    #[test]
    fn arabic_supplement_and_extended_blocks_count_as_rtl() {
        assert_eq!(detect_direction("\u{0750}\u{08A0}"), Direction::Rtl);
        assert_eq!(detect_direction("\u{0750}\u{08A0}x"), Direction::Rtl);
    }

    #[test]
    fn br_tags_become_newlines() {
        assert_eq!(normalize_answer("a<br/>b<BR>c"), "a\nb\nc");
        assert_eq!(normalize_answer("a< br />b"), "a\nb");
        assert_eq!(normalize_answer("a&lt;br/&gt;b&LT;BR&GT;c"), "a\nb\nc");
    }

    #[test]
    fn newline_runs_collapse_to_two() {
        assert_eq!(normalize_answer("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalize_answer("a\n\nb"), "a\n\nb");
        assert_eq!(normalize_answer("a<br><br><br>b"), "a\n\nb");
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in ["", "plain", "a<br/>b", "a\n\n\n\nb", "x&lt;br&gt;y\n\n\n"] {
            let once = normalize_answer(input);
            assert_eq!(normalize_answer(&once), once);
        }
    }

    #[test]
    fn empty_input_passes_through() {
        assert_eq!(normalize_answer(""), "");
    }
}
