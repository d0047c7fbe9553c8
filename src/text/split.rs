//! Tokenize text into wrappable units.

use regex::Regex;
use std::sync::LazyLock;

/// Characters that stay attached to the preceding unit and allow a break after them.
pub const BREAK_CHARS: &[char] = &['-', '/', '|', ';', ':', '&', '\u{2013}', '\u{2014}'];

const CJK: &str = r"\p{Han}\p{Hiragana}\p{Katakana}\p{Hangul}";

// One unit is either a single ideograph/kana/hangul syllable, or a run of
// other non-space characters ending at a break character (inclusive).
static UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    let breaks: String = BREAK_CHARS
        .iter()
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect();
    let word = format!(r"[^\s{CJK}{breaks}]");
    Regex::new(&format!(r"[{CJK}]|{word}*[{breaks}]+|{word}+")).expect("unit pattern is valid")
});

/// Split `text` into wrappable units, preserving order. Units never contain whitespace.
///
/// ```
/// use labelfit_rs::text::split;
/// assert_eq!(split("a well-known fact"), vec!["a", "well-", "known", "fact"]);
/// ```
pub fn split(text: &str) -> Vec<String> {
    split_spans(text)
        .into_iter()
        .map(|(start, end)| text[start..end].to_string())
        .collect()
}

/// Byte ranges of the units of `text`.
pub(crate) fn split_spans(text: &str) -> Vec<(usize, usize)> {
    UNIT_RE
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect()
}
