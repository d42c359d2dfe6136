//! Okurigana alignment between a kanji spelling and its kana reading.
//!
//! Mixed-script words carry their inflection in trailing kana (okurigana)
//! after a fixed kanji stem, e.g. 行く / いく. The stem boundary is not marked,
//! so it is inferred by matching the tail of the reading against the tail of
//! the kanji spelling.

use crate::unicode::char_suffix;

/// Longest kana tail matched against the kanji spelling. Tails are tried
/// longest first.
const MAX_SHARED_SUFFIX: usize = 2;

/// Strip the okurigana shared with `kana` from the end of `kanji` and append
/// `replacement`.
///
/// Returns an empty string when `kanji` is empty or when neither the last two
/// nor the last one character of `kana` ends `kanji`. Callers treat the empty
/// result as "no kanji form available".
pub fn resolve_stem(kanji: &str, kana: &str, replacement: &str) -> String {
    if kanji.is_empty() {
        return String::new();
    }
    for n in (1..=MAX_SHARED_SUFFIX).rev() {
        let suffix = char_suffix(kana, n);
        if suffix.is_empty() {
            continue;
        }
        if let Some(stem) = kanji.strip_suffix(suffix) {
            let mut out = String::with_capacity(stem.len() + replacement.len());
            out.push_str(stem);
            out.push_str(replacement);
            return out;
        }
    }
    String::new()
}
