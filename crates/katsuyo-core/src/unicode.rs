//! Character-level helpers for kana strings.
//!
//! Conjugation works on characters, never bytes: every kana is three bytes in
//! UTF-8, so slicing by byte offset would split code points.

/// Check the full Hiragana block (U+3040..U+309F).
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Check the full Katakana block (U+30A0..U+30FF). Includes the prolonged
/// sound mark ー (U+30FC).
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
}

/// Check if a string is a valid phonetic spelling: non-empty, hiragana or
/// katakana only.
pub fn is_kana_reading(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| is_hiragana(c) || is_katakana(c))
}

/// Last character of `s`, if any.
pub fn last_char(s: &str) -> Option<char> {
    s.chars().next_back()
}

/// The trailing `n` characters of `s` (all of `s` if it is shorter).
pub fn char_suffix(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

/// `s` without its trailing `n` characters (empty if it is shorter).
pub fn drop_last_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return s;
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &s[..idx],
        None => "",
    }
}
