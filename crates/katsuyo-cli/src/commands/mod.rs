pub mod config_ops;
pub mod conjugate_ops;
pub mod grade_ops;
pub mod lexicon_ops;
pub mod progress_ops;
pub mod quiz_ops;

use std::path::Path;

use unicode_width::UnicodeWidthStr;

use katsuyo_core::lexicon::{Lexicon, PartOfSpeech, WordClass};

/// Bad command-line value that clap could not reject on its own.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ArgError {
    #[error("unknown word class {0:?} (expected ichidan, godan, irregular, i or na)")]
    UnknownClass(String),
    #[error("unknown part of speech {0:?} (expected verb or adj)")]
    UnknownPos(String),
    #[error("--verbs and --adjectives must be given together")]
    HalfLexicon,
}

pub fn parse_class(class: &str) -> Result<WordClass, ArgError> {
    let class = class.trim().to_lowercase();
    WordClass::from_tags("verb", &class)
        .or_else(|| WordClass::from_tags("adj", &class))
        .ok_or(ArgError::UnknownClass(class))
}

pub fn parse_pos(pos: &str) -> Result<PartOfSpeech, ArgError> {
    match pos.trim().to_lowercase().as_str() {
        "verb" | "verbs" | "v" => Ok(PartOfSpeech::Verb),
        "adj" | "adjective" | "adjectives" | "a" => Ok(PartOfSpeech::Adjective),
        other => Err(ArgError::UnknownPos(other.to_string())),
    }
}

/// Lexicon from the two JSON lists, or the built-in sample when neither is given.
pub fn load_lexicon(verbs: Option<&str>, adjectives: Option<&str>) -> Result<Lexicon, String> {
    match (verbs, adjectives) {
        (Some(v), Some(a)) => {
            Lexicon::open(Path::new(v), Path::new(a)).map_err(|e| e.to_string())
        }
        (None, None) => Ok(Lexicon::sample()),
        _ => Err(ArgError::HalfLexicon.to_string()),
    }
}

/// Like [`load_lexicon`], but unreadable or invalid lists fall back to the
/// built-in sample with a warning.
pub fn load_lexicon_or_sample(
    verbs: Option<&str>,
    adjectives: Option<&str>,
) -> Result<Lexicon, String> {
    match (verbs, adjectives) {
        (Some(v), Some(a)) => Ok(Lexicon::open_or_sample(Path::new(v), Path::new(a))),
        _ => load_lexicon(verbs, adjectives),
    }
}

/// Left-align `s` to `width` terminal columns.
pub(crate) fn pad(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - w))
    }
}

/// Widest cell in a column, in terminal columns.
pub(crate) fn column_width<'a>(cells: impl IntoIterator<Item = &'a str>) -> usize {
    cells.into_iter().map(|c| c.width()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use katsuyo_core::lexicon::{AdjectiveClass, VerbClass};

    #[test]
    fn pad_counts_wide_chars() {
        assert_eq!(pad("たべる", 8), "たべる  ");
        assert_eq!(pad("abc", 2), "abc");
        assert_eq!(column_width(["食べました", "x"]), 10);
    }

    #[test]
    fn parse_args() {
        assert_eq!(parse_class("Godan"), Ok(WordClass::Verb(VerbClass::Godan)));
        assert_eq!(parse_class("na"), Ok(WordClass::Adjective(AdjectiveClass::Na)));
        assert!(parse_class("suru").is_err());
        assert_eq!(parse_pos("adj"), Ok(PartOfSpeech::Adjective));
        assert!(parse_pos("noun").is_err());
    }

    #[test]
    fn lexicon_paths_come_in_pairs() {
        assert_eq!(load_lexicon(None, None).unwrap(), Lexicon::sample());
        assert!(load_lexicon(Some("v.json"), None).is_err());
    }

    #[test]
    fn missing_lists_fall_back_to_sample() {
        let dir = tempfile::tempdir().unwrap();
        let v = dir.path().join("verbs.json");
        let a = dir.path().join("adjectives.json");
        let (v, a) = (v.to_str().unwrap(), a.to_str().unwrap());
        assert!(load_lexicon(Some(v), Some(a)).is_err());
        assert_eq!(load_lexicon_or_sample(Some(v), Some(a)).unwrap(), Lexicon::sample());
        assert!(load_lexicon_or_sample(None, Some(a)).is_err());
    }
}
