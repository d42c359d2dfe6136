use super::{Conjugation, ConjugationError, GrammaticalForm};
use crate::lexicon::{AdjectiveClass, LexicalEntry, WordClass};
use crate::okurigana::resolve_stem;
use crate::unicode::drop_last_chars;

/// いい (good) conjugates from the stem of よい.
const II: &str = "いい";
const II_STEM: &str = "よ";

pub(super) fn conjugate_adjective(
    entry: &LexicalEntry,
    class: AdjectiveClass,
    form: GrammaticalForm,
) -> Result<Conjugation, ConjugationError> {
    let unsupported = || ConjugationError::UnsupportedForm {
        class: WordClass::Adjective(class),
        form,
    };
    match class {
        AdjectiveClass::I => {
            let ending = i_ending(form).ok_or_else(unsupported)?;
            let kana_base = if entry.kana == II {
                II_STEM
            } else {
                drop_last_chars(&entry.kana, 1)
            };
            Ok(Conjugation::from_stems(
                kana_base,
                &i_kanji_base(&entry.kanji, &entry.kana),
                ending,
            ))
        }
        AdjectiveClass::Na => {
            let ending = na_ending(form).ok_or_else(unsupported)?;
            Ok(Conjugation::from_stems(&entry.kana, &entry.kanji, ending))
        }
    }
}

fn i_kanji_base(kanji: &str, kana: &str) -> String {
    if kanji.is_empty() || kana == II {
        return String::new();
    }
    match kanji.strip_suffix('い') {
        Some(base) => base.to_string(),
        None => resolve_stem(kanji, kana, ""),
    }
}

fn i_ending(form: GrammaticalForm) -> Option<&'static str> {
    match form {
        GrammaticalForm::Present => None,
        GrammaticalForm::Negative => Some("くないです"),
        GrammaticalForm::Past => Some("かったです"),
        GrammaticalForm::PastNegative => Some("くなかったです"),
    }
}

fn na_ending(form: GrammaticalForm) -> Option<&'static str> {
    match form {
        GrammaticalForm::Present => None,
        GrammaticalForm::Negative => Some("じゃないです"),
        GrammaticalForm::Past => Some("でした"),
        GrammaticalForm::PastNegative => Some("じゃなかったです"),
    }
}
