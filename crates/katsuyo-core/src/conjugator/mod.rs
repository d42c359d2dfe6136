//! Polite-form conjugation of verbs and adjectives.
//!
//! `conjugate` derives the kana form and, when the kanji stem can be aligned,
//! the kanji form. Dispatch is an exhaustive match over word class and
//! grammatical form, so every (class, form) pair is either handled or
//! rejected explicitly.

mod adjective;
mod verb;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::lexicon::{LexicalEntry, PartOfSpeech, WordClass};
use crate::settings::DisplayMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammaticalForm {
    Present,
    Negative,
    Past,
    PastNegative,
}

impl GrammaticalForm {
    pub const ALL: [GrammaticalForm; 4] = [
        GrammaticalForm::Present,
        GrammaticalForm::Negative,
        GrammaticalForm::Past,
        GrammaticalForm::PastNegative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GrammaticalForm::Present => "present",
            GrammaticalForm::Negative => "negative",
            GrammaticalForm::Past => "past",
            GrammaticalForm::PastNegative => "past_negative",
        }
    }

    /// Human-readable label for quiz prompts.
    pub fn describe(self, pos: PartOfSpeech) -> &'static str {
        match (pos, self) {
            (PartOfSpeech::Verb, GrammaticalForm::Present) => "Present (ます)",
            (PartOfSpeech::Verb, GrammaticalForm::Negative) => "Negative (ません)",
            (PartOfSpeech::Verb, GrammaticalForm::Past) => "Past (ました)",
            (PartOfSpeech::Verb, GrammaticalForm::PastNegative) => "Past negative (ませんでした)",
            (PartOfSpeech::Adjective, GrammaticalForm::Present) => "Present",
            (PartOfSpeech::Adjective, GrammaticalForm::Negative) => "Negative",
            (PartOfSpeech::Adjective, GrammaticalForm::Past) => "Past",
            (PartOfSpeech::Adjective, GrammaticalForm::PastNegative) => "Past negative",
        }
    }
}

impl fmt::Display for GrammaticalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown grammatical form: {0}")]
pub struct ParseFormError(String);

impl FromStr for GrammaticalForm {
    type Err = ParseFormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(GrammaticalForm::Present),
            "negative" => Ok(GrammaticalForm::Negative),
            "past" => Ok(GrammaticalForm::Past),
            "past_negative" | "past-negative" => Ok(GrammaticalForm::PastNegative),
            _ => Err(ParseFormError(s.to_string())),
        }
    }
}

/// Forms a part of speech can be conjugated into. Adjectives have no distinct
/// present: the dictionary form already serves as non-past.
pub fn forms_for(pos: PartOfSpeech) -> &'static [GrammaticalForm] {
    static VERB_FORMS: [GrammaticalForm; 4] = GrammaticalForm::ALL;
    static ADJECTIVE_FORMS: [GrammaticalForm; 3] = [
        GrammaticalForm::Negative,
        GrammaticalForm::Past,
        GrammaticalForm::PastNegative,
    ];
    match pos {
        PartOfSpeech::Verb => &VERB_FORMS,
        PartOfSpeech::Adjective => &ADJECTIVE_FORMS,
    }
}

/// Content errors: the entry's declared class does not fit its spelling, or
/// the form does not exist for the class. Never a user mistake.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConjugationError {
    #[error("{class} {kana:?}: {reason}")]
    MalformedDictionaryForm {
        kana: String,
        class: WordClass,
        reason: &'static str,
    },
    #[error("{class} has no {form} form")]
    UnsupportedForm {
        class: WordClass,
        form: GrammaticalForm,
    },
}

/// A conjugated word. `kanji` is empty when no kanji form is available.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conjugation {
    pub kana: String,
    pub kanji: String,
}

impl Conjugation {
    /// Append `ending` to both stems. An empty kanji stem stays empty.
    fn from_stems(kana_stem: &str, kanji_stem: &str, ending: &str) -> Self {
        let kanji = if kanji_stem.is_empty() {
            String::new()
        } else {
            format!("{kanji_stem}{ending}")
        };
        Self {
            kana: format!("{kana_stem}{ending}"),
            kanji,
        }
    }

    pub fn has_kanji(&self) -> bool {
        !self.kanji.is_empty()
    }

    /// The string to show for `mode`, falling back to kana.
    pub fn display(&self, mode: DisplayMode) -> &str {
        match mode {
            DisplayMode::Kanji if self.has_kanji() => &self.kanji,
            _ => &self.kana,
        }
    }

    /// Accepted answers for grading: kana first (canonical), then kanji.
    pub fn accepted_answers(&self) -> Vec<String> {
        let mut answers = vec![self.kana.clone()];
        if self.has_kanji() {
            answers.push(self.kanji.clone());
        }
        answers
    }
}

/// Conjugate `entry` into the polite `form`.
pub fn conjugate(
    entry: &LexicalEntry,
    form: GrammaticalForm,
) -> Result<Conjugation, ConjugationError> {
    let _span = debug_span!("conjugate", id = %entry.id, %form).entered();
    let result = match entry.class {
        WordClass::Verb(class) => verb::conjugate_verb(entry, class, form),
        WordClass::Adjective(class) => adjective::conjugate_adjective(entry, class, form),
    };
    debug!(?result);
    result
}
