use std::fmt;

use serde::{Deserialize, Serialize};

use super::LexiconError;
use crate::unicode::is_kana_reading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Verb,
    Adjective,
}

impl PartOfSpeech {
    pub fn as_str(self) -> &'static str {
        match self {
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerbClass {
    /// る-verbs: drop the final る.
    Ichidan,
    /// う-verbs: final kana shifts to the い row.
    Godan,
    /// する, くる and their compounds.
    Irregular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjectiveClass {
    I,
    Na,
}

/// Conjugation class, tagged by part of speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordClass {
    Verb(VerbClass),
    Adjective(AdjectiveClass),
}

impl WordClass {
    pub fn part_of_speech(self) -> PartOfSpeech {
        match self {
            WordClass::Verb(_) => PartOfSpeech::Verb,
            WordClass::Adjective(_) => PartOfSpeech::Adjective,
        }
    }

    /// Resolve the `type` / `class` pair used in lexicon files.
    pub fn from_tags(word_type: &str, class: &str) -> Option<Self> {
        let class = match (word_type, class) {
            ("verb", "ichidan") => WordClass::Verb(VerbClass::Ichidan),
            ("verb", "godan") => WordClass::Verb(VerbClass::Godan),
            ("verb", "irregular") => WordClass::Verb(VerbClass::Irregular),
            ("adj", "i") => WordClass::Adjective(AdjectiveClass::I),
            ("adj", "na") => WordClass::Adjective(AdjectiveClass::Na),
            _ => return None,
        };
        Some(class)
    }

    /// Inverse of [`WordClass::from_tags`].
    pub fn tags(self) -> (&'static str, &'static str) {
        match self {
            WordClass::Verb(VerbClass::Ichidan) => ("verb", "ichidan"),
            WordClass::Verb(VerbClass::Godan) => ("verb", "godan"),
            WordClass::Verb(VerbClass::Irregular) => ("verb", "irregular"),
            WordClass::Adjective(AdjectiveClass::I) => ("adj", "i"),
            WordClass::Adjective(AdjectiveClass::Na) => ("adj", "na"),
        }
    }
}

impl fmt::Display for WordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WordClass::Verb(VerbClass::Ichidan) => "ichidan verb",
            WordClass::Verb(VerbClass::Godan) => "godan verb",
            WordClass::Verb(VerbClass::Irregular) => "irregular verb",
            WordClass::Adjective(AdjectiveClass::I) => "i-adjective",
            WordClass::Adjective(AdjectiveClass::Na) => "na-adjective",
        };
        f.write_str(name)
    }
}

/// A pre-classified dictionary-form word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalEntry {
    /// Stable join key for stars, statistics and audio. Never reused.
    pub id: String,
    pub kana: String,
    /// Empty when the word is conventionally written in kana only.
    pub kanji: String,
    pub class: WordClass,
    pub gloss: String,
}

impl LexicalEntry {
    pub fn new(id: &str, kana: &str, kanji: &str, class: WordClass, gloss: &str) -> Self {
        Self {
            id: id.to_string(),
            kana: kana.to_string(),
            kanji: kanji.to_string(),
            class,
            gloss: gloss.to_string(),
        }
    }

    pub fn part_of_speech(&self) -> PartOfSpeech {
        self.class.part_of_speech()
    }

    pub fn has_kanji(&self) -> bool {
        !self.kanji.is_empty()
    }

    pub fn validate(&self) -> Result<(), LexiconError> {
        if self.id.is_empty() {
            return Err(LexiconError::InvalidEntry {
                id: self.kana.clone(),
                reason: "empty id".to_string(),
            });
        }
        if !is_kana_reading(&self.kana) {
            return Err(LexiconError::InvalidEntry {
                id: self.id.clone(),
                reason: format!("reading {:?} is not kana", self.kana),
            });
        }
        Ok(())
    }
}

/// On-disk record shape of a lexicon JSON file.
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct EntryRecord {
    pub id: String,
    pub jp_kana: String,
    #[serde(default)]
    pub jp_kanji: Option<String>,
    #[serde(default)]
    pub en: String,
    #[serde(rename = "type")]
    pub word_type: String,
    pub class: String,
}

impl TryFrom<EntryRecord> for LexicalEntry {
    type Error = LexiconError;

    fn try_from(rec: EntryRecord) -> Result<Self, Self::Error> {
        let class = WordClass::from_tags(&rec.word_type, &rec.class).ok_or_else(|| {
            LexiconError::UnknownClass {
                id: rec.id.clone(),
                word_type: rec.word_type.clone(),
                class: rec.class.clone(),
            }
        })?;
        let entry = LexicalEntry {
            id: rec.id,
            kana: rec.jp_kana.trim().to_string(),
            kanji: rec.jp_kanji.unwrap_or_default().trim().to_string(),
            class,
            gloss: rec.en,
        };
        entry.validate()?;
        Ok(entry)
    }
}

impl From<&LexicalEntry> for EntryRecord {
    fn from(entry: &LexicalEntry) -> Self {
        let (word_type, class) = entry.class.tags();
        EntryRecord {
            id: entry.id.clone(),
            jp_kana: entry.kana.clone(),
            jp_kanji: Some(entry.kanji.clone()),
            en: entry.gloss.clone(),
            word_type: word_type.to_string(),
            class: class.to_string(),
        }
    }
}
