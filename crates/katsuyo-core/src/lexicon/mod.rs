//! Pre-classified word lists the quiz draws from.
//!
//! Two pools (verbs, adjectives) are loaded once from JSON files. When the
//! files are unavailable a small built-in sample keeps the quiz usable.

mod entry;

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::conjugator::{conjugate, forms_for, ConjugationError};

use entry::EntryRecord;
pub use entry::{AdjectiveClass, LexicalEntry, PartOfSpeech, VerbClass, WordClass};

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON parse error: {0}")]
    Parse(String),
    #[error("{id}: unknown type/class {word_type:?}/{class:?}")]
    UnknownClass {
        id: String,
        word_type: String,
        class: String,
    },
    #[error("{id}: {reason}")]
    InvalidEntry { id: String, reason: String },
    #[error("duplicate id: {0}")]
    DuplicateId(String),
    #[error("{id}: expected a {expected} but found a {found}")]
    WrongPool {
        id: String,
        expected: PartOfSpeech,
        found: PartOfSpeech,
    },
}

/// A conjugation failure found while checking lexicon content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentWarning {
    pub id: String,
    pub error: ConjugationError,
}

/// Parse a JSON array of lexicon records.
pub fn parse_lexicon_json(json: &str) -> Result<Vec<LexicalEntry>, LexiconError> {
    let records: Vec<EntryRecord> =
        serde_json::from_str(json).map_err(|e| LexiconError::Parse(e.to_string()))?;
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(records.len());
    for rec in records {
        let entry = LexicalEntry::try_from(rec)?;
        if !seen.insert(entry.id.clone()) {
            return Err(LexiconError::DuplicateId(entry.id));
        }
        entries.push(entry);
    }
    Ok(entries)
}

/// Serialize entries back to the lexicon JSON format.
pub fn lexicon_to_json(entries: &[LexicalEntry]) -> Result<String, LexiconError> {
    let records: Vec<EntryRecord> = entries.iter().map(EntryRecord::from).collect();
    serde_json::to_string_pretty(&records).map_err(|e| LexiconError::Parse(e.to_string()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    pub verbs: Vec<LexicalEntry>,
    pub adjectives: Vec<LexicalEntry>,
}

impl Lexicon {
    /// Build a lexicon from two pools, checking each entry sits in the right
    /// pool and that ids are unique across both.
    pub fn new(
        verbs: Vec<LexicalEntry>,
        adjectives: Vec<LexicalEntry>,
    ) -> Result<Self, LexiconError> {
        check_pool(&verbs, PartOfSpeech::Verb)?;
        check_pool(&adjectives, PartOfSpeech::Adjective)?;
        let mut seen = HashSet::new();
        for e in verbs.iter().chain(&adjectives) {
            if !seen.insert(e.id.as_str()) {
                return Err(LexiconError::DuplicateId(e.id.clone()));
            }
        }
        Ok(Self { verbs, adjectives })
    }

    pub fn open(verbs_path: &Path, adjectives_path: &Path) -> Result<Self, LexiconError> {
        let verbs = parse_lexicon_json(&fs::read_to_string(verbs_path)?)?;
        let adjectives = parse_lexicon_json(&fs::read_to_string(adjectives_path)?)?;
        debug!(
            verbs = verbs.len(),
            adjectives = adjectives.len(),
            "lexicon loaded"
        );
        Self::new(verbs, adjectives)
    }

    /// Like [`Lexicon::open`], but falls back to [`Lexicon::sample`] on error.
    pub fn open_or_sample(verbs_path: &Path, adjectives_path: &Path) -> Self {
        match Self::open(verbs_path, adjectives_path) {
            Ok(lexicon) => lexicon,
            Err(e) => {
                warn!("could not load lexicon, using built-in sample: {e}");
                Self::sample()
            }
        }
    }

    /// Built-in fallback word list.
    pub fn sample() -> Self {
        use AdjectiveClass::{I, Na};
        use VerbClass::{Godan, Ichidan, Irregular};

        Self {
            verbs: vec![
                LexicalEntry::new("verb_001", "たべる", "食べる", WordClass::Verb(Ichidan), "to eat"),
                LexicalEntry::new("verb_002", "いく", "行く", WordClass::Verb(Godan), "to go"),
                LexicalEntry::new("verb_003", "する", "", WordClass::Verb(Irregular), "to do"),
            ],
            adjectives: vec![
                LexicalEntry::new(
                    "adj_001",
                    "きれい",
                    "",
                    WordClass::Adjective(Na),
                    "beautiful; clean",
                ),
                LexicalEntry::new("adj_002", "あたらしい", "新しい", WordClass::Adjective(I), "new"),
            ],
        }
    }

    pub fn pool(&self, pos: PartOfSpeech) -> &[LexicalEntry] {
        match pos {
            PartOfSpeech::Verb => &self.verbs,
            PartOfSpeech::Adjective => &self.adjectives,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LexicalEntry> {
        self.verbs.iter().chain(&self.adjectives)
    }

    pub fn get(&self, id: &str) -> Option<&LexicalEntry> {
        self.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.verbs.len() + self.adjectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Conjugate every entry in every form its class supports and collect the
    /// failures. An empty result means the content is clean.
    pub fn check(&self) -> Vec<ContentWarning> {
        let mut warnings = Vec::new();
        for entry in self.iter() {
            for &form in forms_for(entry.part_of_speech()) {
                if let Err(error) = conjugate(entry, form) {
                    warn!(id = %entry.id, "content warning: {error}");
                    warnings.push(ContentWarning {
                        id: entry.id.clone(),
                        error,
                    });
                }
            }
        }
        warnings
    }
}

fn check_pool(entries: &[LexicalEntry], expected: PartOfSpeech) -> Result<(), LexiconError> {
    for e in entries {
        let found = e.part_of_speech();
        if found != expected {
            return Err(LexiconError::WrongPool {
                id: e.id.clone(),
                expected,
                found,
            });
        }
    }
    Ok(())
}
