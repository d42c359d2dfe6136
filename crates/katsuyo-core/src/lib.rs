//! Polite-form conjugation engine for Japanese verbs and adjectives.
//!
//! The engine itself (`conjugator`, `okurigana`, `grading`) is pure. The
//! remaining modules provide the data it runs on: the lexicon, user settings,
//! and persisted progress (stars and statistics).

pub mod conjugator;
pub mod grading;
pub mod lexicon;
pub mod okurigana;
pub mod progress;
pub mod settings;
pub mod unicode;

pub use conjugator::{conjugate, Conjugation, ConjugationError, GrammaticalForm};
pub use grading::{grade, normalize_answer, GradingOptions, GradingRequest};
pub use lexicon::{AdjectiveClass, LexicalEntry, Lexicon, PartOfSpeech, VerbClass, WordClass};
