//! Learner progress: starred entries and answer statistics.
//!
//! Both are plain values owned by the caller. `ProgressStore` knows where they
//! live on disk; persistence itself is in `persistence.rs`.

mod persistence;
#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::conjugator::GrammaticalForm;
use crate::lexicon::PartOfSpeech;
use crate::settings::{load_settings, Settings, SettingsError};

const STARS_MAGIC: &[u8; 4] = b"KTST";
const STATS_MAGIC: &[u8; 4] = b"KTSS";
const VERSION: u8 = 1;

#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Set of starred entry ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stars {
    ids: BTreeSet<String>,
}

impl Stars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_starred(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Flip the star on `id`. Returns the new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Remove every star.
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub answered: u32,
    pub correct: u32,
}

impl Tally {
    fn record(&mut self, correct: bool) {
        self.answered = self.answered.saturating_add(1);
        if correct {
            self.correct = self.correct.saturating_add(1);
        }
    }

    /// Fraction answered correctly, or `None` before the first answer.
    pub fn accuracy(&self) -> Option<f64> {
        (self.answered > 0).then(|| f64::from(self.correct) / f64::from(self.answered))
    }
}

/// Answer counters for one part of speech.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosStats {
    pub total: Tally,
    pub per_form: BTreeMap<GrammaticalForm, Tally>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub verbs: PosStats,
    pub adjectives: PosStats,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, pos: PartOfSpeech, form: GrammaticalForm, correct: bool) {
        let bucket = self.bucket_mut(pos);
        bucket.total.record(correct);
        bucket.per_form.entry(form).or_default().record(correct);
    }

    pub fn bucket(&self, pos: PartOfSpeech) -> &PosStats {
        match pos {
            PartOfSpeech::Verb => &self.verbs,
            PartOfSpeech::Adjective => &self.adjectives,
        }
    }

    fn bucket_mut(&mut self, pos: PartOfSpeech) -> &mut PosStats {
        match pos {
            PartOfSpeech::Verb => &mut self.verbs,
            PartOfSpeech::Adjective => &mut self.adjectives,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// On-disk location of settings, stars and statistics.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    dir: PathBuf,
}

impl ProgressStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$HOME/.local/share/katsuyo`, or `/tmp/katsuyo` without a home.
    pub fn default_dir() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        Path::new(&home).join(".local").join("share").join("katsuyo")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join("settings.toml")
    }

    pub fn stars_path(&self) -> PathBuf {
        self.dir.join("stars.ktst")
    }

    pub fn stats_path(&self) -> PathBuf {
        self.dir.join("stats.ktss")
    }

    pub fn load_settings(&self) -> Result<Settings, ProgressError> {
        Ok(load_settings(&self.settings_path())?)
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<(), ProgressError> {
        Ok(settings.save(&self.settings_path())?)
    }

    pub fn load_stars(&self) -> Result<Stars, ProgressError> {
        Ok(Stars::open(&self.stars_path())?)
    }

    pub fn save_stars(&self, stars: &Stars) -> Result<(), ProgressError> {
        Ok(stars.save(&self.stars_path())?)
    }

    pub fn load_stats(&self) -> Result<Stats, ProgressError> {
        Ok(Stats::open(&self.stats_path())?)
    }

    pub fn save_stats(&self, stats: &Stats) -> Result<(), ProgressError> {
        Ok(stats.save(&self.stats_path())?)
    }
}
