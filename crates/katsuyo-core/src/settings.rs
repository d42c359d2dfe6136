//! User settings loaded from TOML.
//!
//! - Default values are embedded via `include_str!("default_settings.toml")`
//! - Keys missing from a user file fall back to those defaults
//! - Settings are plain values handed to the session; nothing here is global

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::grading::GradingOptions;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("TOML serialize error: {0}")]
    Serialize(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Kana,
    Kanji,
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DisplayMode::Kana => "kana",
            DisplayMode::Kanji => "kanji",
        })
    }
}

impl FromStr for DisplayMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kana" => Ok(DisplayMode::Kana),
            "kanji" => Ok(DisplayMode::Kanji),
            _ => Err(SettingsError::InvalidValue {
                field: "display.mode".to_string(),
                reason: format!("expected \"kana\" or \"kanji\", got {s:?}"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub audio: AudioSettings,
    pub grading: GradingOptions,
    pub display: DisplaySettings,
    pub quiz: QuizSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    pub enabled: bool,
    pub volume: f64,
    pub autoplay: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub mode: DisplayMode,
    pub show_english: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSettings {
    pub question_count: usize,
    pub starred_only: bool,
}

impl Default for Settings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("embedded settings TOML must be valid")
    }
}

impl Settings {
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Serialize(e.to_string()))
    }

    /// Copy with one `section.field` key replaced. `value` is parsed as the
    /// type the key already holds, and the result is validated like a file.
    pub fn with_value(&self, key: &str, value: &str) -> Result<Settings, SettingsError> {
        let unknown = || SettingsError::InvalidValue {
            field: key.to_string(),
            reason: "unknown setting".to_string(),
        };
        let (section, field) = key.split_once('.').ok_or_else(unknown)?;
        let mut table: toml::Table =
            toml::from_str(&self.to_toml()?).map_err(|e| SettingsError::Parse(e.to_string()))?;
        let slot = table
            .get_mut(section)
            .and_then(toml::Value::as_table_mut)
            .and_then(|t| t.get_mut(field))
            .ok_or_else(unknown)?;
        match parse_like(slot, value) {
            Some(parsed) => *slot = parsed,
            None => {
                return Err(SettingsError::InvalidValue {
                    field: key.to_string(),
                    reason: format!("expected a {}, got {value:?}", slot.type_str()),
                })
            }
        }
        let content =
            toml::to_string(&table).map_err(|e| SettingsError::Serialize(e.to_string()))?;
        parse_settings_toml(&content)
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let content = self.to_toml()?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

/// Load settings from `path`, returning defaults if the file doesn't exist.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    match fs::read_to_string(path) {
        Ok(content) => parse_settings_toml(&content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(e) => Err(e.into()),
    }
}

/// Parse a (possibly partial) settings file layered over the defaults.
pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let mut merged: toml::Table = toml::from_str(DEFAULT_SETTINGS_TOML)
        .map_err(|e| SettingsError::Parse(e.to_string()))?;
    let user: toml::Table =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    merge_tables(&mut merged, user);
    let s: Settings = toml::Value::Table(merged)
        .try_into()
        .map_err(|e: toml::de::Error| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(base_inner)), toml::Value::Table(inner)) => {
                merge_tables(base_inner, inner);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn parse_like(current: &toml::Value, raw: &str) -> Option<toml::Value> {
    let raw = raw.trim();
    let value = match current {
        toml::Value::Boolean(_) => toml::Value::Boolean(raw.parse().ok()?),
        toml::Value::Integer(_) => toml::Value::Integer(raw.parse().ok()?),
        toml::Value::Float(_) => toml::Value::Float(raw.parse().ok()?),
        toml::Value::String(_) => toml::Value::String(raw.to_string()),
        _ => return None,
    };
    Some(value)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    if !(0.0..=1.0).contains(&s.audio.volume) {
        return Err(SettingsError::InvalidValue {
            field: "audio.volume".to_string(),
            reason: "must be between 0.0 and 1.0".to_string(),
        });
    }
    if s.quiz.question_count == 0 {
        return Err(SettingsError::InvalidValue {
            field: "quiz.question_count".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert!(s.audio.enabled);
        assert!((s.audio.volume - 0.9).abs() < f64::EPSILON);
        assert!(!s.audio.autoplay);
        assert!(s.grading.smart_grading);
        assert!(!s.grading.accept_dewa_arimasen);
        assert_eq!(s.display.mode, DisplayMode::Kana);
        assert!(!s.display.show_english);
        assert_eq!(s.quiz.question_count, 20);
        assert!(!s.quiz.starred_only);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let toml = r#"
[grading]
accept_dewa_arimasen = true

[display]
mode = "kanji"
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert!(s.grading.accept_dewa_arimasen);
        assert!(s.grading.smart_grading);
        assert_eq!(s.display.mode, DisplayMode::Kanji);
        assert_eq!(s.quiz.question_count, 20);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(parse_settings_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn error_volume_out_of_range() {
        let err = parse_settings_toml("[audio]\nvolume = 1.5\n").unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("audio.volume"));
    }

    #[test]
    fn error_zero_question_count() {
        let err = parse_settings_toml("[quiz]\nquestion_count = 0\n").unwrap_err();
        assert!(err.to_string().contains("quiz.question_count"));
    }

    #[test]
    fn error_unknown_display_mode() {
        let err = parse_settings_toml("[display]\nmode = \"romaji\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let mut s = Settings::default();
        s.quiz.question_count = 7;
        s.display.mode = DisplayMode::Kanji;
        let back = parse_settings_toml(&s.to_toml().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let mut s = Settings::default();
        s.audio.enabled = false;
        s.save(&path).unwrap();
        assert_eq!(load_settings(&path).unwrap(), s);
    }

    #[test]
    fn with_value_changes_one_key() {
        let s = Settings::default();
        let s = s.with_value("grading.smart_grading", "false").unwrap();
        let s = s.with_value("display.mode", "kanji").unwrap();
        let s = s.with_value("quiz.question_count", "5").unwrap();
        let s = s.with_value("audio.volume", "0.5").unwrap();
        assert!(!s.grading.smart_grading);
        assert_eq!(s.display.mode, DisplayMode::Kanji);
        assert_eq!(s.quiz.question_count, 5);
        assert!((s.audio.volume - 0.5).abs() < f64::EPSILON);
        assert!(s.audio.enabled);
    }

    #[test]
    fn with_value_rejects_bad_input() {
        let s = Settings::default();
        let err = s.with_value("quiz.nope", "1").unwrap_err();
        assert!(err.to_string().contains("unknown setting"));
        assert!(s.with_value("quiz", "1").is_err());
        let err = s.with_value("audio.enabled", "maybe").unwrap_err();
        assert!(err.to_string().contains("boolean"));
        let err = s.with_value("audio.volume", "2.0").unwrap_err();
        assert!(err.to_string().contains("audio.volume"));
        assert!(matches!(
            s.with_value("display.mode", "romaji"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn display_mode_from_str() {
        assert_eq!("kanji".parse::<DisplayMode>().unwrap(), DisplayMode::Kanji);
        assert!("romaji".parse::<DisplayMode>().is_err());
    }
}
