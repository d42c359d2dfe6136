//! Audio clip lookup keyed by entry id.
//!
//! Clips are named `<id>_<form>.<ext>` for a conjugated form, or `<id>.<ext>`
//! for the dictionary form. A form-specific clip is preferred; the bare id is
//! the fallback.

use std::path::{Path, PathBuf};

use katsuyo_core::conjugator::GrammaticalForm;

pub const AUDIO_EXTENSIONS: [&str; 4] = ["wav", "mp3", "m4a", "ogg"];

pub fn audio_base_names(id: &str, form: Option<GrammaticalForm>) -> Vec<String> {
    match form {
        Some(form) => vec![format!("{id}_{form}"), id.to_string()],
        None => vec![id.to_string()],
    }
}

/// Every path worth trying, in preference order.
pub fn audio_candidates(dir: &Path, id: &str, form: Option<GrammaticalForm>) -> Vec<PathBuf> {
    audio_base_names(id, form)
        .iter()
        .flat_map(|base| {
            AUDIO_EXTENSIONS
                .iter()
                .map(move |ext| dir.join(format!("{base}.{ext}")))
        })
        .collect()
}

/// First candidate that exists on disk.
pub fn resolve_audio(dir: &Path, id: &str, form: Option<GrammaticalForm>) -> Option<PathBuf> {
    audio_candidates(dir, id, form)
        .into_iter()
        .find(|p| p.is_file())
}

/// Conventional location shown next to an entry, e.g. `audio/verb_001_past.wav`.
pub fn primary_audio_path(id: &str, form: Option<GrammaticalForm>) -> PathBuf {
    let base = audio_base_names(id, form).swap_remove(0);
    Path::new("audio").join(format!("{base}.wav"))
}
