use std::fs;
use std::process;

use katsuyo_core::progress::{ProgressError, ProgressStore};
use katsuyo_core::settings::Settings;
use tracing::info;

use super::progress_ops::store_for;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", katsuyo_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        katsuyo_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: display.mode={}, quiz.question_count={}, audio.volume={}, grading.smart_grading={}",
        s.display.mode, s.quiz.question_count, s.audio.volume, s.grading.smart_grading
    );
}

/// Load the stored settings, change `key`, and write them back.
pub fn apply_setting(
    store: &ProgressStore,
    key: &str,
    value: &str,
) -> Result<Settings, ProgressError> {
    let settings = store.load_settings()?.with_value(key, value)?;
    store.save_settings(&settings)?;
    info!(key, value, path = %store.settings_path().display(), "setting saved");
    Ok(settings)
}

pub fn settings_set(data_dir: Option<&str>, key: &str, value: &str) {
    let store = store_for(data_dir);
    die!(apply_setting(&store, key, value), "Error: {}");
    println!("{key} = {value}");
}
