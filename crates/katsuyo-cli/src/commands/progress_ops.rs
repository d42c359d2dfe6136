use std::path::PathBuf;
use std::process;

use katsuyo_core::lexicon::{LexicalEntry, Lexicon, PartOfSpeech};
use katsuyo_core::progress::{PosStats, ProgressError, ProgressStore, Stars, Stats, Tally};
use katsuyo_session::audio::primary_audio_path;
use katsuyo_session::browse::{browse, BrowseQuery, BrowseSort};

use super::{column_width, pad};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn store_for(data_dir: Option<&str>) -> ProgressStore {
    let dir = data_dir
        .map(PathBuf::from)
        .unwrap_or_else(ProgressStore::default_dir);
    ProgressStore::new(dir)
}

fn percent(tally: &Tally) -> String {
    match tally.accuracy() {
        Some(a) => format!("{:.0}%", a * 100.0),
        None => "-".to_string(),
    }
}

/// Human-readable statistics, one line per part of speech and form.
pub fn stats_lines(stats: &Stats) -> Vec<String> {
    let mut lines = Vec::new();
    for (name, pos) in [("Verbs", PartOfSpeech::Verb), ("Adjectives", PartOfSpeech::Adjective)] {
        let bucket: &PosStats = stats.bucket(pos);
        lines.push(format!(
            "{name}: {}/{} ({})",
            bucket.total.correct,
            bucket.total.answered,
            percent(&bucket.total)
        ));
        let labels: Vec<&str> = bucket.per_form.keys().map(|f| f.describe(pos)).collect();
        let w = column_width(labels.iter().copied());
        for ((_, tally), label) in bucket.per_form.iter().zip(&labels) {
            lines.push(format!(
                "  {}  {}/{} ({})",
                pad(label, w),
                tally.correct,
                tally.answered,
                percent(tally)
            ));
        }
    }
    lines
}

pub fn stats_cmd(data_dir: Option<&str>, reset: bool, json: bool) {
    let store = store_for(data_dir);
    let mut stats = die!(store.load_stats(), "Error opening stats: {}");
    if reset {
        stats.reset();
        die!(store.save_stats(&stats), "Error saving stats: {}");
        println!("Stats reset");
        return;
    }
    if json {
        println!("{}", die!(serde_json::to_string_pretty(&stats), "Error: {}"));
        return;
    }
    for line in stats_lines(&stats) {
        println!("{line}");
    }
}

pub fn star_cmd(data_dir: Option<&str>, lexicon: &Lexicon, id: &str) {
    let Some(entry) = lexicon.get(id) else {
        eprintln!("Error: no entry with id {id:?}");
        process::exit(1);
    };
    let store = store_for(data_dir);
    let mut stars = die!(store.load_stars(), "Error opening stars: {}");
    let starred = stars.toggle(id);
    die!(store.save_stars(&stars), "Error saving stars: {}");
    let mark = if starred { "★" } else { "☆" };
    println!("{mark} {} {}", entry.kana, entry.kanji);
}

/// Drop every star on disk. Returns how many were removed.
pub fn reset_stars(store: &ProgressStore) -> Result<usize, ProgressError> {
    let mut stars = store.load_stars()?;
    let removed = stars.count();
    stars.clear();
    store.save_stars(&stars)?;
    Ok(removed)
}

pub fn star_reset_cmd(data_dir: Option<&str>) {
    let store = store_for(data_dir);
    let removed = die!(reset_stars(&store), "Error resetting stars: {}");
    println!("Removed {removed} stars");
}

pub struct ListOptions<'a> {
    pub pos: PartOfSpeech,
    pub starred_only: bool,
    pub search: &'a str,
    pub sort: BrowseSort,
}

pub fn list_cmd(data_dir: Option<&str>, lexicon: &Lexicon, opts: &ListOptions<'_>) {
    let store = store_for(data_dir);
    let stars = die!(store.load_stars(), "Error opening stars: {}");
    let items = browse(
        lexicon,
        &stars,
        &BrowseQuery {
            pos: opts.pos,
            starred_only: opts.starred_only,
            search: opts.search,
            sort: opts.sort,
        },
    );
    if items.is_empty() {
        println!("(empty)");
        return;
    }
    for line in list_lines(&items, &stars) {
        println!("{line}");
    }
    println!("---");
    println!("{} entries", items.len());
}

/// One aligned row per entry: star, id, kana, kanji, gloss, audio clip.
pub fn list_lines(items: &[&LexicalEntry], stars: &Stars) -> Vec<String> {
    let id_w = column_width(items.iter().map(|e| e.id.as_str()));
    let kana_w = column_width(items.iter().map(|e| e.kana.as_str()));
    let kanji_w = column_width(items.iter().map(|e| e.kanji.as_str()));
    let gloss_w = column_width(items.iter().map(|e| e.gloss.as_str()));
    items
        .iter()
        .map(|e| {
            let mark = if stars.is_starred(&e.id) { "★" } else { " " };
            format!(
                "{mark} {}  {}  {}  {}  {}",
                pad(&e.id, id_w),
                pad(&e.kana, kana_w),
                pad(&e.kanji, kanji_w),
                pad(&e.gloss, gloss_w),
                primary_audio_path(&e.id, None).display()
            )
        })
        .collect()
}
