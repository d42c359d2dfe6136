//! Word list browsing: filter by star and text, then sort.

use std::cmp::Reverse;

use katsuyo_core::lexicon::{LexicalEntry, Lexicon, PartOfSpeech};
use katsuyo_core::progress::Stars;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowseSort {
    /// Lexicon order.
    #[default]
    Default,
    /// By reading.
    Alpha,
    /// Starred first, then by reading.
    Starred,
}

#[derive(Debug, Clone)]
pub struct BrowseQuery<'a> {
    pub pos: PartOfSpeech,
    pub starred_only: bool,
    /// Case-insensitive substring of kana, kanji or gloss. Empty matches all.
    pub search: &'a str,
    pub sort: BrowseSort,
}

pub fn browse<'a>(
    lexicon: &'a Lexicon,
    stars: &Stars,
    query: &BrowseQuery<'_>,
) -> Vec<&'a LexicalEntry> {
    let needle = query.search.trim().to_lowercase();
    let mut items: Vec<&LexicalEntry> = lexicon
        .pool(query.pos)
        .iter()
        .filter(|e| !query.starred_only || stars.is_starred(&e.id))
        .filter(|e| needle.is_empty() || matches_search(e, &needle))
        .collect();

    match query.sort {
        BrowseSort::Default => {}
        BrowseSort::Alpha => items.sort_by(|a, b| a.kana.cmp(&b.kana)),
        BrowseSort::Starred => {
            items.sort_by_key(|e| (Reverse(stars.is_starred(&e.id)), e.kana.clone()));
        }
    }
    items
}

fn matches_search(entry: &LexicalEntry, needle: &str) -> bool {
    let blob = format!("{} {} {}", entry.kana, entry.kanji, entry.gloss).to_lowercase();
    blob.contains(needle)
}
