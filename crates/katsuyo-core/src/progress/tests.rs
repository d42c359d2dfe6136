use std::fs;

use super::*;

#[test]
fn test_toggle_star() {
    let mut stars = Stars::new();
    assert!(stars.toggle("verb_001"));
    assert!(stars.is_starred("verb_001"));
    assert_eq!(stars.count(), 1);
    assert!(!stars.toggle("verb_001"));
    assert!(!stars.is_starred("verb_001"));
    assert_eq!(stars.count(), 0);
}

#[test]
fn test_clear_stars() {
    let mut stars = Stars::new();
    stars.toggle("verb_001");
    stars.toggle("adj_002");
    stars.clear();
    assert_eq!(stars.count(), 0);
    assert!(!stars.is_starred("adj_002"));
    assert_eq!(stars, Stars::new());
}

#[test]
fn test_record_stats() {
    let mut stats = Stats::new();
    stats.record(PartOfSpeech::Verb, GrammaticalForm::Past, true);
    stats.record(PartOfSpeech::Verb, GrammaticalForm::Past, false);
    stats.record(PartOfSpeech::Adjective, GrammaticalForm::Negative, true);

    let verbs = stats.bucket(PartOfSpeech::Verb);
    assert_eq!(verbs.total, Tally { answered: 2, correct: 1 });
    assert_eq!(verbs.per_form[&GrammaticalForm::Past].answered, 2);
    assert_eq!(verbs.total.accuracy(), Some(0.5));
    assert!(!verbs.per_form.contains_key(&GrammaticalForm::Present));

    let adjs = stats.bucket(PartOfSpeech::Adjective);
    assert_eq!(adjs.total, Tally { answered: 1, correct: 1 });
}

#[test]
fn test_accuracy_before_answers() {
    assert_eq!(Tally::default().accuracy(), None);
}

#[test]
fn test_reset_stats() {
    let mut stats = Stats::new();
    stats.record(PartOfSpeech::Verb, GrammaticalForm::Present, true);
    stats.reset();
    assert_eq!(stats, Stats::new());
}

#[test]
fn test_serialize_roundtrip() {
    let mut stars = Stars::new();
    stars.toggle("adj_002");
    assert_eq!(Stars::from_bytes(&stars.to_bytes().unwrap()).unwrap(), stars);

    let mut stats = Stats::new();
    stats.record(PartOfSpeech::Adjective, GrammaticalForm::PastNegative, false);
    assert_eq!(Stats::from_bytes(&stats.to_bytes().unwrap()).unwrap(), stats);
}

#[test]
fn test_bad_magic() {
    let bytes = Stars::new().to_bytes().unwrap();
    let err = Stats::from_bytes(&bytes).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn test_corrupt_body() {
    let mut stats = Stats::new();
    stats.record(PartOfSpeech::Verb, GrammaticalForm::Past, true);
    let mut bytes = stats.to_bytes().unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    let err = Stats::from_bytes(&bytes).unwrap_err();
    assert!(err.to_string().contains("checksum"));
}

#[test]
fn test_too_short() {
    assert!(Stars::from_bytes(b"KTS").is_err());
}

#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProgressStore::new(dir.path().join("data"));

    let mut stars = Stars::new();
    stars.toggle("verb_002");
    store.save_stars(&stars).unwrap();

    let mut stats = Stats::new();
    stats.record(PartOfSpeech::Verb, GrammaticalForm::Negative, true);
    store.save_stats(&stats).unwrap();

    let mut settings = store.load_settings().unwrap();
    settings.grading.accept_dewa_arimasen = true;
    store.save_settings(&settings).unwrap();

    assert_eq!(store.load_stars().unwrap(), stars);
    assert_eq!(store.load_stats().unwrap(), stats);
    assert!(store.load_settings().unwrap().grading.accept_dewa_arimasen);
    assert!(!store.stars_path().with_extension("tmp").exists());
}

#[test]
fn test_open_nonexistent() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProgressStore::new(dir.path());
    assert_eq!(store.load_stars().unwrap().count(), 0);
    assert_eq!(store.load_stats().unwrap(), Stats::new());
}

#[test]
fn test_open_garbage_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProgressStore::new(dir.path());
    fs::write(store.stats_path(), b"not a stats file").unwrap();
    assert!(matches!(store.load_stats(), Err(ProgressError::Io(_))));
}
