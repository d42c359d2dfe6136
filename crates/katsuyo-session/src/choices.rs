use rand::seq::SliceRandom;
use rand::Rng;

use katsuyo_core::conjugator::conjugate;
use katsuyo_core::grading::normalize_answer;
use katsuyo_core::lexicon::LexicalEntry;
use katsuyo_core::settings::DisplayMode;

use crate::types::{Direction, Question, MAX_DISTRACTORS};

/// Dictionary form as displayed in `mode`, falling back to kana.
pub(crate) fn dictionary_display(entry: &LexicalEntry, mode: DisplayMode) -> &str {
    match mode {
        DisplayMode::Kanji if entry.has_kanji() => &entry.kanji,
        _ => &entry.kana,
    }
}

/// What `entry` would contribute as an option for `question`. `None` when the
/// entry cannot be conjugated into the question's form.
fn option_for(entry: &LexicalEntry, question: &Question, mode: DisplayMode) -> Option<String> {
    match question.direction {
        Direction::DictToConj => conjugate(entry, question.form)
            .ok()
            .map(|c| c.display(mode).to_string()),
        Direction::ConjToDict => Some(dictionary_display(entry, mode).to_string()),
    }
}

/// Shuffled options: `correct` plus up to three distractors drawn from
/// `pool`, none equal to another after normalization.
pub(crate) fn build_choices<R: Rng>(
    pool: &[LexicalEntry],
    question: &Question,
    correct: &str,
    mode: DisplayMode,
    rng: &mut R,
) -> Vec<String> {
    let mut seen = vec![normalize_answer(correct)];
    let mut options = vec![correct.to_string()];

    let mut candidates: Vec<&LexicalEntry> = pool.iter().collect();
    candidates.shuffle(rng);
    for entry in candidates {
        if options.len() > MAX_DISTRACTORS {
            break;
        }
        if entry.id == question.entry.id {
            continue;
        }
        let Some(option) = option_for(entry, question, mode) else {
            continue;
        };
        let key = normalize_answer(&option);
        if key.is_empty() || seen.contains(&key) {
            continue;
        }
        seen.push(key);
        options.push(option);
    }

    options.shuffle(rng);
    options
}
