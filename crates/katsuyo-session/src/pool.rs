use katsuyo_core::conjugator::GrammaticalForm;
use katsuyo_core::lexicon::{LexicalEntry, Lexicon, PartOfSpeech};
use katsuyo_core::progress::Stars;

use crate::types::StudySetup;

/// One (entry, form) pair a question can be drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task<'a> {
    pub entry: &'a LexicalEntry,
    pub form: GrammaticalForm,
}

/// Expand the selected pools into every (entry, form) pair the setup asks
/// for. Adjectives never get a present-tense task.
pub fn build_pool<'a>(lexicon: &'a Lexicon, setup: &StudySetup, stars: &Stars) -> Vec<Task<'a>> {
    let mut tasks = Vec::new();
    for pos in [PartOfSpeech::Verb, PartOfSpeech::Adjective] {
        if !setup.word_type.includes(pos) {
            continue;
        }
        for entry in lexicon.pool(pos) {
            if setup.starred_only && !stars.is_starred(&entry.id) {
                continue;
            }
            for &form in setup.forms(pos) {
                if pos == PartOfSpeech::Adjective && form == GrammaticalForm::Present {
                    continue;
                }
                tasks.push(Task { entry, form });
            }
        }
    }
    tasks
}
