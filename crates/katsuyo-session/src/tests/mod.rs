mod proptest_session;

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use katsuyo_core::conjugator::GrammaticalForm;
use katsuyo_core::grading::GradingOptions;
use katsuyo_core::lexicon::{AdjectiveClass, LexicalEntry, Lexicon, VerbClass, WordClass};
use katsuyo_core::settings::{DisplayMode, Settings};

use super::{AnswerType, Direction, Progress, QuestionMode, QuizSession, StudySetup, WordType};

pub(super) fn make_test_lexicon() -> Arc<Lexicon> {
    use AdjectiveClass::{I, Na};
    use VerbClass::{Godan, Ichidan, Irregular};
    let v = |id, kana, kanji, class| LexicalEntry::new(id, kana, kanji, WordClass::Verb(class), "");
    let a = |id, kana, kanji, class| {
        LexicalEntry::new(id, kana, kanji, WordClass::Adjective(class), "")
    };
    let lexicon = Lexicon::new(
        vec![
            v("v_taberu", "たべる", "食べる", Ichidan),
            v("v_iku", "いく", "行く", Godan),
            v("v_nomu", "のむ", "飲む", Godan),
            v("v_suru", "する", "", Irregular),
            v("v_kuru", "くる", "", Irregular),
        ],
        vec![
            a("a_kirei", "きれい", "", Na),
            a("a_atarashii", "あたらしい", "新しい", I),
            a("a_samui", "さむい", "寒い", I),
            a("a_ii", "いい", "", I),
        ],
    )
    .unwrap();
    Arc::new(lexicon)
}

/// Setup with a single fixed form so questions are predictable.
pub(super) fn setup(word_type: WordType, form: GrammaticalForm, count: usize) -> StudySetup {
    StudySetup {
        word_type,
        verb_forms: vec![form],
        adjective_forms: vec![form],
        question_mode: QuestionMode::Fixed(Direction::DictToConj),
        answer_type: AnswerType::Typing,
        display_mode: DisplayMode::Kana,
        question_count: count,
        starred_only: false,
        show_english: false,
    }
}

pub(super) fn start(setup: StudySetup) -> QuizSession<StdRng> {
    QuizSession::start(
        make_test_lexicon(),
        setup,
        GradingOptions::default(),
        Progress::default(),
        StdRng::seed_from_u64(7),
    )
    .unwrap()
}

#[test]
fn setup_from_default_settings() {
    let s = StudySetup::from_settings(&Settings::default());
    assert_eq!(s.question_count, 20);
    assert_eq!(s.verb_forms.len(), 4);
    assert!(!s.adjective_forms.contains(&GrammaticalForm::Present));
    assert_eq!(s.display_mode, DisplayMode::Kana);
}
