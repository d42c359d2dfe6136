//! Property-based tests for the quiz session.
//!
//! Drives a session with random action sequences and random seeds and checks
//! that scoring, statistics and option invariants hold after every step.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use katsuyo_core::conjugator::GrammaticalForm;
use katsuyo_core::grading::GradingOptions;

use super::{make_test_lexicon, setup};
use crate::{AnswerType, Feedback, Progress, QuestionMode, QuizSession, WordType};

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Action {
    Prompt,
    SubmitExpected,
    SubmitWrong,
    SubmitChoice(usize),
    Advance,
    ToggleStar,
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        5 => Just(Action::Prompt),
        4 => Just(Action::SubmitExpected),
        3 => Just(Action::SubmitWrong),
        3 => (0usize..5).prop_map(Action::SubmitChoice),
        6 => Just(Action::Advance),
        1 => Just(Action::ToggleStar),
    ]
}

fn arb_word_type() -> impl Strategy<Value = WordType> {
    prop::sample::select(vec![WordType::Verbs, WordType::Adjectives, WordType::Both])
}

fn new_session(seed: u64, word_type: WordType, count: usize) -> QuizSession<StdRng> {
    let mut s = setup(word_type, GrammaticalForm::Past, count);
    s.verb_forms = GrammaticalForm::ALL.to_vec();
    s.adjective_forms = GrammaticalForm::ALL[1..].to_vec();
    s.question_mode = QuestionMode::Mixed;
    s.answer_type = AnswerType::Both;
    QuizSession::start(
        make_test_lexicon(),
        s,
        GradingOptions::default(),
        Progress::default(),
        StdRng::seed_from_u64(seed),
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Execute and check
// ---------------------------------------------------------------------------

fn execute(session: &mut QuizSession<StdRng>, action: &Action) {
    match action {
        Action::Prompt => {
            let Some(prompt) = session.prompt() else {
                assert!(session.is_finished());
                return;
            };
            assert!(prompt.warning.is_none(), "test lexicon conjugates cleanly");
            let choices = prompt.choices.expect("answer type offers choices");
            assert!(!choices.is_empty() && choices.len() <= 4);
            assert!(
                choices.contains(&prompt.expected[0]),
                "{:?} missing {:?}",
                choices,
                prompt.expected[0]
            );
            let unique: HashSet<_> = choices.iter().collect();
            assert_eq!(unique.len(), choices.len());
        }
        Action::SubmitExpected => {
            let fresh = !session.awaiting_next() && !session.is_finished();
            let expected = session.prompt().map(|p| p.expected[0].clone());
            let feedback = session.submit(expected.as_deref().unwrap_or(""));
            if fresh {
                assert_eq!(feedback, Some(Feedback::Correct));
            } else {
                assert_eq!(feedback, None);
            }
        }
        Action::SubmitWrong => {
            let fresh = !session.awaiting_next() && !session.is_finished();
            let feedback = session.submit("まちがい");
            assert_eq!(feedback.is_some(), fresh);
            if let Some(feedback) = feedback {
                assert!(!feedback.is_correct());
            }
        }
        Action::SubmitChoice(i) => {
            session.submit_choice(*i);
        }
        Action::Advance => {
            let before = session.position();
            let was_awaiting = session.awaiting_next();
            session.advance();
            if was_awaiting {
                assert_eq!(session.position(), before + 1);
            } else {
                assert_eq!(session.position(), before);
            }
        }
        Action::ToggleStar => {
            let id = session.current_question().map(|q| q.entry.id.clone());
            let state = session.toggle_star();
            if let (Some(id), Some(state)) = (id, state) {
                assert_eq!(session.progress().stars.is_starred(&id), state);
            }
        }
    }
}

fn assert_invariants(session: &QuizSession<StdRng>, action: &Action) {
    assert!(
        session.position() <= session.questions().len(),
        "position out of range after {:?}",
        action
    );

    let score = session.score();
    let stats = &session.progress().stats;
    assert_eq!(
        score.answered,
        (stats.verbs.total.answered + stats.adjectives.total.answered) as usize,
        "score and stats disagree after {:?}",
        action
    );
    assert_eq!(
        score.correct,
        (stats.verbs.total.correct + stats.adjectives.total.correct) as usize
    );
    assert!(score.correct <= score.answered);

    if session.awaiting_next() {
        let q = session.current_question().expect("awaiting implies a question");
        assert!(q.answered, "awaiting_next without an answer after {:?}", action);
    }
    // Only questions before the cursor, or the current one once answered, are graded.
    for (i, q) in session.questions().iter().enumerate() {
        if i > session.position() {
            assert!(!q.answered);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn session_invariants_hold(
        seed in any::<u64>(),
        word_type in arb_word_type(),
        count in 1usize..8,
        actions in prop::collection::vec(arb_action(), 1..80),
    ) {
        let mut session = new_session(seed, word_type, count);
        for action in &actions {
            execute(&mut session, action);
            assert_invariants(&session, action);
        }
    }

    #[test]
    fn answering_everything_scores_full(
        seed in any::<u64>(),
        word_type in arb_word_type(),
        count in 1usize..10,
    ) {
        let mut session = new_session(seed, word_type, count);
        loop {
            let expected = session.prompt().unwrap().expected;
            prop_assert!(session.submit(expected.last().unwrap()).unwrap().is_correct());
            if !session.advance() {
                break;
            }
        }
        let score = session.score();
        prop_assert_eq!(score.answered, count);
        prop_assert_eq!(score.correct, count);
    }
}
