//! Stateful quiz session over the conjugation engine.
//!
//! `QuizSession` owns the question list and the learner's stars and
//! statistics for the duration of a run. Progress goes in through
//! [`QuizSession::start`] and comes back out of
//! [`QuizSession::into_progress`]; nothing is global.

pub mod audio;
pub mod browse;
mod choices;
pub mod pool;
mod types;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, debug_span, warn};

use katsuyo_core::conjugator::conjugate;
use katsuyo_core::grading::{grade, GradingOptions, GradingRequest};
use katsuyo_core::lexicon::{ContentWarning, LexicalEntry, Lexicon, PartOfSpeech};
use katsuyo_core::progress::{Stars, Stats};

pub use pool::{build_pool, Task};
pub use types::{
    AnswerType, Direction, Feedback, Prompt, Question, QuestionMode, Score, SessionError,
    StudySetup, WordType,
};

use choices::{build_choices, dictionary_display};

/// Stars and statistics carried through a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    pub stars: Stars,
    pub stats: Stats,
}

pub struct QuizSession<R: Rng = StdRng> {
    lexicon: Arc<Lexicon>,
    setup: StudySetup,
    grading: GradingOptions,
    progress: Progress,
    questions: Vec<Question>,
    idx: usize,
    awaiting_next: bool,
    /// Multiple-choice options, keyed by the question index they were built for.
    choices: Option<(usize, Vec<String>)>,
    rng: R,
}

impl QuizSession<StdRng> {
    /// Start a session with an OS-seeded RNG.
    pub fn start_random(
        lexicon: Arc<Lexicon>,
        setup: StudySetup,
        grading: GradingOptions,
        progress: Progress,
    ) -> Result<Self, SessionError> {
        Self::start(lexicon, setup, grading, progress, StdRng::from_entropy())
    }
}

impl<R: Rng> QuizSession<R> {
    /// Draw `setup.question_count` questions (with replacement) from the
    /// matching pool.
    pub fn start(
        lexicon: Arc<Lexicon>,
        setup: StudySetup,
        grading: GradingOptions,
        progress: Progress,
        mut rng: R,
    ) -> Result<Self, SessionError> {
        let _span = debug_span!("start_session", count = setup.question_count).entered();
        if setup.question_count == 0 {
            return Err(SessionError::NoQuestions);
        }
        if setup.word_type.includes(PartOfSpeech::Verb) && setup.verb_forms.is_empty() {
            return Err(SessionError::NoVerbForms);
        }
        if setup.word_type.includes(PartOfSpeech::Adjective) && setup.adjective_forms.is_empty() {
            return Err(SessionError::NoAdjectiveForms);
        }

        let questions = {
            let pool = build_pool(&lexicon, &setup, &progress.stars);
            if pool.is_empty() {
                return Err(SessionError::EmptyPool);
            }
            debug!(pool = pool.len());
            (0..setup.question_count)
                .map(|_| {
                    let task = pool[rng.gen_range(0..pool.len())];
                    let direction = match setup.question_mode {
                        QuestionMode::Fixed(d) => d,
                        QuestionMode::Mixed if rng.gen_bool(0.5) => Direction::DictToConj,
                        QuestionMode::Mixed => Direction::ConjToDict,
                    };
                    Question {
                        entry: task.entry.clone(),
                        form: task.form,
                        direction,
                        answered: false,
                        correct: false,
                    }
                })
                .collect()
        };

        Ok(Self {
            lexicon,
            setup,
            grading,
            progress,
            questions,
            idx: 0,
            awaiting_next: false,
            choices: None,
            rng,
        })
    }

    pub fn setup(&self) -> &StudySetup {
        &self.setup
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.idx)
    }

    /// 0-based index of the current question.
    pub fn position(&self) -> usize {
        self.idx
    }

    pub fn is_finished(&self) -> bool {
        self.idx >= self.questions.len()
    }

    pub fn awaiting_next(&self) -> bool {
        self.awaiting_next
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn into_progress(self) -> Progress {
        self.progress
    }

    pub fn score(&self) -> Score {
        self.questions
            .iter()
            .filter(|q| q.answered)
            .fold(Score::default(), |mut s, q| {
                s.answered += 1;
                if q.correct {
                    s.correct += 1;
                }
                s
            })
    }

    /// Render the current question. `None` once the session is finished.
    pub fn prompt(&mut self) -> Option<Prompt> {
        let q = self.questions.get(self.idx)?;
        let mode = self.setup.display_mode;
        let pos = q.entry.part_of_speech();

        let mut subtitle = Vec::new();
        let (text, expected, warning, correct_option) = match conjugate(&q.entry, q.form) {
            Ok(c) => {
                let (text, expected, correct) = match q.direction {
                    Direction::DictToConj => {
                        subtitle.push("Answer: conjugation".to_string());
                        (
                            dictionary_display(&q.entry, mode).to_string(),
                            c.accepted_answers(),
                            c.display(mode).to_string(),
                        )
                    }
                    Direction::ConjToDict => {
                        subtitle.push("Answer: dictionary form".to_string());
                        (
                            c.display(mode).to_string(),
                            dictionary_answers(&q.entry),
                            dictionary_display(&q.entry, mode).to_string(),
                        )
                    }
                };
                (text, expected, None, Some(correct))
            }
            Err(error) => {
                warn!(id = %q.entry.id, "content warning: {error}");
                subtitle.push(format!("⚠ content warning: {error}"));
                let warning = ContentWarning {
                    id: q.entry.id.clone(),
                    error,
                };
                let text = dictionary_display(&q.entry, mode).to_string();
                (text, Vec::new(), Some(warning), None)
            }
        };

        if self.setup.show_english && !q.entry.gloss.is_empty() {
            subtitle.push(format!("EN: {}", q.entry.gloss));
        }

        let meta = format!(
            "{}/{} • {} • {} • {}",
            self.idx + 1,
            self.questions.len(),
            match pos {
                PartOfSpeech::Verb => "Verb",
                PartOfSpeech::Adjective => "Adjective",
            },
            q.form.describe(pos),
            q.direction.label()
        );
        let starred = self.progress.stars.is_starred(&q.entry.id);

        let choices = match correct_option {
            Some(correct) if self.setup.answer_type.offers_choices() => {
                Some(self.choices_for_current(&correct))
            }
            _ => None,
        };

        Some(Prompt {
            meta,
            text,
            subtitle: subtitle.join(" • "),
            expected,
            choices,
            starred,
            warning,
        })
    }

    /// Options for the current question, built once and then reused so a
    /// re-rendered prompt keeps the same order.
    fn choices_for_current(&mut self, correct: &str) -> Vec<String> {
        if let Some((idx, options)) = &self.choices {
            if *idx == self.idx {
                return options.clone();
            }
        }
        let q = &self.questions[self.idx];
        let pool = self.lexicon.pool(q.entry.part_of_speech());
        let options = build_choices(pool, q, correct, self.setup.display_mode, &mut self.rng);
        self.choices = Some((self.idx, options.clone()));
        options
    }

    /// Grade a typed answer. Returns `None` if the current question was
    /// already answered or the session is over.
    pub fn submit(&mut self, answer: &str) -> Option<Feedback> {
        if self.awaiting_next {
            return None;
        }
        let q = self.questions.get_mut(self.idx)?;
        let _span = debug_span!("submit", id = %q.entry.id, form = %q.form).entered();
        let pos = q.entry.part_of_speech();

        let expected = match q.direction {
            Direction::DictToConj => conjugate(&q.entry, q.form).map(|c| c.accepted_answers()),
            // The conjugation is still computed: a broken entry must not be
            // graded in either direction.
            Direction::ConjToDict => {
                conjugate(&q.entry, q.form).map(|_| dictionary_answers(&q.entry))
            }
        };
        self.awaiting_next = true;

        let expected = match expected {
            Ok(expected) => expected,
            Err(error) => {
                warn!("content warning: {error}");
                return Some(Feedback::ContentWarning(ContentWarning {
                    id: q.entry.id.clone(),
                    error,
                }));
            }
        };

        let correct = grade(&GradingRequest {
            raw_input: answer,
            accepted: &expected,
            part_of_speech: pos,
            form: q.form,
            options: self.grading,
        });
        q.answered = true;
        q.correct = correct;
        self.progress.stats.record(pos, q.form, correct);
        debug!(correct);

        Some(if correct {
            Feedback::Correct
        } else {
            Feedback::Incorrect {
                canonical: expected[0].clone(),
            }
        })
    }

    /// Answer with the `index`-th multiple-choice option of the last prompt.
    pub fn submit_choice(&mut self, index: usize) -> Option<Feedback> {
        let option = match &self.choices {
            Some((idx, options)) if *idx == self.idx => options.get(index)?.clone(),
            _ => return None,
        };
        self.submit(&option)
    }

    /// Move past an answered question. Returns `false` once the session is
    /// over, or if the current question has not been answered yet.
    pub fn advance(&mut self) -> bool {
        if !self.awaiting_next || self.is_finished() {
            return false;
        }
        self.awaiting_next = false;
        self.idx += 1;
        !self.is_finished()
    }

    /// Toggle the star on the current question's entry. Returns the new state.
    pub fn toggle_star(&mut self) -> Option<bool> {
        let id = &self.questions.get(self.idx)?.entry.id;
        Some(self.progress.stars.toggle(id))
    }

    /// Audio clip for the current question: the conjugated form's clip when
    /// the answer was a conjugation, otherwise the dictionary form's.
    pub fn current_audio(&self, audio_dir: &Path) -> Option<PathBuf> {
        let q = self.current_question()?;
        let form = match q.direction {
            Direction::DictToConj => Some(q.form),
            Direction::ConjToDict => None,
        };
        audio::resolve_audio(audio_dir, &q.entry.id, form)
    }
}

/// Accepted answers for a dictionary-form question: kana, then kanji.
fn dictionary_answers(entry: &LexicalEntry) -> Vec<String> {
    let mut answers = vec![entry.kana.clone()];
    if entry.has_kanji() {
        answers.push(entry.kanji.clone());
    }
    answers
}
