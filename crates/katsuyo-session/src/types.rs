use katsuyo_core::conjugator::GrammaticalForm;
use katsuyo_core::lexicon::{ContentWarning, LexicalEntry, PartOfSpeech};
use katsuyo_core::settings::{DisplayMode, Settings};

/// Options in a multiple-choice question: the answer plus up to this many
/// distractors.
pub(crate) const MAX_DISTRACTORS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordType {
    Verbs,
    Adjectives,
    Both,
}

impl WordType {
    pub fn includes(self, pos: PartOfSpeech) -> bool {
        matches!(
            (self, pos),
            (WordType::Both, _)
                | (WordType::Verbs, PartOfSpeech::Verb)
                | (WordType::Adjectives, PartOfSpeech::Adjective)
        )
    }
}

/// Which way a question runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Show the dictionary form, ask for the conjugation.
    DictToConj,
    /// Show the conjugation, ask for the dictionary form.
    ConjToDict,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::DictToConj => "Dict→Conj",
            Direction::ConjToDict => "Conj→Dict",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionMode {
    Fixed(Direction),
    /// Each question picks a direction at random.
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerType {
    Typing,
    MultipleChoice,
    /// Typed answers, with choices offered alongside.
    Both,
}

impl AnswerType {
    pub fn offers_choices(self) -> bool {
        !matches!(self, AnswerType::Typing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudySetup {
    pub word_type: WordType,
    pub verb_forms: Vec<GrammaticalForm>,
    pub adjective_forms: Vec<GrammaticalForm>,
    pub question_mode: QuestionMode,
    pub answer_type: AnswerType,
    pub display_mode: DisplayMode,
    pub question_count: usize,
    pub starred_only: bool,
    pub show_english: bool,
}

impl StudySetup {
    /// Setup seeded from the user's saved settings: every form, dictionary →
    /// conjugation, typed answers.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            word_type: WordType::Verbs,
            verb_forms: GrammaticalForm::ALL.to_vec(),
            adjective_forms: vec![
                GrammaticalForm::Negative,
                GrammaticalForm::Past,
                GrammaticalForm::PastNegative,
            ],
            question_mode: QuestionMode::Fixed(Direction::DictToConj),
            answer_type: AnswerType::Typing,
            display_mode: settings.display.mode,
            question_count: settings.quiz.question_count,
            starred_only: settings.quiz.starred_only,
            show_english: settings.display.show_english,
        }
    }

    pub(crate) fn forms(&self, pos: PartOfSpeech) -> &[GrammaticalForm] {
        match pos {
            PartOfSpeech::Verb => &self.verb_forms,
            PartOfSpeech::Adjective => &self.adjective_forms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub entry: LexicalEntry,
    pub form: GrammaticalForm,
    pub direction: Direction,
    pub answered: bool,
    pub correct: bool,
}

/// Everything needed to show the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// e.g. "3/20 • Verb • Past (ました) • Dict→Conj"
    pub meta: String,
    pub text: String,
    pub subtitle: String,
    /// Accepted answers; the first is shown on a miss.
    pub expected: Vec<String>,
    /// Present when the answer type offers choices.
    pub choices: Option<Vec<String>>,
    pub starred: bool,
    /// Set when the entry could not be conjugated. The question is then not
    /// gradable.
    pub warning: Option<ContentWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect { canonical: String },
    /// Content bug: neither right nor wrong, and not counted.
    ContentWarning(ContentWarning),
}

impl Feedback {
    pub fn is_correct(&self) -> bool {
        matches!(self, Feedback::Correct)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub answered: usize,
    pub correct: usize,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("pick at least one verb form")]
    NoVerbForms,
    #[error("pick at least one adjective form")]
    NoAdjectiveForms,
    #[error("no items matched your selection")]
    EmptyPool,
    #[error("question count must be positive")]
    NoQuestions,
}
