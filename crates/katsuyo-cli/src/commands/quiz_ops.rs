use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use rand::Rng;
use tracing::info;

use katsuyo_core::progress::ProgressStore;
use katsuyo_core::settings::DisplayMode;
use katsuyo_session::{
    AnswerType, Feedback, Progress, QuestionMode, QuizSession, StudySetup, WordType,
};

use super::{load_lexicon, load_lexicon_or_sample};
use super::progress_ops::store_for;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub struct QuizOptions<'a> {
    pub verbs: Option<&'a str>,
    pub adjectives: Option<&'a str>,
    pub data_dir: Option<&'a str>,
    pub audio_dir: Option<&'a str>,
    pub count: Option<usize>,
    pub word_type: WordType,
    pub question_mode: QuestionMode,
    pub choices: bool,
    pub kanji: bool,
    pub starred_only: bool,
    /// Use the built-in sample when the word lists cannot be loaded.
    pub fallback: bool,
}

pub fn quiz_cmd(opts: &QuizOptions<'_>) {
    let lexicon = if opts.fallback {
        load_lexicon_or_sample(opts.verbs, opts.adjectives)
    } else {
        load_lexicon(opts.verbs, opts.adjectives)
    };
    let lexicon = die!(lexicon, "Error loading lexicon: {}");
    let store = store_for(opts.data_dir);
    let settings = die!(store.load_settings(), "Error loading settings: {}");
    let progress = Progress {
        stars: die!(store.load_stars(), "Error opening stars: {}"),
        stats: die!(store.load_stats(), "Error opening stats: {}"),
    };

    let mut setup = StudySetup::from_settings(&settings);
    setup.word_type = opts.word_type;
    setup.question_mode = opts.question_mode;
    if let Some(count) = opts.count {
        setup.question_count = count;
    }
    if opts.choices {
        setup.answer_type = AnswerType::MultipleChoice;
    }
    if opts.kanji {
        setup.display_mode = DisplayMode::Kanji;
    }
    setup.starred_only |= opts.starred_only;

    let mut session = die!(
        QuizSession::start_random(Arc::new(lexicon), setup, settings.grading, progress),
        "Error: {}"
    );

    let audio_dir = (settings.audio.enabled && settings.audio.autoplay)
        .then(|| opts.audio_dir.map(PathBuf::from).unwrap_or_else(|| PathBuf::from("audio")));

    let stdin = io::stdin();
    let stdout = io::stdout();
    die!(
        run_quiz(
            &mut session,
            stdin.lock(),
            stdout.lock(),
            audio_dir.as_deref(),
            Some(&store)
        ),
        "Error: {}"
    );
    info!(dir = %store.dir().display(), "quiz finished");
}

/// Drive `session` from `input` until it finishes, the input ends, or the
/// learner types `:q`. `:s` toggles the star on the current word.
///
/// With a `store`, stats are written after every graded answer and stars
/// after every toggle, so an interrupted quiz keeps what was done.
pub fn run_quiz<R: Rng, I: BufRead, O: Write>(
    session: &mut QuizSession<R>,
    mut input: I,
    mut out: O,
    audio_dir: Option<&Path>,
    store: Option<&ProgressStore>,
) -> io::Result<()> {
    let mut line = String::new();
    while let Some(prompt) = session.prompt() {
        writeln!(out)?;
        writeln!(out, "{}", prompt.meta)?;
        let star = if prompt.starred { "★ " } else { "" };
        writeln!(out, "{star}{}", prompt.text)?;
        if !prompt.subtitle.is_empty() {
            writeln!(out, "  {}", prompt.subtitle)?;
        }

        if prompt.warning.is_some() {
            session.submit("");
            session.advance();
            continue;
        }

        if let Some(choices) = &prompt.choices {
            for (i, c) in choices.iter().enumerate() {
                writeln!(out, "  {}) {c}", i + 1)?;
            }
        }
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let answer = line.trim_end_matches(&['\n', '\r'][..]);
        match answer.trim() {
            ":q" | ":quit" => break,
            ":s" | ":star" => {
                if let Some(starred) = session.toggle_star() {
                    if let Some(store) = store {
                        store
                            .save_stars(&session.progress().stars)
                            .map_err(io::Error::other)?;
                    }
                    writeln!(out, "{}", if starred { "★ starred" } else { "☆ unstarred" })?;
                }
                continue;
            }
            _ => {}
        }

        let choice = prompt.choices.as_ref().and_then(|choices| {
            answer
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=choices.len()).contains(n))
        });
        let feedback = match choice {
            Some(n) => session.submit_choice(n - 1),
            None => session.submit(answer),
        };
        match &feedback {
            Some(Feedback::Correct) => writeln!(out, "✓ correct")?,
            Some(Feedback::Incorrect { canonical }) => writeln!(out, "✗ {canonical}")?,
            Some(Feedback::ContentWarning(w)) => writeln!(out, "⚠ {}", w.error)?,
            None => {}
        }
        if let (Some(store), Some(Feedback::Correct | Feedback::Incorrect { .. })) =
            (store, &feedback)
        {
            store
                .save_stats(&session.progress().stats)
                .map_err(io::Error::other)?;
        }

        if let Some(path) = audio_dir.and_then(|dir| session.current_audio(dir)) {
            writeln!(out, "♪ {}", path.display())?;
        }
        session.advance();
    }

    let score = session.score();
    writeln!(out)?;
    writeln!(out, "Score: {}/{}", score.correct, score.answered)?;
    Ok(())
}
