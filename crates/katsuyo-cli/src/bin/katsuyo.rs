use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use katsuyo_cli::commands::{
    config_ops, conjugate_ops, grade_ops, lexicon_ops, load_lexicon, parse_pos, progress_ops,
    quiz_ops,
};
use katsuyo_core::grading::GradingOptions;
use katsuyo_session::browse::BrowseSort;
use katsuyo_session::{Direction, QuestionMode, WordType};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Parser)]
#[command(name = "katsuyo", about = "Japanese polite-form conjugation drills")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum WordTypeArg {
    Verbs,
    Adjectives,
    Both,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Dictionary form → conjugation
    DictToConj,
    /// Conjugation → dictionary form
    ConjToDict,
    Mixed,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Default,
    Alpha,
    Starred,
}

#[derive(Subcommand)]
enum Command {
    /// Conjugate a dictionary-form word into every polite form
    Conjugate {
        /// Dictionary form in kana
        kana: String,
        /// Word class: ichidan, godan, irregular, i or na
        #[arg(long)]
        class: String,
        /// Dictionary form with kanji
        #[arg(long)]
        kanji: Option<String>,
        /// Only this form (present, negative, past, past_negative)
        #[arg(long)]
        form: Option<String>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Grade an answer against the accepted answers
    Grade {
        /// The answer to grade
        answer: String,
        /// Accepted answers, canonical first
        #[arg(long, value_delimiter = ',', required = true)]
        expected: Vec<String>,
        /// Part of speech: verb or adj
        #[arg(long, default_value = "verb")]
        pos: String,
        /// Grammatical form
        #[arg(long)]
        form: String,
        /// Accept adjective answers without です
        #[arg(long)]
        smart: bool,
        /// Accept ではありません for adjective negatives
        #[arg(long)]
        dewa: bool,
    },
    /// Conjugate every lexicon entry and report content warnings
    Check {
        /// Verb list (JSON)
        #[arg(long)]
        verbs: Option<String>,
        /// Adjective list (JSON)
        #[arg(long)]
        adjectives: Option<String>,
    },
    /// Lexicon utilities
    Lexicon {
        #[command(subcommand)]
        action: LexiconAction,
    },
    /// Run an interactive quiz on stdin
    Quiz {
        /// Verb list (JSON)
        #[arg(long)]
        verbs: Option<String>,
        /// Adjective list (JSON)
        #[arg(long)]
        adjectives: Option<String>,
        /// Directory holding settings, stars and stats
        #[arg(long)]
        data_dir: Option<String>,
        /// Directory holding audio clips
        #[arg(long)]
        audio_dir: Option<String>,
        /// Number of questions (default: from settings)
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Which words to drill
        #[arg(long, value_enum, default_value = "verbs")]
        words: WordTypeArg,
        /// Question direction
        #[arg(long, value_enum, default_value = "dict-to-conj")]
        mode: ModeArg,
        /// Offer multiple-choice options
        #[arg(long)]
        choices: bool,
        /// Show kanji where available
        #[arg(long)]
        kanji: bool,
        /// Only starred words
        #[arg(long)]
        starred: bool,
        /// Fall back to the built-in words if the lists cannot be loaded
        #[arg(long)]
        fallback: bool,
    },
    /// Manage settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Show answer statistics
    Stats {
        /// Directory holding settings, stars and stats
        #[arg(long)]
        data_dir: Option<String>,
        /// Clear all statistics
        #[arg(long)]
        reset: bool,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle the star on a word, or clear every star
    Star {
        /// Entry id
        #[arg(required_unless_present = "reset")]
        id: Option<String>,
        /// Remove every star
        #[arg(long, conflicts_with = "id")]
        reset: bool,
        #[arg(long)]
        data_dir: Option<String>,
        #[arg(long)]
        verbs: Option<String>,
        #[arg(long)]
        adjectives: Option<String>,
    },
    /// List words
    List {
        /// Part of speech: verb or adj
        #[arg(long, default_value = "verb")]
        pos: String,
        /// Only starred words
        #[arg(long)]
        starred: bool,
        /// Filter by kana, kanji or English
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_enum, default_value = "default")]
        sort: SortArg,
        #[arg(long)]
        data_dir: Option<String>,
        #[arg(long)]
        verbs: Option<String>,
        #[arg(long)]
        adjectives: Option<String>,
    },
}

#[derive(Subcommand)]
enum LexiconAction {
    /// Write the built-in word lists as JSON
    ExportSample {
        /// Output directory
        output_dir: String,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Export default settings as TOML
    Export,
    /// Validate a settings TOML file
    Validate {
        /// Path to the TOML file
        file: String,
    },
    /// Change one stored setting, e.g. `quiz.question_count 20`
    Set {
        /// Dotted key: section.field
        key: String,
        value: String,
        /// Directory holding settings, stars and stats
        #[arg(long)]
        data_dir: Option<String>,
    },
}

fn lexicon_or_die(verbs: Option<&str>, adjectives: Option<&str>) -> katsuyo_core::Lexicon {
    die!(load_lexicon(verbs, adjectives), "Error loading lexicon: {}")
}

fn main() {
    katsuyo_cli::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Conjugate {
            kana,
            class,
            kanji,
            form,
            json,
        } => conjugate_ops::conjugate_cmd(&kana, &class, kanji.as_deref(), form.as_deref(), json),
        Command::Grade {
            answer,
            expected,
            pos,
            form,
            smart,
            dewa,
        } => {
            let options = GradingOptions {
                smart_grading: smart,
                accept_dewa_arimasen: dewa,
            };
            grade_ops::grade_cmd(&answer, &expected, &pos, &form, options);
        }
        Command::Check { verbs, adjectives } => {
            lexicon_ops::check_cmd(verbs.as_deref(), adjectives.as_deref())
        }
        Command::Lexicon { action } => match action {
            LexiconAction::ExportSample { output_dir } => {
                lexicon_ops::export_sample_cmd(&output_dir)
            }
        },
        Command::Quiz {
            verbs,
            adjectives,
            data_dir,
            audio_dir,
            count,
            words,
            mode,
            choices,
            kanji,
            starred,
            fallback,
        } => {
            let word_type = match words {
                WordTypeArg::Verbs => WordType::Verbs,
                WordTypeArg::Adjectives => WordType::Adjectives,
                WordTypeArg::Both => WordType::Both,
            };
            let question_mode = match mode {
                ModeArg::DictToConj => QuestionMode::Fixed(Direction::DictToConj),
                ModeArg::ConjToDict => QuestionMode::Fixed(Direction::ConjToDict),
                ModeArg::Mixed => QuestionMode::Mixed,
            };
            quiz_ops::quiz_cmd(&quiz_ops::QuizOptions {
                verbs: verbs.as_deref(),
                adjectives: adjectives.as_deref(),
                data_dir: data_dir.as_deref(),
                audio_dir: audio_dir.as_deref(),
                count,
                word_type,
                question_mode,
                choices,
                kanji,
                starred_only: starred,
                fallback,
            });
        }
        Command::Settings { action } => match action {
            SettingsAction::Export => config_ops::settings_export(),
            SettingsAction::Validate { file } => config_ops::settings_validate(&file),
            SettingsAction::Set {
                key,
                value,
                data_dir,
            } => config_ops::settings_set(data_dir.as_deref(), &key, &value),
        },
        Command::Stats {
            data_dir,
            reset,
            json,
        } => progress_ops::stats_cmd(data_dir.as_deref(), reset, json),
        Command::Star {
            id,
            reset,
            data_dir,
            verbs,
            adjectives,
        } => match id {
            Some(id) if !reset => {
                let lexicon = lexicon_or_die(verbs.as_deref(), adjectives.as_deref());
                progress_ops::star_cmd(data_dir.as_deref(), &lexicon, &id);
            }
            _ => progress_ops::star_reset_cmd(data_dir.as_deref()),
        },
        Command::List {
            pos,
            starred,
            search,
            sort,
            data_dir,
            verbs,
            adjectives,
        } => {
            let lexicon = lexicon_or_die(verbs.as_deref(), adjectives.as_deref());
            let pos = die!(parse_pos(&pos), "Error: {}");
            let sort = match sort {
                SortArg::Default => BrowseSort::Default,
                SortArg::Alpha => BrowseSort::Alpha,
                SortArg::Starred => BrowseSort::Starred,
            };
            progress_ops::list_cmd(
                data_dir.as_deref(),
                &lexicon,
                &progress_ops::ListOptions {
                    pos,
                    starred_only: starred,
                    search: &search,
                    sort,
                },
            );
        }
    }
}
