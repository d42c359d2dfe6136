use std::process;

use serde::Serialize;

use katsuyo_core::conjugator::{conjugate, forms_for, GrammaticalForm};
use katsuyo_core::lexicon::LexicalEntry;

use super::{column_width, pad, parse_class};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ConjugationRow {
    pub form: GrammaticalForm,
    pub label: &'static str,
    pub kana: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kanji: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One row per requested form, or per supported form when `form` is `None`.
pub fn conjugation_rows(entry: &LexicalEntry, form: Option<GrammaticalForm>) -> Vec<ConjugationRow> {
    let pos = entry.part_of_speech();
    let forms = match form {
        Some(f) => vec![f],
        None => forms_for(pos).to_vec(),
    };
    forms
        .into_iter()
        .map(|form| {
            let (kana, kanji, error) = match conjugate(entry, form) {
                Ok(c) => (c.kana, c.kanji, None),
                Err(e) => (String::new(), String::new(), Some(e.to_string())),
            };
            ConjugationRow {
                form,
                label: form.describe(pos),
                kana,
                kanji,
                error,
            }
        })
        .collect()
}

pub fn conjugate_cmd(kana: &str, class: &str, kanji: Option<&str>, form: Option<&str>, json: bool) {
    let class = die!(parse_class(class), "Error: {}");
    let entry = LexicalEntry::new("cli", kana, kanji.unwrap_or(""), class, "");
    die!(entry.validate(), "Error: {}");
    let form = form.map(|f| die!(f.parse::<GrammaticalForm>(), "Error: {}"));

    let rows = conjugation_rows(&entry, form);
    if json {
        println!("{}", die!(serde_json::to_string_pretty(&rows), "Error: {}"));
        return;
    }

    println!("{} ({class})", entry.kana);
    let label_w = column_width(rows.iter().map(|r| r.label));
    let kana_w = column_width(rows.iter().map(|r| r.kana.as_str()));
    for row in &rows {
        match &row.error {
            Some(e) => println!("  {}  ⚠ {e}", pad(row.label, label_w)),
            None => println!(
                "  {}  {}  {}",
                pad(row.label, label_w),
                pad(&row.kana, kana_w),
                row.kanji
            ),
        }
    }
}
