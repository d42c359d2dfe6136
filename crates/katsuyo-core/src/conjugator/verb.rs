use super::{Conjugation, ConjugationError, GrammaticalForm};
use crate::lexicon::{LexicalEntry, VerbClass, WordClass};
use crate::okurigana::resolve_stem;
use crate::unicode::{drop_last_chars, last_char};

/// Dictionary-form ending → い-row alternate for godan verbs.
const GODAN_I_ROW: [(char, char); 9] = [
    ('う', 'い'),
    ('く', 'き'),
    ('ぐ', 'ぎ'),
    ('す', 'し'),
    ('つ', 'ち'),
    ('ぬ', 'に'),
    ('ぶ', 'び'),
    ('む', 'み'),
    ('る', 'り'),
];

pub(crate) fn godan_i_row(ending: char) -> Option<char> {
    GODAN_I_ROW
        .iter()
        .find_map(|&(from, to)| (from == ending).then_some(to))
}

fn polite_ending(form: GrammaticalForm) -> &'static str {
    match form {
        GrammaticalForm::Present => "ます",
        GrammaticalForm::Negative => "ません",
        GrammaticalForm::Past => "ました",
        GrammaticalForm::PastNegative => "ませんでした",
    }
}

/// Kana and kanji stems (連用形) a polite ending attaches to.
struct Stems {
    kana: String,
    kanji: String,
}

pub(super) fn conjugate_verb(
    entry: &LexicalEntry,
    class: VerbClass,
    form: GrammaticalForm,
) -> Result<Conjugation, ConjugationError> {
    let stems = match class {
        VerbClass::Irregular => irregular_stems(&entry.kana, &entry.kanji),
        VerbClass::Ichidan => ichidan_stems(&entry.kana, &entry.kanji)?,
        VerbClass::Godan => godan_stems(&entry.kana, &entry.kanji)?,
    };
    Ok(Conjugation::from_stems(
        &stems.kana,
        &stems.kanji,
        polite_ending(form),
    ))
}

fn irregular_stems(kana: &str, kanji: &str) -> Stems {
    if kana.ends_with("する") {
        let kanji = match kanji.strip_suffix("する") {
            Some(stem) => format!("{stem}し"),
            None => String::new(),
        };
        return Stems {
            kana: format!("{}し", drop_last_chars(kana, 2)),
            kanji,
        };
    }
    if kana.ends_with("くる") {
        return Stems {
            kana: format!("{}き", drop_last_chars(kana, 2)),
            kanji: resolve_stem(kanji, kana, "き"),
        };
    }
    // Anything else tagged irregular: drop the final kana and re-attach the
    // new last kana to the kanji stem.
    let kana_stem = drop_last_chars(kana, 1);
    let replacement = last_char(kana_stem).map(String::from).unwrap_or_default();
    Stems {
        kana: kana_stem.to_string(),
        kanji: resolve_stem(kanji, kana, &replacement),
    }
}

fn ichidan_stems(kana: &str, kanji: &str) -> Result<Stems, ConjugationError> {
    let Some(stem) = kana.strip_suffix('る') else {
        return Err(ConjugationError::MalformedDictionaryForm {
            kana: kana.to_string(),
            class: WordClass::Verb(VerbClass::Ichidan),
            reason: "ichidan verb must end with る",
        });
    };
    Ok(Stems {
        kana: stem.to_string(),
        kanji: resolve_stem(kanji, kana, ""),
    })
}

fn godan_stems(kana: &str, kanji: &str) -> Result<Stems, ConjugationError> {
    let Some(alternate) = last_char(kana).and_then(godan_i_row) else {
        return Err(ConjugationError::MalformedDictionaryForm {
            kana: kana.to_string(),
            class: WordClass::Verb(VerbClass::Godan),
            reason: "unknown godan ending",
        });
    };
    let alternate = alternate.to_string();
    Ok(Stems {
        kana: format!("{}{alternate}", drop_last_chars(kana, 1)),
        kanji: resolve_stem(kanji, kana, &alternate),
    })
}
