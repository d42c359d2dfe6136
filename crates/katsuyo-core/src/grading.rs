//! Answer grading with configurable leniency.
//!
//! Grading never fails: anything that cannot be matched is simply wrong, so
//! a bad answer list can never interrupt a running quiz.

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::conjugator::GrammaticalForm;
use crate::lexicon::PartOfSpeech;

const DESU: &str = "です";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingOptions {
    /// Accept adjective answers without the trailing です.
    pub smart_grading: bool,
    /// Accept ではありません(でした) for adjective negatives.
    pub accept_dewa_arimasen: bool,
}

impl Default for GradingOptions {
    fn default() -> Self {
        Self {
            smart_grading: true,
            accept_dewa_arimasen: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GradingRequest<'a> {
    pub raw_input: &'a str,
    /// First entry is the canonical answer shown on failure.
    pub accepted: &'a [String],
    pub part_of_speech: PartOfSpeech,
    pub form: GrammaticalForm,
    pub options: GradingOptions,
}

/// Trim and drop every whitespace character, including U+3000 and the
/// zero-width no-break space U+FEFF.
pub fn normalize_answer(s: &str) -> String {
    s.chars()
        .filter(|&c| !c.is_whitespace() && c != '\u{FEFF}')
        .collect()
}

/// Decide whether `request.raw_input` matches an accepted answer.
pub fn grade(request: &GradingRequest<'_>) -> bool {
    let _span = debug_span!("grade", pos = %request.part_of_speech, form = %request.form).entered();
    let Some(canonical) = request.accepted.first() else {
        debug!("no accepted answers");
        return false;
    };
    let input = normalize_answer(request.raw_input);
    let accepted: Vec<String> = request
        .accepted
        .iter()
        .map(|a| normalize_answer(a))
        .collect();

    if accepted.contains(&input) {
        return true;
    }

    if request.part_of_speech != PartOfSpeech::Adjective {
        return false;
    }

    if request.options.accept_dewa_arimasen {
        if let Some(alt) = dewa_arimasen_variant(canonical, request.form) {
            if normalize_answer(&alt) == input {
                debug!("accepted ではありません variant");
                return true;
            }
        }
    }

    if request.options.smart_grading
        && accepted
            .iter()
            .any(|a| a.strip_suffix(DESU).unwrap_or(a) == input)
    {
        debug!("accepted without です");
        return true;
    }

    false
}

/// The ではありません register of a polite adjective negative.
fn dewa_arimasen_variant(answer: &str, form: GrammaticalForm) -> Option<String> {
    let (from, to) = match form {
        GrammaticalForm::Negative => ("じゃないです", "ではありません"),
        GrammaticalForm::PastNegative => ("じゃなかったです", "ではありませんでした"),
        GrammaticalForm::Present | GrammaticalForm::Past => return None,
    };
    Some(answer.replacen(from, to, 1))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn answers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn check(
        input: &str,
        accepted: &[String],
        pos: PartOfSpeech,
        form: GrammaticalForm,
        options: GradingOptions,
    ) -> bool {
        grade(&GradingRequest {
            raw_input: input,
            accepted,
            part_of_speech: pos,
            form,
            options,
        })
    }

    const STRICT: GradingOptions = GradingOptions {
        smart_grading: false,
        accept_dewa_arimasen: false,
    };

    #[test]
    fn exact_match() {
        let acc = answers(&["たべます", "食べます"]);
        let opts = GradingOptions::default();
        assert!(check("たべます", &acc, PartOfSpeech::Verb, GrammaticalForm::Present, opts));
        assert!(check("食べます", &acc, PartOfSpeech::Verb, GrammaticalForm::Present, opts));
        assert!(!check("たべません", &acc, PartOfSpeech::Verb, GrammaticalForm::Present, opts));
    }

    #[test]
    fn whitespace_is_elided() {
        assert_eq!(normalize_answer(" たべ ます "), "たべます");
        assert_eq!(normalize_answer("たべ\u{3000}ます\n"), "たべます");
        let acc = answers(&["たべます"]);
        assert!(check(" たべ ます ", &acc, PartOfSpeech::Verb, GrammaticalForm::Present, STRICT));
        // Accepted answers are normalized too.
        let acc = answers(&["たべ ます"]);
        assert!(check("たべます", &acc, PartOfSpeech::Verb, GrammaticalForm::Present, STRICT));
    }

    #[test]
    fn empty_accepted_list_is_incorrect() {
        assert!(!check("", &[], PartOfSpeech::Verb, GrammaticalForm::Present, STRICT));
        assert!(!check("たべます", &[], PartOfSpeech::Adjective, GrammaticalForm::Past, GradingOptions::default()));
    }

    #[test]
    fn smart_grading_drops_desu() {
        let acc = answers(&["さむかったです"]);
        let smart = GradingOptions {
            smart_grading: true,
            accept_dewa_arimasen: false,
        };
        assert!(check("さむかった", &acc, PartOfSpeech::Adjective, GrammaticalForm::Past, smart));
        assert!(!check("さむかった", &acc, PartOfSpeech::Adjective, GrammaticalForm::Past, STRICT));
    }

    #[test]
    fn smart_grading_is_adjective_only() {
        let acc = answers(&["いきますです"]);
        let smart = GradingOptions::default();
        assert!(!check("いきます", &acc, PartOfSpeech::Verb, GrammaticalForm::Present, smart));
    }

    #[test]
    fn dewa_arimasen_negative() {
        let acc = answers(&["きれいじゃないです", "綺麗じゃないです"]);
        let dewa = GradingOptions {
            smart_grading: false,
            accept_dewa_arimasen: true,
        };
        assert!(check("きれいではありません", &acc, PartOfSpeech::Adjective, GrammaticalForm::Negative, dewa));
        assert!(!check("きれいではありません", &acc, PartOfSpeech::Adjective, GrammaticalForm::Negative, STRICT));
        // Only the canonical (first) answer is rewritten.
        assert!(!check("綺麗ではありません", &acc, PartOfSpeech::Adjective, GrammaticalForm::Negative, dewa));
    }

    #[test]
    fn dewa_arimasen_past_negative() {
        let acc = answers(&["しずかじゃなかったです"]);
        let dewa = GradingOptions {
            smart_grading: false,
            accept_dewa_arimasen: true,
        };
        assert!(check(
            "しずかではありませんでした",
            &acc,
            PartOfSpeech::Adjective,
            GrammaticalForm::PastNegative,
            dewa
        ));
        // The past-negative rewrite does not apply to the plain negative form.
        assert!(!check(
            "しずかではありませんでした",
            &acc,
            PartOfSpeech::Adjective,
            GrammaticalForm::Negative,
            dewa
        ));
    }

    #[test]
    fn dewa_arimasen_ignored_for_verbs() {
        let acc = answers(&["じゃないです"]);
        let dewa = GradingOptions {
            smart_grading: false,
            accept_dewa_arimasen: true,
        };
        assert!(!check("ではありません", &acc, PartOfSpeech::Verb, GrammaticalForm::Negative, dewa));
    }

    #[test]
    fn normalize_strips_bom() {
        assert_eq!(normalize_answer("\u{FEFF}たべます"), "たべます");
        assert_eq!(normalize_answer("たべ\u{FEFF} ます\u{3000}"), "たべます");
        let acc = answers(&["たべます"]);
        assert!(check(
            "\u{FEFF}たべます",
            &acc,
            PartOfSpeech::Verb,
            GrammaticalForm::Present,
            STRICT
        ));
    }

    proptest! {
        #[test]
        fn whitespace_never_changes_the_verdict(
            word in "[ぁ-ゖ]{1,8}",
            pad in prop::collection::vec(prop::sample::select(vec![" ", "\t", "\u{3000}"]), 0..4),
        ) {
            let padded = format!("{}{}{}", pad.concat(), word, pad.concat());
            let acc = vec![word.clone()];
            prop_assert!(check(&padded, &acc, PartOfSpeech::Verb, GrammaticalForm::Past, STRICT));
        }
    }
}
