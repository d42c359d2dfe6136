use std::process;

use katsuyo_core::conjugator::GrammaticalForm;
use katsuyo_core::grading::{grade, GradingOptions, GradingRequest};

use super::parse_pos;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Grade one answer. Exits with status 1 when it is wrong so scripts can test it.
pub fn grade_cmd(
    answer: &str,
    expected: &[String],
    pos: &str,
    form: &str,
    options: GradingOptions,
) {
    let pos = die!(parse_pos(pos), "Error: {}");
    let form = die!(form.parse::<GrammaticalForm>(), "Error: {}");
    let correct = grade(&GradingRequest {
        raw_input: answer,
        accepted: expected,
        part_of_speech: pos,
        form,
        options,
    });
    if correct {
        println!("correct");
    } else {
        match expected.first() {
            Some(canonical) => println!("incorrect (expected {canonical})"),
            None => println!("incorrect (no accepted answers)"),
        }
        process::exit(1);
    }
}
