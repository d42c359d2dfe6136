use std::fs;
use std::path::Path;
use std::process;

use katsuyo_core::lexicon::{lexicon_to_json, Lexicon, PartOfSpeech};

use super::load_lexicon;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Conjugate every entry in every supported form and report the failures.
pub fn check_cmd(verbs: Option<&str>, adjectives: Option<&str>) {
    let lexicon = die!(load_lexicon(verbs, adjectives), "Error loading lexicon: {}");
    let warnings = lexicon.check();
    for w in &warnings {
        println!("{}\t{}", w.id, w.error);
    }
    println!("---");
    println!(
        "{} verbs, {} adjectives, {} content warnings",
        lexicon.pool(PartOfSpeech::Verb).len(),
        lexicon.pool(PartOfSpeech::Adjective).len(),
        warnings.len()
    );
    if !warnings.is_empty() {
        process::exit(1);
    }
}

/// Write the built-in word lists as `verbs.json` and `adjectives.json`.
pub fn export_sample_cmd(output_dir: &str) {
    let dir = Path::new(output_dir);
    die!(fs::create_dir_all(dir), "Error creating {output_dir}: {}");
    let lexicon = Lexicon::sample();
    for (pos, name) in [
        (PartOfSpeech::Verb, "verbs.json"),
        (PartOfSpeech::Adjective, "adjectives.json"),
    ] {
        let json = die!(lexicon_to_json(lexicon.pool(pos)), "Error: {}");
        let path = dir.join(name);
        die!(fs::write(&path, json), "Error writing {name}: {}");
        println!("Wrote {}", path.display());
    }
}
