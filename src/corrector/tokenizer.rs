use lazy_static::lazy_static;
use regex::{Match, Regex};

lazy_static! {
    // Letters, digits, underscore, hyphen, straight and curly apostrophes, backtick.
    static ref WORD: Regex = Regex::new(r"[\w\-'’`]+").unwrap();
}

/// Word-like runs of `text`, left to right.
pub fn words(text: &str) -> impl Iterator<Item = Match<'_>> {
    WORD.find_iter(text)
}
