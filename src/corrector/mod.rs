//! Dictionary-driven replacement of misspelled words.

pub mod case;
pub mod dictionary;
pub mod ignore;
pub mod tokenizer;

pub use dictionary::Dictionary;
pub use ignore::IgnoreSet;

use tracing::debug;

/// One replaced word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    /// Byte offset of the original word in the text passed to [`correct_with_report`].
    pub offset: usize,
    pub original: String,
    pub replacement: String,
}

/// Replace every dictionary misspelling in `text` that is not ignored.
pub fn correct(text: &str, dictionary: &Dictionary, ignore: &IgnoreSet) -> String {
    correct_with_report(text, dictionary, ignore).0
}

/// Like [`correct`], also listing each replacement made.
pub fn correct_with_report(
    text: &str,
    dictionary: &Dictionary,
    ignore: &IgnoreSet,
) -> (String, Vec<Correction>) {
    let mut output = String::with_capacity(text.len());
    let mut corrections = Vec::new();
    let mut last = 0;

    for word in tokenizer::words(text) {
        let Some(replacement) = replacement_for(word.as_str(), dictionary, ignore) else {
            continue;
        };

        output.push_str(&text[last..word.start()]);
        output.push_str(&replacement);
        last = word.end();

        debug!(word = word.as_str(), replacement = %replacement, offset = word.start(), "corrected");
        corrections.push(Correction {
            offset: word.start(),
            original: word.as_str().to_string(),
            replacement,
        });
    }

    output.push_str(&text[last..]);
    (output, corrections)
}

fn replacement_for(word: &str, dictionary: &Dictionary, ignore: &IgnoreSet) -> Option<String> {
    let lowercased = word.to_lowercase();
    if ignore.contains(&lowercased) {
        return None;
    }

    let correction = dictionary.get(&lowercased)?;
    let replacement = case::carry_first_letter(word, correction);
    (replacement != word).then_some(replacement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dict() -> Dictionary {
        Dictionary::from_pairs([
            ("absoltely", "absolutely"),
            ("accodringly", "accordingly"),
            ("defenately", "definitely"),
            ("alot", "a lot"),
        ])
        .unwrap()
    }

    #[test]
    fn test_corrects_plain_prose() {
        let out = correct("I absoltely hate...", &dict(), &IgnoreSet::default());
        assert_eq!(out, "I absolutely hate...");
    }

    #[test]
    fn test_first_letter_case_is_carried() {
        let out = correct("Accodringly we made...", &dict(), &IgnoreSet::default());
        assert_eq!(out, "Accordingly we made...");
    }

    #[test]
    fn test_ignore_set_wins_over_dictionary() {
        let ignore = IgnoreSet::parse("absoltely");
        let out = correct("Absoltely and defenately", &dict(), &ignore);
        assert_eq!(out, "Absoltely and definitely");
    }

    #[test]
    fn test_punctuation_and_whitespace_preserved() {
        let out = correct("(alot),\t'defenately'!\r\n", &dict(), &IgnoreSet::default());
        assert_eq!(out, "(a lot),\t'defenately'!\r\n");
    }

    #[test]
    fn test_token_must_match_whole_key() {
        let out = correct("absoltely-done un-defenately", &dict(), &IgnoreSet::default());
        assert_eq!(out, "absoltely-done un-defenately");
    }

    #[test]
    fn test_idempotent() {
        let text = "Alot of words, defenately ABSOLTELY wrong.";
        let once = correct(text, &dict(), &IgnoreSet::default());
        assert_eq!(correct(&once, &dict(), &IgnoreSet::default()), once);
    }

    #[test]
    fn test_report_offsets() {
        let (out, corrections) =
            correct_with_report("so alot, Defenately", &dict(), &IgnoreSet::default());
        assert_eq!(out, "so a lot, Definitely");
        assert_eq!(
            corrections,
            vec![
                Correction {
                    offset: 3,
                    original: "alot".to_string(),
                    replacement: "a lot".to_string(),
                },
                Correction {
                    offset: 9,
                    original: "Defenately".to_string(),
                    replacement: "Definitely".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(correct("", &dict(), &IgnoreSet::default()), "");
    }
}
