use std::collections::HashSet;
use std::fmt;

/// Lowercase words exempt from correction, in the order the user gave them.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    words: Vec<String>,
    lookup: HashSet<String>,
}

impl IgnoreSet {
    /// Parse a user-edited list separated by commas and/or whitespace
    /// (`"alot, wich"`, one word per line, ...).
    pub fn parse(input: &str) -> Self {
        input
            .split(|c: char| c == ',' || c.is_whitespace())
            .collect()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(word)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    fn insert(&mut self, word: &str) {
        let word = word.trim().to_lowercase();
        if !word.is_empty() && self.lookup.insert(word.clone()) {
            self.words.push(word);
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = IgnoreSet::default();
        for word in iter {
            set.insert(word.as_ref());
        }
        set
    }
}

impl<S: AsRef<str>> Extend<S> for IgnoreSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word.as_ref());
        }
    }
}

impl fmt::Display for IgnoreSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.words.join(", "))
    }
}
