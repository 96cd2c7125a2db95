use crate::error::DictionaryError;
use fst::{IntoStreamer, Map, Streamer};
use lazy_static::lazy_static;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const EMBEDDED_SOURCE: &str = include_str!("misspellings.txt");

lazy_static! {
    static ref EMBEDDED: Dictionary = Dictionary::from_pairs(
        parse(EMBEDDED_SOURCE, Path::new("<embedded>")).expect("embedded misspellings list is valid")
    )
    .expect("embedded misspellings list builds");
}

/// Read-only mapping from lowercase misspelling to its correction.
///
/// Keys live in an FST map whose values index into `corrections`.
pub struct Dictionary {
    index: Map<Vec<u8>>,
    corrections: Vec<String>,
}

impl std::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dictionary")
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}

impl Dictionary {
    /// The built-in list, built once per process.
    pub fn embedded() -> &'static Dictionary {
        &EMBEDDED
    }

    /// Built-in entries plus the given files; later files override earlier
    /// entries for the same misspelling.
    pub fn load(paths: &[PathBuf]) -> Result<Self, DictionaryError> {
        let mut pairs = parse(EMBEDDED_SOURCE, Path::new("<embedded>"))?;
        for path in paths {
            let source = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
                path: path.clone(),
                source,
            })?;
            pairs.extend(parse(&source, path)?);
        }
        Self::from_pairs(pairs)
    }

    /// Build from (misspelling, correction) pairs. Misspellings are
    /// lowercased; the last pair for a misspelling wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let sorted: BTreeMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
            .collect();

        let mut corrections = Vec::with_capacity(sorted.len());
        let mut keys = Vec::with_capacity(sorted.len());
        for (i, (misspelling, correction)) in sorted.into_iter().enumerate() {
            keys.push((misspelling, i as u64));
            corrections.push(correction);
        }

        let index = Map::from_iter(keys)?;
        Ok(Self { index, corrections })
    }

    /// Correction for an already-lowercased word.
    pub fn get(&self, word: &str) -> Option<&str> {
        let i = self.index.get(word)?;
        self.corrections.get(i as usize).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.corrections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty()
    }

    /// All entries in misspelling order.
    pub fn entries(&self) -> Vec<(String, &str)> {
        let mut entries = Vec::with_capacity(self.len());
        let mut stream = self.index.stream();
        while let Some((key, i)) = stream.next() {
            if let (Ok(word), Some(correction)) =
                (String::from_utf8(key.to_vec()), self.corrections.get(i as usize))
            {
                entries.push((word, correction.as_str()));
            }
        }
        entries
    }

    /// Misspellings starting with `prefix`.
    pub fn misspellings_with_prefix(&self, prefix: &str) -> Vec<String> {
        use fst::Automaton;

        let mut results = Vec::new();
        let mut stream = self
            .index
            .search(fst::automaton::Str::new(prefix).starts_with())
            .into_stream();

        while let Some((key, _)) = stream.next() {
            if let Ok(word) = String::from_utf8(key.to_vec()) {
                results.push(word);
            }
        }

        results
    }
}

/// Parse `misspelling->correction` lines. Blank lines and `#` comments are
/// skipped; `path` only labels errors.
pub fn parse(source: &str, path: &Path) -> Result<Vec<(String, String)>, DictionaryError> {
    let mut pairs = Vec::new();

    for (n, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let entry = line.split_once("->").and_then(|(misspelling, correction)| {
            let misspelling = misspelling.trim();
            let correction = correction.trim();
            let valid = !misspelling.is_empty()
                && !correction.is_empty()
                && !misspelling.contains(char::is_whitespace);
            valid.then(|| (misspelling.to_lowercase(), correction.to_string()))
        });

        match entry {
            Some(pair) => pairs.push(pair),
            None => {
                return Err(DictionaryError::Syntax {
                    path: path.to_path_buf(),
                    line: n + 1,
                    content: line.to_string(),
                })
            }
        }
    }

    Ok(pairs)
}
