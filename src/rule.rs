use crate::corrector::{self, Dictionary, IgnoreSet};
use crate::error::MaskError;
use crate::mask;
use crate::region::RegionKind;
use crate::Misspelling;

pub const NAME: &str = "Auto-correct Common Misspellings";
pub const DESCRIPTION: &str = "Uses a dictionary of common misspellings to automatically convert them to their proper spellings, leaving YAML front matter, code, math, links, tags, images and URLs untouched.";

/// Dictionary correction restricted to prose outside protected regions.
#[derive(Debug, Clone)]
pub struct AutoCorrect<'d> {
    dictionary: &'d Dictionary,
    ignore: IgnoreSet,
    regions: Vec<RegionKind>,
}

impl<'d> AutoCorrect<'d> {
    /// No ignored words, every region kind protected.
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self {
            dictionary,
            ignore: IgnoreSet::default(),
            regions: RegionKind::PRIORITY.to_vec(),
        }
    }

    pub fn with_ignore(mut self, ignore: IgnoreSet) -> Self {
        self.ignore = ignore;
        self
    }

    /// Regions are detected in the order given here.
    pub fn with_regions(mut self, regions: Vec<RegionKind>) -> Self {
        self.regions = regions;
        self
    }

    pub fn regions(&self) -> &[RegionKind] {
        &self.regions
    }

    pub fn apply(&self, text: &str) -> Result<String, MaskError> {
        mask::process(text, &self.regions, |prose| {
            corrector::correct(prose, self.dictionary, &self.ignore)
        })
    }

    /// Corrected text plus every correction, located in `text`.
    pub fn apply_with_report(&self, text: &str) -> Result<(String, Vec<Misspelling>), MaskError> {
        let masked = mask::mask(text, &self.regions);
        let (corrected, corrections) =
            corrector::correct_with_report(masked.text(), self.dictionary, &self.ignore);
        let restored = masked.unmask(&corrected)?;

        let lines = LineIndex::new(text);
        let misspellings = corrections
            .into_iter()
            .map(|c| {
                let offset = masked.document_offset(c.offset);
                let (line, column) = lines.position(text, offset);
                Misspelling {
                    word: c.original,
                    correction: c.replacement,
                    line,
                    column,
                    context: lines.line_text(text, line).trim().to_string(),
                }
            })
            .collect();

        Ok((restored, misspellings))
    }
}

struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    /// 1-based line and character column of a byte offset.
    fn position(&self, text: &str, offset: usize) -> (usize, usize) {
        let line = self.starts.partition_point(|start| *start <= offset);
        let column = text[self.starts[line - 1]..offset].chars().count() + 1;
        (line, column)
    }

    fn line_text<'t>(&self, text: &'t str, line: usize) -> &'t str {
        let start = self.starts[line - 1];
        let end = self.starts.get(line).map_or(text.len(), |next| next - 1);
        text[start..end].trim_end_matches('\r')
    }
}
