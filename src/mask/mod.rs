//! Region masking: hide protected spans behind placeholders, let a transform
//! rewrite the rest, then splice the originals back.

pub mod placeholder;

use crate::error::MaskError;
use crate::region::RegionKind;
use std::ops::Range;
use tracing::debug;

/// One protected span of the original document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region<'a> {
    /// Discovery order; also the index into [`Masked::regions`].
    pub id: usize,
    /// `None` for literal placeholder characters already present in the document.
    pub kind: Option<RegionKind>,
    /// Byte range in the original document.
    pub span: Range<usize>,
    /// The original text of `span`.
    pub text: &'a str,
    /// Set when a later, larger region swallowed this one.
    pub enclosed_by: Option<usize>,
}

#[derive(Debug, Clone)]
struct Live {
    masked: Range<usize>,
    id: usize,
}

/// A document with its protected regions replaced by placeholders.
#[derive(Debug)]
pub struct Masked<'a> {
    text: String,
    regions: Vec<Region<'a>>,
    live: Vec<Live>,
}

/// Mask every region of `kinds`, detected in the order given.
pub fn mask<'a>(document: &'a str, kinds: &[RegionKind]) -> Masked<'a> {
    let mut masked = Masked {
        text: document.to_string(),
        regions: Vec::new(),
        live: Vec::new(),
    };

    let literal: Vec<Range<usize>> = document
        .char_indices()
        .filter(|(_, c)| placeholder::is_sentinel(*c))
        .map(|(i, c)| i..i + c.len_utf8())
        .collect();
    masked.claim(document, None, literal);

    for &kind in kinds {
        let spans = kind.detect(&masked.text);
        debug!(kind = %kind, matches = spans.len(), "detected regions");
        masked.claim(document, Some(kind), spans);
    }

    masked
}

/// Run `transform` over `document` with every region of `kinds` hidden from
/// it, and return the transformed text with those regions restored verbatim.
pub fn process<F>(document: &str, kinds: &[RegionKind], transform: F) -> Result<String, MaskError>
where
    F: FnOnce(&str) -> String,
{
    let masked = mask(document, kinds);
    let transformed = transform(masked.text());
    masked.unmask(&transformed)
}

impl<'a> Masked<'a> {
    /// The masked text a transform sees.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Every region found, indexed by id.
    pub fn regions(&self) -> &[Region<'a>] {
        &self.regions
    }

    /// Map an offset in the masked text to the original document. Offsets
    /// inside a placeholder map to the start of its region.
    pub fn document_offset(&self, pos: usize) -> usize {
        let idx = self.live.partition_point(|l| l.masked.end <= pos);
        if let Some(l) = self.live.get(idx).filter(|l| l.masked.start < pos) {
            return self.regions[l.id].span.start;
        }

        match idx.checked_sub(1).map(|i| &self.live[i]) {
            Some(prev) => self.regions[prev.id].span.end + (pos - prev.masked.end),
            None => pos,
        }
    }

    /// Replace every placeholder in `transformed` with its original text.
    pub fn unmask(&self, transformed: &str) -> Result<String, MaskError> {
        let mut restored = String::with_capacity(transformed.len());
        let mut seen = vec![false; self.regions.len()];
        let mut cursor = 0;

        while let Some(offset) = transformed[cursor..].find(placeholder::is_sentinel) {
            let at = cursor + offset;
            restored.push_str(&transformed[cursor..at]);

            let (id, len) = placeholder::decode(&transformed[at..]).ok_or(MaskError::Malformed(at))?;
            let region = self
                .regions
                .get(id)
                .filter(|r| r.enclosed_by.is_none())
                .ok_or(MaskError::Unknown(id))?;
            if std::mem::replace(&mut seen[id], true) {
                return Err(MaskError::Duplicated(id));
            }

            restored.push_str(region.text);
            cursor = at + len;
        }
        restored.push_str(&transformed[cursor..]);

        if let Some(lost) = self.live.iter().find(|l| !seen[l.id]) {
            return Err(MaskError::Lost(lost.id));
        }

        Ok(restored)
    }

    /// The live placeholder strictly containing `pos`.
    fn containing(&self, pos: usize) -> Option<&Live> {
        let idx = self.live.partition_point(|l| l.masked.end <= pos);
        self.live.get(idx).filter(|l| l.masked.start < pos)
    }

    /// Widen spans to placeholder boundaries; a span overlapping an earlier
    /// one in the same pass is dropped.
    fn snap(&self, spans: Vec<Range<usize>>) -> Vec<Range<usize>> {
        let mut snapped: Vec<Range<usize>> = Vec::with_capacity(spans.len());
        for span in spans {
            let start = self.containing(span.start).map_or(span.start, |l| l.masked.start);
            let end = self.containing(span.end).map_or(span.end, |l| l.masked.end);
            if start >= end || snapped.last().is_some_and(|prev| start < prev.end) {
                continue;
            }
            snapped.push(start..end);
        }
        snapped
    }

    fn claim(&mut self, document: &'a str, kind: Option<RegionKind>, spans: Vec<Range<usize>>) {
        let spans = self.snap(spans);
        if spans.is_empty() {
            return;
        }

        let doc_spans: Vec<Range<usize>> = spans
            .iter()
            .map(|s| self.document_offset(s.start)..self.document_offset(s.end))
            .collect();

        let mut text = String::with_capacity(self.text.len());
        let mut live = Vec::with_capacity(self.live.len() + spans.len());
        let mut old = std::mem::take(&mut self.live).into_iter().peekable();
        let mut cursor = 0;

        for (span, doc_span) in spans.into_iter().zip(doc_spans) {
            text.push_str(&self.text[cursor..span.start]);
            let shift = text.len() as isize - span.start as isize;
            while let Some(l) = old.next_if(|l| l.masked.end <= span.start) {
                live.push(shifted(l, shift));
            }

            let id = self.regions.len();
            while let Some(l) = old.next_if(|l| l.masked.end <= span.end) {
                self.regions[l.id].enclosed_by = Some(id);
            }

            let token = placeholder::encode(id);
            live.push(Live {
                masked: text.len()..text.len() + token.len(),
                id,
            });
            text.push_str(&token);
            self.regions.push(Region {
                id,
                kind,
                text: &document[doc_span.clone()],
                span: doc_span,
                enclosed_by: None,
            });
            cursor = span.end;
        }

        text.push_str(&self.text[cursor..]);
        let shift = text.len() as isize - self.text.len() as isize;
        live.extend(old.map(|l| shifted(l, shift)));

        self.text = text;
        self.live = live;
    }
}

fn shifted(l: Live, shift: isize) -> Live {
    let move_by = |pos: usize| (pos as isize + shift) as usize;
    Live {
        masked: move_by(l.masked.start)..move_by(l.masked.end),
        id: l.id,
    }
}
