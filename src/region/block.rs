use lazy_static::lazy_static;
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag};
use regex::Regex;
use std::ops::Range;

lazy_static! {
    static ref MATH_BLOCK: Regex = Regex::new(r"(?s)\$\$.+?\$\$").unwrap();
}

/// Lines of `text` with their starting byte offsets, terminators stripped.
pub(crate) fn lines(text: &str) -> Vec<(usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n')
        .map(|line| {
            let start = offset;
            offset += line.len();
            (start, line.trim_end_matches(|c| c == '\n' || c == '\r'))
        })
        .collect()
}

/// Front matter: a `---` line at the very start of the document up to the
/// next `---` line. The closing line terminator stays outside the region.
pub fn yaml(text: &str) -> Option<Range<usize>> {
    let lines = lines(text);
    let (_, first) = lines.first()?;
    if first.trim_end() != "---" {
        return None;
    }

    lines
        .iter()
        .skip(1)
        .find(|(_, line)| line.trim_end() == "---")
        .map(|(start, line)| 0..start + line.len())
}

/// Fence character and width opening `line`, after container markers
/// (`>` and indentation) are stripped.
fn fence(line: &str) -> Option<(char, usize)> {
    let body = line.trim_start_matches(|c: char| c == '>' || c.is_whitespace());
    let marker = body.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let width = body.len() - body.trim_start_matches(marker).len();
    (width >= 3).then_some((marker, width))
}

fn trim_line_end(text: &str) -> &str {
    text.trim_end_matches(|c| c == '\n' || c == '\r')
}

/// A fenced block counts only when its last line closes the opening fence;
/// CommonMark would otherwise run an unclosed fence to the end of its container.
fn is_closed_fence(block: &str) -> bool {
    let mut lines = block.lines();
    let Some((marker, width)) = lines.next().and_then(fence) else {
        return false;
    };

    lines.last().is_some_and(|last| {
        let body = last.trim_start_matches(|c: char| c == '>' || c.is_whitespace());
        let run = body.len() - body.trim_start_matches(marker).len();
        run >= width && body[run..].trim().is_empty()
    })
}

/// Start of the line after an opening fence that never closes. That fence
/// line is plain text, so callers parse what follows it again on its own.
pub(crate) fn unclosed_body(
    text: &str,
    kind: &CodeBlockKind,
    range: &Range<usize>,
) -> Option<usize> {
    let block = &text[range.clone()];
    if !matches!(kind, CodeBlockKind::Fenced(_)) || is_closed_fence(trim_line_end(block)) {
        return None;
    }
    Some(block.find('\n').map_or(range.end, |i| range.start + i + 1))
}

/// Move spans found in a slice starting at `offset` back into the full text.
pub(crate) fn rebase(spans: Vec<Range<usize>>, offset: usize) -> impl Iterator<Item = Range<usize>> {
    spans.into_iter().map(move |r| r.start + offset..r.end + offset)
}

/// Indented and fenced code blocks as CommonMark parses them, including
/// blocks nested in quotes and list items.
pub fn code_blocks(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();

    for (event, range) in Parser::new(text).into_offset_iter() {
        let Event::Start(Tag::CodeBlock(kind)) = event else {
            continue;
        };
        match unclosed_body(text, &kind, &range) {
            Some(body) => spans.extend(rebase(code_blocks(&text[body..range.end]), body)),
            None => spans.push(range.start..range.start + trim_line_end(&text[range]).len()),
        }
    }

    spans
}

/// `$$`-delimited math, possibly spanning lines.
pub fn math(text: &str) -> Vec<Range<usize>> {
    MATH_BLOCK.find_iter(text).map(|m| m.range()).collect()
}
