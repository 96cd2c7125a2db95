use super::block;
use lazy_static::lazy_static;
use pulldown_cmark::{Event, Parser, Tag};
use regex::Regex;
use std::ops::Range;

lazy_static! {
    // Tag bodies stop at placeholder sentinels so a tag never swallows one.
    static ref TAG: Regex =
        Regex::new(r"(?m)(?:^|\s)(#[^\s#;.,>\[\]{}()`\x{E000}-\x{E01F}]+)").unwrap();
}

fn run_len(bytes: &[u8], start: usize, byte: u8) -> usize {
    bytes[start..].iter().take_while(|b| **b == byte).count()
}

/// Code spans as CommonMark parses them: a backtick run closed by the next
/// run of the same width within one paragraph. Text after an unclosed fence
/// is still searched.
pub fn code(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();

    for (event, range) in Parser::new(text).into_offset_iter() {
        match event {
            Event::Code(_) => spans.push(range),
            Event::Start(Tag::CodeBlock(kind)) => {
                if let Some(body) = block::unclosed_body(text, &kind, &range) {
                    spans.extend(block::rebase(code(&text[body..range.end]), body));
                }
            }
            _ => {}
        }
    }

    spans
}

/// Single-line `$...$` math. Runs of `$$` and escaped `\$` never delimit.
pub fn math(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;

    while let Some(offset) = text[i..].find('$') {
        let open = i + offset;

        let run = run_len(bytes, open, b'$');
        if run > 1 {
            i = open + run;
            continue;
        }
        if open > 0 && bytes[open - 1] == b'\\' {
            i = open + 1;
            continue;
        }

        let rest = &text[open + 1..];
        let line = &rest[..rest.find('\n').unwrap_or(rest.len())];
        match line.find('$') {
            Some(k) if k > 0 && bytes.get(open + k + 2) != Some(&b'$') => {
                let end = open + k + 2;
                spans.push(open..end);
                i = end;
            }
            _ => i = open + 1,
        }
    }

    spans
}

/// `#tag` tokens at line start or after whitespace. Headings (`# Title`)
/// are not tags since the marker must touch the tag body.
pub fn tags(text: &str) -> Vec<Range<usize>> {
    TAG.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.range())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claimed<'a>(text: &'a str, spans: &[Range<usize>]) -> Vec<&'a str> {
        spans.iter().map(|r| &text[r.clone()]).collect()
    }

    #[test]
    fn test_code_single_and_double() {
        let text = "use `absoltely` or ``a ` b`` here";
        assert_eq!(claimed(text, &code(text)), vec!["`absoltely`", "``a ` b``"]);
    }

    #[test]
    fn test_code_unmatched_run() {
        let text = "a `lonely tick and ``pair``";
        assert_eq!(claimed(text, &code(text)), vec!["``pair``"]);
    }

    #[test]
    fn test_code_stops_at_blank_line() {
        let text = "`open\n\nclosed`";
        assert!(code(text).is_empty());
    }

    #[test]
    fn test_code_may_span_single_newline() {
        let text = "`one\ntwo`";
        assert_eq!(claimed(text, &code(text)), vec!["`one\ntwo`"]);
    }

    #[test]
    fn test_code_escaped_backtick_is_text() {
        assert!(code(r"\`not code\`").is_empty());
    }

    #[test]
    fn test_code_inside_code_block_is_not_inline() {
        assert!(code("```\n`wich`\n```\n").is_empty());
        assert!(code("para\n\n    `wich`\n").is_empty());
    }

    #[test]
    fn test_code_after_unclosed_fence() {
        let text = "```\nsee `wich` here";
        assert_eq!(claimed(text, &code(text)), vec!["`wich`"]);
    }

    #[test]
    fn test_inline_math() {
        let text = "The same $ defenately $ applies to $x$.";
        assert_eq!(claimed(text, &math(text)), vec!["$ defenately $", "$x$"]);
    }

    #[test]
    fn test_inline_math_ignores_double_and_escaped() {
        assert!(math("$$ block $$").is_empty());
        assert!(math(r"price \$5 and more").is_empty());
        assert!(math("$ open\nclose $").is_empty());
    }

    #[test]
    fn test_tags() {
        let text = "#defenately stays\nsee #one and #two/nested.";
        assert_eq!(
            claimed(text, &tags(text)),
            vec!["#defenately", "#one", "#two/nested"]
        );
    }

    #[test]
    fn test_headings_and_anchors_are_not_tags() {
        assert!(tags("# Heading\n## Sub").is_empty());
        assert!(tags("page#anchor").is_empty());
    }
}
