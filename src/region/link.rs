use super::preceded_by_bang;
use lazy_static::lazy_static;
use regex::Regex;
use std::ops::Range;

lazy_static! {
    // `[text](destination)` with one level of nested brackets/parens, or `<scheme:...>`.
    static ref MARKDOWN_LINK: Regex = Regex::new(
        r"\[(?:[^\[\]\n]|\[[^\[\]\n]*\])*\]\((?:[^()\n]|\([^()\n]*\))*\)|<[A-Za-z][A-Za-z0-9+.\-]*:[^\s<>]*>"
    )
    .unwrap();
    static ref WIKI_LINK: Regex = Regex::new(r"\[\[[^\[\]\n]+\]\]").unwrap();
    static ref IMAGE: Regex = Regex::new(
        r"!\[(?:[^\[\]\n]|\[[^\[\]\n]*\])*\]\((?:[^()\n]|\([^()\n]*\))*\)|!\[\[[^\[\]\n]+\]\]"
    )
    .unwrap();
    // Parentheses only inside the URL as balanced pairs, so `(see https://x.io)`
    // leaves the closing paren outside.
    static ref URL: Regex = Regex::new(
        r#"(?:https?|ftp)://(?:[^\s<>\[\]()"'`\x{E000}-\x{E01F}]|\([^\s<>\[\]()"'`\x{E000}-\x{E01F}]*\))+"#
    )
    .unwrap();
}

fn unless_embedded(regex: &Regex, text: &str) -> Vec<Range<usize>> {
    regex
        .find_iter(text)
        .filter(|m| !preceded_by_bang(text, m.start()))
        .map(|m| m.range())
        .collect()
}

/// Inline links and autolinks. `![...](...)` belongs to [`images`].
pub fn markdown_links(text: &str) -> Vec<Range<usize>> {
    unless_embedded(&MARKDOWN_LINK, text)
}

/// `[[target]]` and `[[target|alias]]`. `![[...]]` belongs to [`images`].
pub fn wiki_links(text: &str) -> Vec<Range<usize>> {
    unless_embedded(&WIKI_LINK, text)
}

/// Markdown images and wiki-style embeds.
pub fn images(text: &str) -> Vec<Range<usize>> {
    IMAGE.find_iter(text).map(|m| m.range()).collect()
}

/// Bare URLs. Sentence punctuation trailing the URL is not part of it.
pub fn urls(text: &str) -> Vec<Range<usize>> {
    URL.find_iter(text)
        .map(|m| {
            let url = m.as_str().trim_end_matches(|c| matches!(c, '.' | ',' | ';' | ':' | '!' | '?'));
            m.start()..m.start() + url.len()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claimed<'a>(text: &'a str, spans: &[Range<usize>]) -> Vec<&'a str> {
        spans.iter().map(|r| &text[r.clone()]).collect()
    }

    #[test]
    fn test_markdown_links() {
        let text = "see [the absoltely docs](https://x.io/a_(b)) and <https://y.io>";
        assert_eq!(
            claimed(text, &markdown_links(text)),
            vec!["[the absoltely docs](https://x.io/a_(b))", "<https://y.io>"]
        );
    }

    #[test]
    fn test_markdown_link_skips_images() {
        let text = "![alt](pic.png) [ok](page.md)";
        assert_eq!(claimed(text, &markdown_links(text)), vec!["[ok](page.md)"]);
    }

    #[test]
    fn test_wiki_links() {
        let text = "[[Absoltely]] and [[page|alias]] but ![[embed.png]]";
        assert_eq!(
            claimed(text, &wiki_links(text)),
            vec!["[[Absoltely]]", "[[page|alias]]"]
        );
    }

    #[test]
    fn test_images_and_embeds() {
        let text = "![absoltely](pic.png) and ![[embed.png]]";
        assert_eq!(
            claimed(text, &images(text)),
            vec!["![absoltely](pic.png)", "![[embed.png]]"]
        );
    }

    #[test]
    fn test_urls() {
        let text = "http://www.Absoltely.com should not be corrected, see https://a.io/x.";
        assert_eq!(
            claimed(text, &urls(text)),
            vec!["http://www.Absoltely.com", "https://a.io/x"]
        );
    }

    #[test]
    fn test_urls_with_parentheses() {
        let text = "see https://en.wikipedia.org/wiki/X_(wich) now (or https://a.io/y).";
        assert_eq!(
            claimed(text, &urls(text)),
            vec!["https://en.wikipedia.org/wiki/X_(wich)", "https://a.io/y"]
        );
    }

    #[test]
    fn test_url_stops_at_placeholder_sentinel() {
        let text = "https://a.io/\u{E000}\u{E010}\u{E001}";
        assert_eq!(claimed(text, &urls(text)), vec!["https://a.io/"]);
    }
}
