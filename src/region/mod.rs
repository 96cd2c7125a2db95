//! Markdown constructs whose contents must never be rewritten.
//!
//! Every [`RegionKind`] owns a detector that scans text and returns the byte
//! ranges it claims. Detectors are pure functions of their input; the mask
//! engine runs them in priority order over progressively masked text, so a
//! detector never sees content an earlier kind already claimed.

pub mod block;
pub mod inline;
pub mod link;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegionKind {
    Yaml,
    Code,
    InlineCode,
    Math,
    InlineMath,
    Link,
    WikiLink,
    Tag,
    Image,
    Url,
}

impl RegionKind {
    /// Detection order. YAML goes first because front matter can hold link-
    /// and tag-like text; URLs go last because link and image syntax already
    /// contains them.
    pub const PRIORITY: [RegionKind; 10] = [
        RegionKind::Yaml,
        RegionKind::Code,
        RegionKind::InlineCode,
        RegionKind::Math,
        RegionKind::InlineMath,
        RegionKind::Link,
        RegionKind::WikiLink,
        RegionKind::Tag,
        RegionKind::Image,
        RegionKind::Url,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RegionKind::Yaml => "yaml",
            RegionKind::Code => "code",
            RegionKind::InlineCode => "inline-code",
            RegionKind::Math => "math",
            RegionKind::InlineMath => "inline-math",
            RegionKind::Link => "link",
            RegionKind::WikiLink => "wiki-link",
            RegionKind::Tag => "tag",
            RegionKind::Image => "image",
            RegionKind::Url => "url",
        }
    }

    /// Find every span of this kind in `text`, ascending and non-overlapping.
    pub fn detect(self, text: &str) -> Vec<Range<usize>> {
        match self {
            RegionKind::Yaml => block::yaml(text).into_iter().collect(),
            RegionKind::Code => block::code_blocks(text),
            RegionKind::InlineCode => inline::code(text),
            RegionKind::Math => block::math(text),
            RegionKind::InlineMath => inline::math(text),
            RegionKind::Link => link::markdown_links(text),
            RegionKind::WikiLink => link::wiki_links(text),
            RegionKind::Tag => inline::tags(text),
            RegionKind::Image => link::images(text),
            RegionKind::Url => link::urls(text),
        }
    }

    /// Sort into detection order and drop duplicates.
    pub fn normalize(kinds: &[RegionKind]) -> Vec<RegionKind> {
        let mut kinds = kinds.to_vec();
        kinds.sort();
        kinds.dedup();
        kinds
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RegionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RegionKind::PRIORITY
            .iter()
            .copied()
            .find(|kind| kind.name() == s.trim().to_lowercase())
            .ok_or_else(|| format!("Unknown region kind: {}", s))
    }
}

/// True when the byte just before `pos` is `!`.
pub(crate) fn preceded_by_bang(text: &str, pos: usize) -> bool {
    pos > 0 && text.as_bytes()[pos - 1] == b'!'
}
