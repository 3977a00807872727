use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Which list-marker grammar matched a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MarkerKind {
    /// `3`, `3.` or `3)`
    Numeric,
    /// `B.`, `iv)`, `Article.`
    AlphaDotOrParen,
    /// `(a)`, `(iv)`, `(12)`
    ParenthesizedWord,
    /// `•`, `-` or `*`
    Bullet,
}

/// The marker found at the start of a list line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerDescriptor {
    pub kind: MarkerKind,
    /// The captured token without its punctuation.
    pub value: String,
}

struct Grammar {
    kind: MarkerKind,
    pattern: &'static str,
}

/// Grammars in priority order; the first one that captures a value wins.
const GRAMMARS: [Grammar; 4] = [
    Grammar {
        kind: MarkerKind::Numeric,
        pattern: r"^\s*(\d+)[.)]?",
    },
    Grammar {
        kind: MarkerKind::AlphaDotOrParen,
        pattern: r"^\s*(\w+)[.)]",
    },
    Grammar {
        kind: MarkerKind::ParenthesizedWord,
        pattern: r"^\s*\((\w+)\)",
    },
    Grammar {
        kind: MarkerKind::Bullet,
        pattern: r"^\s*([•\-*])",
    },
];

fn compiled() -> &'static [(MarkerKind, Regex)] {
    static COMPILED: OnceLock<Vec<(MarkerKind, Regex)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        GRAMMARS
            .iter()
            .map(|g| {
                (
                    g.kind,
                    Regex::new(g.pattern).expect("Invalid list marker regex"),
                )
            })
            .collect()
    })
}

/// A line holding nothing but digits, dots and parentheses (page numbers,
/// clause numbers quoted alone).
pub fn is_bare_number(text: &str) -> bool {
    static BARE: OnceLock<Regex> = OnceLock::new();
    let re = BARE.get_or_init(|| Regex::new(r"^\s*[\d.)]+\s*$").expect("Invalid number regex"));
    re.is_match(text)
}

impl MarkerDescriptor {
    /// Detects the list marker at the start of `text`.
    ///
    /// Bare numbers are never list items. A grammar whose capture comes back
    /// empty counts as a non-match and the next grammar is tried.
    pub fn detect(text: &str) -> Option<Self> {
        if is_bare_number(text) {
            return None;
        }
        compiled().iter().find_map(|(kind, re)| {
            let value = re.captures(text)?.get(1)?.as_str();
            (!value.is_empty()).then(|| MarkerDescriptor {
                kind: *kind,
                value: value.to_string(),
            })
        })
    }

    fn number(&self) -> Option<u64> {
        self.value.parse().ok()
    }

    /// True if `later` can follow `self` somewhere further down the same list.
    ///
    /// Numbers must be strictly greater, words lexicographically greater,
    /// bullets always match. Different kinds never match.
    pub fn is_followed_by(&self, later: &MarkerDescriptor) -> bool {
        if self.kind != later.kind {
            return false;
        }
        match self.kind {
            MarkerKind::Numeric => match (self.number(), later.number()) {
                (Some(a), Some(b)) => b > a,
                _ => false,
            },
            MarkerKind::AlphaDotOrParen | MarkerKind::ParenthesizedWord => {
                later.value > self.value
            }
            MarkerKind::Bullet => true,
        }
    }

    /// True if `next` is the immediate successor of `self` in a growing sequence.
    ///
    /// Numbers grow by exactly one. Word markers of the same kind always
    /// continue; bullets continue while the glyph stays the same.
    pub fn grows_into(&self, next: &MarkerDescriptor) -> bool {
        if self.kind != next.kind {
            return false;
        }
        match self.kind {
            MarkerKind::Numeric => match (self.number(), next.number()) {
                (Some(a), Some(b)) => a.checked_add(1) == Some(b),
                _ => false,
            },
            MarkerKind::AlphaDotOrParen | MarkerKind::ParenthesizedWord => true,
            MarkerKind::Bullet => self.value == next.value,
        }
    }
}
