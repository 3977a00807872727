use std::sync::OnceLock;

use regex::Regex;

/// A single normalized line of the document.
///
/// `index` is the position in the normalized sequence, which is the coordinate
/// space for classification, tag events and tree spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub index: usize,
    pub text: String,
}

impl Line {
    /// True if the line contains only whitespace.
    pub fn is_blank(&self) -> bool {
        is_blank(&self.text)
    }
}

/// The line terminator used by the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineSeparator {
    #[default]
    Lf,
    CrLf,
}

impl LineSeparator {
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::CrLf
        } else {
            Self::Lf
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// A line that starts with a lowercase letter continues the sentence of the
/// line before it (the source wrapped it at a fixed width).
fn is_continuation(text: &str) -> bool {
    static CONTINUATION: OnceLock<Regex> = OnceLock::new();
    let re = CONTINUATION
        .get_or_init(|| Regex::new(r"^\s*[a-z]").expect("Invalid continuation regex"));
    re.is_match(text)
}

/// Merges soft-wrapped lines and collapses runs of blank lines.
///
/// Line 0 is always kept as-is. A continuation line drops any blank lines
/// retained before it and is glued onto the previous retained line without a
/// separator. A blank line is never retained directly after another one.
pub fn normalize_lines<'a, I>(raw: I) -> Vec<Line>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut raw = raw.into_iter();
    let mut kept: Vec<String> = match raw.next() {
        Some(first) => vec![first.to_string()],
        None => return Vec::new(),
    };

    for line in raw {
        if is_continuation(line) {
            while kept.last().is_some_and(|l| is_blank(l)) {
                kept.pop();
            }
            match kept.last_mut() {
                Some(prev) => prev.push_str(line),
                None => kept.push(line.to_string()),
            }
            continue;
        }

        let after_blank = kept.last().is_some_and(|l| is_blank(l));
        if is_blank(line) && after_blank {
            continue;
        }
        kept.push(line.to_string());
    }

    kept.into_iter()
        .enumerate()
        .map(|(index, text)| Line { index, text })
        .collect()
}

/// Splits raw text into lines and normalizes them.
pub fn normalize_text(text: &str) -> Vec<Line> {
    normalize_lines(text.lines())
}
