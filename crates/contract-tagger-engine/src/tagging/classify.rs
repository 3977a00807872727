use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::{lines::Line, markers::MarkerDescriptor};

/// The structural role of one normalized line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Category {
    /// Blank, consumed by the title phase, or not (yet) classified.
    #[default]
    None,
    Title,
    Section,
    ListItem,
    Plain,
}

/// Category of a line plus the marker captured for list items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ClassifiedLine {
    pub category: Category,
    pub marker: Option<MarkerDescriptor>,
}

impl ClassifiedLine {
    fn of(category: Category) -> Self {
        Self {
            category,
            marker: None,
        }
    }
}

/// Output of the classifier, indexed like the normalized lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    pub lines: Vec<ClassifiedLine>,
    /// First line scanned by the body phase; everything before it belongs to
    /// the title phase.
    pub body_start: usize,
}

impl Classification {
    pub fn categories(&self) -> Vec<Category> {
        self.lines.iter().map(|l| l.category).collect()
    }
}

struct Patterns {
    exhibit: Regex,
    bare_title: Regex,
    section: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        exhibit: Regex::new(r"^\x{FEFF}?Exhibit.+$").expect("Invalid exhibit regex"),
        bare_title: Regex::new(r"^\x{FEFF}?[\w ]+$").expect("Invalid title regex"),
        section: Regex::new(r"^(?:Section.*|[A-Z ]+\.?|\d+\.\s*[A-Z ]+)$")
            .expect("Invalid section regex"),
    })
}

/// True if `text` looks like a section heading on its own.
pub fn is_section_heading(text: &str) -> bool {
    patterns().section.is_match(text)
}

/// Where the title phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TitlePhase {
    title: Option<usize>,
    body_start: usize,
}

/// Classifies normalized contract lines.
///
/// Runs a title phase over the first lines, then classifies every remaining
/// non-blank line as a section heading or list item. Lines that fit neither
/// are left `None` for the resolver to fill.
pub struct ContractLineClassifier;

impl ContractLineClassifier {
    pub fn classify(&self, lines: &[Line]) -> Classification {
        let mut out = vec![ClassifiedLine::default(); lines.len()];

        let phase = Self::title_phase(lines);
        if let Some(title) = phase.title {
            out[title] = ClassifiedLine::of(Category::Title);
        }

        for line in lines.iter().skip(phase.body_start) {
            out[line.index] = Self::classify_body_line(&line.text);
        }

        Classification {
            lines: out,
            body_start: phase.body_start,
        }
    }

    fn title_phase(lines: &[Line]) -> TitlePhase {
        let Some(first) = lines.first() else {
            return TitlePhase {
                title: None,
                body_start: 0,
            };
        };
        let p = patterns();

        if p.exhibit.is_match(&first.text) {
            // The first non-blank line after the exhibit preamble is the title.
            return match lines.iter().skip(1).find(|l| !l.is_blank()) {
                Some(title) => TitlePhase {
                    title: Some(title.index),
                    body_start: title.index + 1,
                },
                None => TitlePhase {
                    title: None,
                    body_start: lines.len(),
                },
            };
        }

        if !first.is_blank() && p.bare_title.is_match(&first.text) {
            return TitlePhase {
                title: Some(0),
                body_start: 1,
            };
        }

        TitlePhase {
            title: None,
            body_start: 0,
        }
    }

    fn classify_body_line(text: &str) -> ClassifiedLine {
        if super::lines::is_blank(text) {
            return ClassifiedLine::default();
        }
        if is_section_heading(text) {
            return ClassifiedLine::of(Category::Section);
        }
        match MarkerDescriptor::detect(text) {
            Some(marker) => ClassifiedLine {
                category: Category::ListItem,
                marker: Some(marker),
            },
            None => ClassifiedLine::default(),
        }
    }
}
