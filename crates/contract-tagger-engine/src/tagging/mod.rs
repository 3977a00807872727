//! # Contract Tagging
//!
//! Recovers the structure of a plain-text contract in five steps:
//!
//! 1. **Normalization** (`lines`): soft-wrapped lines are merged and blank
//!    runs collapsed. Indices into the normalized lines are the coordinate
//!    space for every later step.
//! 2. **Classification** (`classify`, `markers`): a title phase over the first
//!    lines, then each body line is a section heading, a list item, or left
//!    for later.
//! 3. **Resolution** (`resolve`): whole-document repairs that need context a
//!    single line cannot give (headings inside lists, mixed heading styles).
//! 4. **Tag events** (`events`): per-line open/close flags.
//! 5. **Tree** (`tree`): an arena tree built from the events with an explicit
//!    stack; unbalanced events are an error, never a truncated tree.
//!
//! Rendering (`render`) works from the events alone. Everything here is pure:
//! no I/O, no shared mutable state.

pub mod classify;
pub mod events;
pub mod lines;
pub mod markers;
pub mod render;
pub mod resolve;
pub mod sequence;
pub mod snapshot;
pub mod tree;

#[cfg(test)]
mod tests;

use thiserror::Error;

use classify::{Classification, ContractLineClassifier};
use events::{TagEvent, TagKind};
use lines::{Line, LineSeparator, normalize_lines};
use render::TagStyle;
use sequence::ListRun;
use tree::{TextTree, TreeError};

#[derive(Debug, Error)]
pub enum TagError {
    #[error("Unbalanced tag events: {0}")]
    Tree(#[from] TreeError),
}

/// Everything one pipeline run derives from a document.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub lines: Vec<Line>,
    pub classification: Classification,
    pub events: Vec<TagEvent>,
    pub tree: TextTree,
    pub separator: LineSeparator,
}

impl ParsedDocument {
    /// The tagged text.
    pub fn render(&self, style: &TagStyle) -> String {
        render::render_tagged(&self.lines, &self.events, style, self.separator)
    }

    /// `(open_line, close_line)` of every node of `kind`, breadth-first.
    pub fn spans(&self, kind: TagKind) -> Vec<(usize, usize)> {
        self.tree.spans(kind)
    }

    pub fn list_runs(&self) -> Vec<ListRun> {
        sequence::list_runs(&self.classification.lines)
    }

    /// The normalized lines joined back together, without tags.
    pub fn normalized_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join(self.separator.as_str())
    }
}

/// Runs the whole pipeline over raw text.
pub fn parse_document(text: &str) -> Result<ParsedDocument, TagError> {
    parse_lines(text.lines(), LineSeparator::detect(text))
}

/// Runs the whole pipeline over lines already split from their source.
pub fn parse_lines<'a, I>(raw: I, separator: LineSeparator) -> Result<ParsedDocument, TagError>
where
    I: IntoIterator<Item = &'a str>,
{
    let lines = normalize_lines(raw);
    let classified = ContractLineClassifier.classify(&lines);
    let classification = resolve::resolve(&lines, &classified);

    let events = events::build_events(&classification.lines);
    let tree = TextTree::build(&events)?;

    Ok(ParsedDocument {
        lines,
        classification,
        events,
        tree,
        separator,
    })
}

/// Convenience: parse and render in one go.
pub fn tag_text(text: &str, style: &TagStyle) -> Result<String, TagError> {
    Ok(parse_document(text)?.render(style))
}
