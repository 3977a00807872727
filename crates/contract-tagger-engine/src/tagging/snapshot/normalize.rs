use serde::Serialize;

use crate::tagging::{ParsedDocument, classify::Category, events::TagFlags};

/// Snapshot of a parsed document for testing with `insta`.
#[derive(Debug, Serialize)]
pub struct Snap {
    /// One entry per normalized line.
    pub lines: Vec<LineSnap>,
    /// Depth-first dump of the tree.
    pub outline: Vec<String>,
}

/// Snapshot of a single line.
#[derive(Debug, Serialize)]
pub struct LineSnap {
    pub index: usize,
    pub category: Category,
    /// Marker as `Kind(value)`, list items only.
    pub marker: Option<String>,
    /// `open`, `close`, `open+close` or empty.
    pub flags: String,
    pub tag: Option<String>,
    pub closes_section: bool,
    /// Preview of the line text (truncated for readability).
    pub text: String,
}

fn flags_label(flags: TagFlags) -> String {
    let open = flags.contains(TagFlags::OPEN);
    let close = flags.contains(TagFlags::CLOSE);
    match (open, close) {
        (true, true) => "open+close",
        (true, false) => "open",
        (false, true) => "close",
        (false, false) => "",
    }
    .to_string()
}

fn preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Converts a parsed document into a serializable snapshot.
pub fn normalize(doc: &ParsedDocument) -> Snap {
    let lines = doc
        .lines
        .iter()
        .zip(&doc.classification.lines)
        .zip(&doc.events)
        .map(|((line, class), event)| LineSnap {
            index: line.index,
            category: class.category,
            marker: class
                .marker
                .as_ref()
                .map(|m| format!("{:?}({})", m.kind, m.value)),
            flags: flags_label(event.flags),
            tag: event.kind.map(|k| k.name().to_string()),
            closes_section: event.closes_section,
            text: preview(&line.text, 60),
        })
        .collect();

    Snap {
        lines,
        outline: doc.tree.outline().lines().map(str::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn preview_short_text_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        assert_eq!(preview("•••••", 2), "••...");
    }

    #[test]
    fn flag_labels() {
        assert_eq!(flags_label(TagFlags::OPEN | TagFlags::CLOSE), "open+close");
        assert_eq!(flags_label(TagFlags::CLOSE), "close");
        assert_eq!(flags_label(TagFlags::NONE), "");
    }
}
