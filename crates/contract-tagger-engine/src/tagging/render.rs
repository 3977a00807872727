use super::{
    events::{TagEvent, TagKind},
    lines::{Line, LineSeparator},
};

/// Opening and closing marker strings for one tag kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub open: String,
    pub close: String,
}

impl Markers {
    /// `<name>` and `</name>`.
    pub fn plain(kind: TagKind) -> Self {
        Self {
            open: format!("<{}>", kind.name()),
            close: format!("</{}>", kind.name()),
        }
    }

    /// The plain markers passed through `paint`, e.g. to add terminal colors.
    pub fn painted(kind: TagKind, paint: impl Fn(&str) -> String) -> Self {
        let plain = Self::plain(kind);
        Self {
            open: paint(&plain.open),
            close: paint(&plain.close),
        }
    }
}

/// How each tag kind's markers are written.
///
/// An immutable value handed to the renderer; changing the look of a tag
/// means building a new style, never mutating a shared one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagStyle {
    markers: [Markers; 4],
}

fn slot(kind: TagKind) -> usize {
    match kind {
        TagKind::Title => 0,
        TagKind::Section => 1,
        TagKind::List => 2,
        TagKind::PlainText => 3,
    }
}

impl TagStyle {
    pub fn plain() -> Self {
        Self {
            markers: TagKind::ALL.map(Markers::plain),
        }
    }

    #[must_use]
    pub fn with_markers(mut self, kind: TagKind, markers: Markers) -> Self {
        self.markers[slot(kind)] = markers;
        self
    }

    pub fn markers(&self, kind: TagKind) -> &Markers {
        &self.markers[slot(kind)]
    }

    pub fn wrap(&self, kind: TagKind, text: &str) -> String {
        let m = self.markers(kind);
        format!("{}{text}{}", m.open, m.close)
    }
}

impl Default for TagStyle {
    fn default() -> Self {
        Self::plain()
    }
}

fn render_line(line: &str, event: &TagEvent, style: &TagStyle) -> String {
    let Some(kind) = event.kind else {
        return line.to_string();
    };
    let markers = style.markers(kind);
    let mut out = String::with_capacity(line.len() + 16);
    if event.opens() {
        out.push_str(&markers.open);
        out.push(' ');
    }
    out.push_str(line);
    if event.closes() {
        out.push(' ');
        out.push_str(&markers.close);
    }
    if event.closes_section {
        out.push(' ');
        out.push_str(&style.markers(TagKind::Section).close);
    }
    out
}

/// Writes every line with its open marker in front and close marker(s)
/// behind, joined with the document's separator.
pub fn render_tagged(
    lines: &[Line],
    events: &[TagEvent],
    style: &TagStyle,
    separator: LineSeparator,
) -> String {
    lines
        .iter()
        .zip(events)
        .map(|(line, event)| render_line(&line.text, event, style))
        .collect::<Vec<_>>()
        .join(separator.as_str())
}

/// Removes the markers `render_tagged` added with `style`, giving back the
/// normalized text.
pub fn strip_markers(tagged: &str, style: &TagStyle, separator: LineSeparator) -> String {
    let opens: Vec<String> = TagKind::ALL
        .iter()
        .map(|&k| format!("{} ", style.markers(k).open))
        .collect();
    let closes: Vec<String> = TagKind::ALL
        .iter()
        .map(|&k| format!(" {}", style.markers(k).close))
        .collect();

    tagged
        .split(separator.as_str())
        .map(|line| {
            let mut s = line;
            if let Some(rest) = opens.iter().find_map(|o| s.strip_prefix(o.as_str())) {
                s = rest;
            }
            // a leaf may be followed by the close of its enclosing section
            for _ in 0..2 {
                match closes.iter().find_map(|c| s.strip_suffix(c.as_str())) {
                    Some(rest) => s = rest,
                    None => break,
                }
            }
            s
        })
        .collect::<Vec<_>>()
        .join(separator.as_str())
}
