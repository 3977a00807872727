use std::{fmt, ops::BitOr};

use serde::Serialize;

use super::classify::{Category, ClassifiedLine};

/// Structural label attached to a span of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TagKind {
    Title,
    Section,
    List,
    PlainText,
}

impl TagKind {
    pub const ALL: [TagKind; 4] = [
        TagKind::Title,
        TagKind::Section,
        TagKind::List,
        TagKind::PlainText,
    ];

    /// Name used inside the `<...>` markers.
    pub fn name(self) -> &'static str {
        match self {
            TagKind::Title => "title",
            TagKind::Section => "s",
            TagKind::List => "l",
            TagKind::PlainText => "p",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name())
    }
}

/// Two-bit set of `OPEN` and `CLOSE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TagFlags(u8);

impl TagFlags {
    pub const NONE: TagFlags = TagFlags(0);
    pub const OPEN: TagFlags = TagFlags(1 << 0);
    pub const CLOSE: TagFlags = TagFlags(1 << 1);

    pub fn contains(self, other: TagFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: TagFlags) {
        self.0 |= other.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TagFlags {
    type Output = TagFlags;

    fn bitor(self, rhs: TagFlags) -> TagFlags {
        TagFlags(self.0 | rhs.0)
    }
}

/// Open/close information for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TagEvent {
    pub flags: TagFlags,
    pub kind: Option<TagKind>,
    /// The enclosing section closes right after this line's own tag.
    ///
    /// Set when a section ends on a line that already carries a single-line
    /// tag of another kind.
    pub closes_section: bool,
}

impl TagEvent {
    /// A tag that opens and closes on the same line.
    pub fn leaf(kind: TagKind) -> Self {
        Self {
            flags: TagFlags::OPEN | TagFlags::CLOSE,
            kind: Some(kind),
            closes_section: false,
        }
    }

    pub fn opens(&self) -> bool {
        self.kind.is_some() && self.flags.contains(TagFlags::OPEN)
    }

    pub fn closes(&self) -> bool {
        self.kind.is_some() && self.flags.contains(TagFlags::CLOSE)
    }
}

/// Turns resolved line categories into per-line tag events.
///
/// Titles, list items and plain lines are single-line tags. A section stays
/// open until the line before the next section, or until the last line.
pub struct EventBuilder {
    open_section: bool,
    out: Vec<TagEvent>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self {
            open_section: false,
            out: vec![],
        }
    }

    pub fn push(&mut self, line: &ClassifiedLine) {
        match line.category {
            Category::None => self.out.push(TagEvent::default()),
            Category::Section => {
                if self.open_section {
                    self.close_section_on_last_line();
                }
                self.out.push(TagEvent {
                    flags: TagFlags::OPEN,
                    kind: Some(TagKind::Section),
                    closes_section: false,
                });
                self.open_section = true;
            }
            Category::Title => self.out.push(TagEvent::leaf(TagKind::Title)),
            Category::ListItem => self.out.push(TagEvent::leaf(TagKind::List)),
            Category::Plain => self.out.push(TagEvent::leaf(TagKind::PlainText)),
        }
    }

    pub fn finish(mut self) -> Vec<TagEvent> {
        // EOF: sections never dangle past the last line
        if self.open_section {
            self.close_section_on_last_line();
        }
        self.out
    }

    fn close_section_on_last_line(&mut self) {
        self.open_section = false;
        let Some(last) = self.out.last_mut() else {
            return;
        };
        match last.kind {
            None => {
                last.flags = TagFlags::CLOSE;
                last.kind = Some(TagKind::Section);
            }
            Some(TagKind::Section) => last.flags.insert(TagFlags::CLOSE),
            Some(_) => last.closes_section = true,
        }
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the tag events for a whole classification.
pub fn build_events(classified: &[ClassifiedLine]) -> Vec<TagEvent> {
    let mut builder = EventBuilder::new();
    for line in classified {
        builder.push(line);
    }
    builder.finish()
}
