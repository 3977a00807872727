use contract_tagger_config::{ColorName, ColorSpec, Colors};
use contract_tagger_engine::{Markers, TagKind, TagStyle};
use crossterm::style::{Attribute, Color, ContentStyle};

fn terminal_color(name: ColorName) -> Color {
    match name {
        ColorName::Black => Color::Black,
        ColorName::Red => Color::Red,
        ColorName::Green => Color::Green,
        ColorName::Yellow => Color::Yellow,
        ColorName::Blue => Color::Blue,
        ColorName::Magenta => Color::Magenta,
        ColorName::Cyan => Color::Cyan,
        ColorName::White => Color::White,
        ColorName::Grey => Color::Grey,
    }
}

pub fn content_style(spec: &ColorSpec) -> ContentStyle {
    let mut style = ContentStyle::new();
    style.foreground_color = spec.color.map(terminal_color);
    if spec.bold {
        style.attributes.set(Attribute::Bold);
    }
    if spec.underline {
        style.attributes.set(Attribute::Underlined);
    }
    style
}

fn spec_for(colors: &Colors, kind: TagKind) -> &ColorSpec {
    match kind {
        TagKind::Title => &colors.title,
        TagKind::Section => &colors.section,
        TagKind::List => &colors.list,
        TagKind::PlainText => &colors.plain,
    }
}

/// Marker style for terminal output. Kinds whose color spec is disabled keep
/// their plain markers.
pub fn tag_style(colors: &Colors, enable_colors: bool) -> TagStyle {
    if !enable_colors {
        return TagStyle::plain();
    }
    TagKind::ALL
        .into_iter()
        .fold(TagStyle::plain(), |style, kind| {
            let spec = spec_for(colors, kind);
            if !spec.enabled {
                return style;
            }
            let content = content_style(spec);
            style.with_markers(
                kind,
                Markers::painted(kind, |marker| content.apply(marker).to_string()),
            )
        })
}
