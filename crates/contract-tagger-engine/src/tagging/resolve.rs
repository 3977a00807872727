//! Whole-document repairs applied after line classification.
//!
//! Each pass is a pure function from one classification to the next. They
//! run in a fixed order: section-inside-list repair, section case
//! consistency, then the plain-text fill.

use super::{
    classify::{Category, ClassifiedLine, Classification},
    lines::Line,
    markers::MarkerDescriptor,
};

/// Runs every resolver pass in order.
pub fn resolve(lines: &[Line], classification: &Classification) -> Classification {
    let repaired = repair_sections_inside_lists(&classification.lines);
    let consistent = enforce_section_case(lines, &repaired);
    let filled = fill_plain(lines, &consistent, classification.body_start);
    Classification {
        lines: filled,
        body_start: classification.body_start,
    }
}

fn nearest_marker<'a, I>(mut iter: I) -> Option<&'a MarkerDescriptor>
where
    I: Iterator<Item = &'a ClassifiedLine>,
{
    iter.find(|l| l.category == Category::ListItem)
        .and_then(|l| l.marker.as_ref())
}

/// Demotes section headings that sit inside one continuous list.
///
/// A section is inside a list when the nearest list item above it and the
/// nearest one below it share a marker kind and the lower marker comes later
/// in that list's ordering. Every decision reads the input, never the partly
/// rewritten output.
pub fn repair_sections_inside_lists(lines: &[ClassifiedLine]) -> Vec<ClassifiedLine> {
    let mut out = lines.to_vec();
    for (i, line) in lines.iter().enumerate() {
        if line.category != Category::Section {
            continue;
        }
        let above = nearest_marker(lines[..i].iter().rev());
        let below = nearest_marker(lines[i + 1..].iter());
        if let (Some(above), Some(below)) = (above, below)
            && above.is_followed_by(below)
        {
            log::debug!(
                "line {i}: section between list markers {:?} and {:?}, demoted",
                above.value,
                below.value
            );
            out[i] = ClassifiedLine::default();
        }
    }
    out
}

/// Uppercase test with `str::isupper` semantics: at least one cased
/// character and no lowercase ones.
pub fn is_all_uppercase(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

/// When the document mixes heading styles, bare uppercase headings are
/// spurious: demote all of them.
pub fn enforce_section_case(lines: &[Line], classified: &[ClassifiedLine]) -> Vec<ClassifiedLine> {
    let sections = || {
        classified
            .iter()
            .zip(lines)
            .filter(|(c, _)| c.category == Category::Section)
    };

    let mixed = sections().any(|(_, l)| !is_all_uppercase(&l.text));
    let mut out = classified.to_vec();
    if !mixed {
        return out;
    }

    for (c, line) in classified.iter().zip(lines) {
        if c.category == Category::Section && is_all_uppercase(&line.text) {
            log::debug!("line {}: uppercase heading in mixed document, demoted", line.index);
            out[line.index] = ClassifiedLine::default();
        }
    }
    out
}

/// Every non-blank line of the body left unclassified becomes plain text.
pub fn fill_plain(
    lines: &[Line],
    classified: &[ClassifiedLine],
    body_start: usize,
) -> Vec<ClassifiedLine> {
    classified
        .iter()
        .zip(lines)
        .map(|(c, line)| {
            if line.index >= body_start && c.category == Category::None && !line.is_blank() {
                ClassifiedLine {
                    category: Category::Plain,
                    marker: None,
                }
            } else {
                c.clone()
            }
        })
        .collect()
}
