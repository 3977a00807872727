use serde::Serialize;

use super::{
    classify::{Category, ClassifiedLine},
    markers::{MarkerDescriptor, MarkerKind},
};

/// A growing sequence of list markers, e.g. `1.` `2.` `3.` or `(a)` `(b)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRun {
    pub kind: MarkerKind,
    /// Indices of the list lines in the run, in document order.
    pub lines: Vec<usize>,
}

impl ListRun {
    pub fn first_line(&self) -> usize {
        self.lines[0]
    }

    pub fn last_line(&self) -> usize {
        self.lines[self.lines.len() - 1]
    }
}

/// Groups list lines into growing sequences.
///
/// Lines between list items do not break a run; only a marker that does not
/// grow from the previous one starts a new run.
pub fn list_runs(classified: &[ClassifiedLine]) -> Vec<ListRun> {
    let mut runs: Vec<ListRun> = Vec::new();
    let mut prev: Option<&MarkerDescriptor> = None;

    for (index, line) in classified.iter().enumerate() {
        if line.category != Category::ListItem {
            continue;
        }
        let Some(marker) = line.marker.as_ref() else {
            continue;
        };

        let grows = prev.is_some_and(|p| p.grows_into(marker));
        if grows && let Some(run) = runs.last_mut() {
            run.lines.push(index);
        } else {
            runs.push(ListRun {
                kind: marker.kind,
                lines: vec![index],
            });
        }
        prev = Some(marker);
    }

    runs
}
